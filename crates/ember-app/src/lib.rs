//! Ember App - window loop runner
//!
//! Wires `GameClock`, `InputState`, and a user [`EmberApp`] into a winit
//! event loop. Each frame runs, strictly in order: poll OS events, tick the
//! clock, drain fixed updates, update, render, present, advance input edges.
//!
//! ```rust,ignore
//! use ember_app::{run, AppConfig, AppContext, EmberApp, KeyCode};
//!
//! struct MyApp;
//!
//! impl EmberApp for MyApp {
//!     fn on_update(&mut self, ctx: &mut AppContext, _dt: f64) {
//!         if ctx.input.is_pressed(KeyCode::Escape) {
//!             ctx.request_exit();
//!         }
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let code = run(AppConfig::new().with_title("My App"), MyApp)?;
//!     std::process::exit(code);
//! }
//! ```

pub mod config;
pub mod context;
pub mod driver;
pub mod runner;
pub mod traits;

pub use config::AppConfig;
pub use context::AppContext;
pub use driver::FrameDriver;
pub use runner::run;
pub use traits::EmberApp;

// Re-export the primitives most apps need so they don't have to depend on
// the lower crates directly.
pub use ember_core::{EmberError, Mat4, Result, Transform, Vec3};
pub use ember_runtime::{ButtonState, GameClock, InputState, KeyCode, ModifiersState};
