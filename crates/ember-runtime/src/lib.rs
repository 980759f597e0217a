//! Ember Runtime - Frame loop building blocks
//!
//! Provides the two stateful pieces every frame loop needs:
//! - `GameClock` — fixed-timestep accumulator with time scaling
//! - `InputState` — per-key edge detection (press/hold/release), pointer
//!   tracking, and action bindings

mod clock;
mod input;

pub use clock::GameClock;
pub use input::{ButtonState, InputState, MOUSE_BUTTON_COUNT};

// Re-exported winit enums so downstream crates can name keys and modifiers
// without a direct winit dependency.
pub use winit::keyboard::{KeyCode, ModifiersState};
