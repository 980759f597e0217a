//! App callback trait

use crate::context::AppContext;

/// The callback seam every Ember application implements.
///
/// All methods have empty defaults, so a minimal app overrides nothing.
/// Per frame the driver calls, strictly in order: zero or more
/// `on_fixed_update`, then `on_update` once, then `on_render` once; input
/// edges advance after `on_render`, so every callback in a frame observes
/// that frame's press/release state.
///
/// The loop does not catch panics from these callbacks.
#[allow(unused_variables)]
pub trait EmberApp {
    /// Called once, after the window exists and before the first frame
    fn on_start(&mut self, ctx: &mut AppContext) {}

    /// Called at the fixed rate with the scaled fixed quantum.
    /// Deterministic step count per wall-clock interval; may run zero or
    /// several times in one frame.
    fn on_fixed_update(&mut self, ctx: &mut AppContext, dt: f64) {}

    /// Called exactly once per frame with the scaled frame delta
    fn on_update(&mut self, ctx: &mut AppContext, dt: f64) {}

    /// Called exactly once per frame, after `on_update`
    fn on_render(&mut self, ctx: &mut AppContext) {}

    /// Called when the window is resized; `new_size` is in physical pixels
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {}

    /// Called exactly once when the loop shuts down
    fn on_close(&mut self, ctx: &mut AppContext) {}
}
