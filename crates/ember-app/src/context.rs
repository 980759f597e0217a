//! Per-callback view of loop state

use ember_runtime::{GameClock, InputState};
use winit::window::Window;

/// Borrowed view of the loop's state, handed to every [`EmberApp`] callback.
///
/// Reads go through `input` and `clock`; writes are requests the driver
/// applies after the callback returns. Exit requests take effect at the end
/// of the current frame, never mid-frame.
///
/// [`EmberApp`]: crate::EmberApp
pub struct AppContext<'a> {
    pub input: &'a InputState,
    pub clock: &'a GameClock,
    /// The OS window; `None` when driven headless
    pub window: Option<&'a Window>,
    /// Current window size in physical pixels
    pub window_size: (u32, u32),
    pub(crate) exit_requested: Option<i32>,
    pub(crate) time_scale_request: Option<f64>,
}

impl<'a> AppContext<'a> {
    pub(crate) fn new(
        input: &'a InputState,
        clock: &'a GameClock,
        window: Option<&'a Window>,
        window_size: (u32, u32),
    ) -> Self {
        Self {
            input,
            clock,
            window,
            window_size,
            exit_requested: None,
            time_scale_request: None,
        }
    }

    /// Request a normal exit (code 0) at the end of this frame
    pub fn request_exit(&mut self) {
        self.request_exit_with(0);
    }

    /// Request an exit with a specific process exit code
    pub fn request_exit_with(&mut self, code: i32) {
        self.exit_requested = Some(code);
    }

    /// Request a new time scale, applied after this callback returns.
    /// `0.0` pauses the simulation while unscaled time keeps flowing.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale_request = Some(scale);
    }
}
