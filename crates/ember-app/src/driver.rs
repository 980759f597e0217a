//! Frame driver - the per-frame sequence, independent of any window system
//!
//! `FrameDriver` owns the clock and input state and executes one frame:
//! tick, drain fixed steps, update, render, advance input edges. The winit
//! runner feeds it wall-clock frames; tests and headless tools feed it
//! scripted deltas through [`FrameDriver::frame_with_delta`].

use crate::context::AppContext;
use crate::traits::EmberApp;
use ember_runtime::{GameClock, InputState};
use winit::window::Window;

/// Owns loop state and steps an [`EmberApp`] one frame at a time.
pub struct FrameDriver {
    pub clock: GameClock,
    pub input: InputState,
    exit_code: Option<i32>,
}

impl FrameDriver {
    /// Create a driver with the given fixed-update rate (`hz <= 0`
    /// disables fixed updates)
    pub fn new(fixed_hz: f64) -> Self {
        Self {
            clock: GameClock::with_fixed_rate(fixed_hz),
            input: InputState::new(),
            exit_code: None,
        }
    }

    /// The exit code requested by a callback, if any. Checked by the
    /// runner at frame boundaries.
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit_code
    }

    /// Invoke `on_start`. Call once, before the first frame.
    pub fn start<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
    ) {
        self.with_ctx(app, window, window_size, |app, ctx| app.on_start(ctx));
    }

    /// Invoke `on_resize` with the new physical size
    pub fn resize<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        new_size: (u32, u32),
    ) {
        self.with_ctx(app, window, new_size, |app, ctx| {
            app.on_resize(new_size, ctx)
        });
    }

    /// Invoke `on_close`. The runner guarantees this runs exactly once.
    pub fn close<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
    ) {
        self.with_ctx(app, window, window_size, |app, ctx| app.on_close(ctx));
    }

    /// Run one frame from wall-clock time
    pub fn frame<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
    ) {
        self.clock.tick();
        self.frame_body(app, window, window_size);
    }

    /// Run one frame from an explicit delta (scripted/headless time)
    pub fn frame_with_delta<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
        elapsed: f64,
    ) {
        self.clock.tick_with_delta(elapsed);
        self.frame_body(app, window, window_size);
    }

    fn frame_body<A: EmberApp>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
    ) {
        // Fixed-step drain: deterministic step count per elapsed interval.
        // An exit request does not cut the frame short; it is honored at
        // the frame boundary by the caller.
        while self.clock.should_fixed_update() {
            self.clock.consume_fixed_step();
            let dt = self.clock.fixed_delta_time();
            self.with_ctx(app, window, window_size, |app, ctx| {
                app.on_fixed_update(ctx, dt)
            });
        }

        let dt = self.clock.delta_time();
        self.with_ctx(app, window, window_size, |app, ctx| app.on_update(ctx, dt));
        self.with_ctx(app, window, window_size, |app, ctx| app.on_render(ctx));

        // Advance edges last: every callback above saw this frame's
        // press/release state.
        self.input.end_frame();
    }

    fn with_ctx<A, F>(
        &mut self,
        app: &mut A,
        window: Option<&Window>,
        window_size: (u32, u32),
        f: F,
    ) where
        A: EmberApp,
        F: FnOnce(&mut A, &mut AppContext),
    {
        let (exit, time_scale) = {
            let mut ctx = AppContext::new(&self.input, &self.clock, window, window_size);
            f(app, &mut ctx);
            (ctx.exit_requested, ctx.time_scale_request)
        };
        if let Some(scale) = time_scale {
            self.clock.set_time_scale(scale);
        }
        if let Some(code) = exit {
            self.exit_code.get_or_insert(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_runtime::KeyCode;

    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        starts: usize,
        fixed: usize,
        updates: usize,
        renders: usize,
        closes: usize,
        pressed_seen: Vec<bool>,
        held_seen: Vec<bool>,
    }

    impl EmberApp for Recorder {
        fn on_start(&mut self, _ctx: &mut AppContext) {
            self.starts += 1;
        }
        fn on_fixed_update(&mut self, _ctx: &mut AppContext, _dt: f64) {
            self.log.push("fixed");
            self.fixed += 1;
        }
        fn on_update(&mut self, ctx: &mut AppContext, _dt: f64) {
            self.log.push("update");
            self.updates += 1;
            self.pressed_seen.push(ctx.input.is_pressed(KeyCode::Space));
            self.held_seen.push(ctx.input.is_held(KeyCode::Space));
        }
        fn on_render(&mut self, _ctx: &mut AppContext) {
            self.log.push("render");
            self.renders += 1;
        }
        fn on_close(&mut self, _ctx: &mut AppContext) {
            self.closes += 1;
        }
    }

    #[test]
    fn scripted_run_counts() {
        let mut driver = FrameDriver::new(50.0); // fixed_timestep = 0.02
        let mut app = Recorder::default();
        driver.start(&mut app, None, (640, 480));

        for _ in 0..2 {
            driver.frame_with_delta(&mut app, None, (640, 480), 0.05);
        }

        assert_eq!(app.starts, 1);
        assert_eq!(app.updates, 2);
        assert_eq!(app.renders, 2);
        // floor(0.10 / 0.02) = 5 fixed updates across the two frames
        assert_eq!(app.fixed, 5);
    }

    #[test]
    fn frame_order_fixed_update_render() {
        let mut driver = FrameDriver::new(50.0);
        let mut app = Recorder::default();
        driver.frame_with_delta(&mut app, None, (1, 1), 0.05);

        assert_eq!(app.log, vec!["fixed", "fixed", "update", "render"]);
    }

    #[test]
    fn no_fixed_updates_when_disabled() {
        let mut driver = FrameDriver::new(0.0);
        let mut app = Recorder::default();
        for _ in 0..10 {
            driver.frame_with_delta(&mut app, None, (1, 1), 0.1);
        }
        assert_eq!(app.fixed, 0);
        assert_eq!(app.updates, 10);
    }

    #[test]
    fn edges_visible_during_frame_decayed_after() {
        let mut driver = FrameDriver::new(0.0);
        let mut app = Recorder::default();

        driver.input.process_key_down(KeyCode::Space);
        driver.frame_with_delta(&mut app, None, (1, 1), 0.016);
        driver.frame_with_delta(&mut app, None, (1, 1), 0.016);

        // Frame 1 saw the press edge, frame 2 only the held state
        assert_eq!(app.pressed_seen, vec![true, false]);
        assert_eq!(app.held_seen, vec![true, true]);
    }

    #[test]
    fn exit_request_waits_for_frame_boundary() {
        struct QuitOnFixed {
            fixed: usize,
            renders: usize,
        }
        impl EmberApp for QuitOnFixed {
            fn on_fixed_update(&mut self, ctx: &mut AppContext, _dt: f64) {
                self.fixed += 1;
                ctx.request_exit_with(3);
            }
            fn on_render(&mut self, _ctx: &mut AppContext) {
                self.renders += 1;
            }
        }

        let mut driver = FrameDriver::new(50.0);
        let mut app = QuitOnFixed { fixed: 0, renders: 0 };
        driver.frame_with_delta(&mut app, None, (1, 1), 0.05);

        // The whole frame still ran: both fixed steps, and the render
        assert_eq!(app.fixed, 2);
        assert_eq!(app.renders, 1);
        assert_eq!(driver.exit_requested(), Some(3));
    }

    #[test]
    fn first_exit_code_wins() {
        struct TwoQuits;
        impl EmberApp for TwoQuits {
            fn on_update(&mut self, ctx: &mut AppContext, _dt: f64) {
                ctx.request_exit_with(1);
            }
            fn on_render(&mut self, ctx: &mut AppContext) {
                ctx.request_exit_with(2);
            }
        }

        let mut driver = FrameDriver::new(0.0);
        let mut app = TwoQuits;
        driver.frame_with_delta(&mut app, None, (1, 1), 0.016);
        assert_eq!(driver.exit_requested(), Some(1));
    }

    #[test]
    fn time_scale_request_pauses_simulation() {
        struct Pauser {
            fixed: usize,
            paused: bool,
        }
        impl EmberApp for Pauser {
            fn on_fixed_update(&mut self, _ctx: &mut AppContext, _dt: f64) {
                self.fixed += 1;
            }
            fn on_update(&mut self, ctx: &mut AppContext, _dt: f64) {
                if !self.paused {
                    self.paused = true;
                    ctx.set_time_scale(0.0);
                }
            }
        }

        let mut driver = FrameDriver::new(50.0);
        let mut app = Pauser { fixed: 0, paused: false };
        driver.frame_with_delta(&mut app, None, (1, 1), 0.02);
        let fixed_before_pause = app.fixed;
        assert!(fixed_before_pause > 0);

        // Paused: scaled delta is zero, the accumulator stops growing
        for _ in 0..10 {
            driver.frame_with_delta(&mut app, None, (1, 1), 0.02);
        }
        assert_eq!(app.fixed, fixed_before_pause);
        assert!(driver.clock.unscaled_delta_time() > 0.0);
    }

    #[test]
    fn close_invokes_callback() {
        let mut driver = FrameDriver::new(0.0);
        let mut app = Recorder::default();
        driver.close(&mut app, None, (1, 1));
        assert_eq!(app.closes, 1);
    }
}
