//! Game clock with fixed-timestep accumulator and time scaling

use std::time::Instant;

/// Tracks frame time and provides a fixed-timestep accumulator.
///
/// The accumulator collects *scaled* delta time and is drained in
/// `fixed_timestep`-sized quanta, so the number of fixed updates per
/// wall-clock interval is deterministic regardless of frame-rate variance.
/// A `time_scale` of 0 pauses the simulation (no scaled delta, no fixed
/// updates) while unscaled time keeps flowing.
pub struct GameClock {
    /// Total scaled time in seconds
    pub total_time: f64,
    /// Unscaled time since last frame in seconds
    unscaled_delta: f64,
    /// Multiplier applied to delta time (>= 0; 0 pauses)
    time_scale: f64,
    /// Fixed timestep quantum in unscaled seconds (0 disables fixed updates)
    fixed_timestep: f64,
    /// Accumulated scaled time for fixed-step consumption (always >= 0)
    accumulator: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

/// Frame-time clamp to avoid a spiral of death after a stall (250ms)
const MAX_FRAME_DELTA: f64 = 0.25;

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            unscaled_delta: 0.0,
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    /// Create a new clock with the default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom fixed-update rate. `hz <= 0` disables
    /// fixed updates entirely.
    pub fn with_fixed_rate(hz: f64) -> Self {
        Self {
            fixed_timestep: if hz > 0.0 { 1.0 / hz } else { 0.0 },
            ..Self::default()
        }
    }

    /// Advance the clock from wall-clock time. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.unscaled_delta = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.tick_with_delta(elapsed);
    }

    /// Advance the clock by an explicit elapsed interval.
    ///
    /// This is the whole tick except for the wall-clock sampling; scripted
    /// drivers and tests feed deterministic time through it. Negative
    /// elapsed time (clock anomaly) is clamped to zero, long stalls to
    /// 250ms.
    pub fn tick_with_delta(&mut self, elapsed: f64) {
        self.first_tick = false;
        self.unscaled_delta = elapsed.clamp(0.0, MAX_FRAME_DELTA);
        self.total_time += self.delta_time();
        self.accumulator += self.delta_time();
    }

    /// Scaled time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.unscaled_delta * self.time_scale
    }

    /// Unscaled time since the last frame in seconds
    pub fn unscaled_delta_time(&self) -> f64 {
        self.unscaled_delta
    }

    /// Scaled fixed-update quantum in seconds
    pub fn fixed_delta_time(&self) -> f64 {
        self.fixed_timestep * self.time_scale
    }

    /// Unscaled fixed-update quantum in seconds (0 when disabled)
    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the time scale, clamped to `>= 0`
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// Set the fixed timestep in seconds, clamped to `>= 0`. 0 disables
    /// fixed updates.
    pub fn set_fixed_timestep(&mut self, seconds: f64) {
        self.fixed_timestep = seconds.max(0.0);
    }

    /// Returns true if there is enough accumulated time for a fixed step
    pub fn should_fixed_update(&self) -> bool {
        self.fixed_timestep > 0.0 && self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator = (self.accumulator - self.fixed_timestep).max(0.0);
    }

    /// Interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        if self.fixed_timestep > 0.0 {
            self.accumulator / self.fixed_timestep
        } else {
            0.0
        }
    }

    #[cfg(test)]
    fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
