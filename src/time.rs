//! Simulation clock.
//!
//! The engine takes `now_ms` as a plain argument; [`SimClock`] is a convenient
//! source for it. It is monotonic, can be paused and scaled, and has a
//! fixed-step mode for deterministic replays and benchmarks.
//!
//! # Example
//!
//! ```ignore
//! use tilefx::time::SimClock;
//!
//! let mut clock = SimClock::new();
//!
//! // In your game loop:
//! let now_ms = clock.advance();
//! engine.tick(now_ms, &world);
//!
//! println!("Frame {} at {} ms ({:.1} fps)", clock.frame(), now_ms, clock.fps());
//! ```

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Millisecond clock for driving a particle engine.
#[derive(Debug)]
pub struct SimClock {
    last_frame: Instant,
    /// Simulation time in milliseconds.
    now_ms: u64,
    /// Fractional milliseconds carried between frames.
    remainder_ms: f64,
    /// Simulation time added by the last frame.
    delta_ms: u64,
    frames: u64,
    /// Frames per wall-clock second, sampled every `FPS_WINDOW`.
    fps: f32,
    fps_window_frames: u64,
    fps_window_start: Instant,
    paused: bool,
    /// Replaces the wall-clock delta when set.
    fixed_step_ms: Option<u64>,
    /// Multiplier on every delta; 0 freezes time without pausing.
    time_scale: f64,
}

impl SimClock {
    /// Create a clock at 0 ms, following the wall clock.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            now_ms: 0,
            remainder_ms: 0.0,
            delta_ms: 0,
            frames: 0,
            fps: 0.0,
            fps_window_frames: 0,
            fps_window_start: now,
            paused: false,
            fixed_step_ms: None,
            time_scale: 1.0,
        }
    }

    /// Create a clock that advances exactly `step_ms` per frame.
    pub fn fixed(step_ms: u64) -> Self {
        let mut clock = Self::new();
        clock.set_fixed_step(Some(step_ms));
        clock
    }

    /// Advance one frame. Returns the new simulation time in milliseconds.
    pub fn advance(&mut self) -> u64 {
        let now = Instant::now();
        let raw_ms = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;

        if self.paused {
            self.delta_ms = 0;
            return self.now_ms;
        }

        let step = match self.fixed_step_ms {
            Some(step) => step as f64,
            None => raw_ms,
        } * self.time_scale
            + self.remainder_ms;
        let whole = step.floor();
        self.remainder_ms = step - whole;
        self.delta_ms = whole as u64;
        self.now_ms += self.delta_ms;

        self.frames += 1;

        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            self.fps = (self.frames - self.fps_window_frames) as f32 / window.as_secs_f32();
            self.fps_window_frames = self.frames;
            self.fps_window_start = now;
        }

        self.now_ms
    }

    /// Current simulation time in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Simulation time added by the last frame.
    #[inline]
    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }

    /// Frames advanced since construction or the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frames
    }

    /// Wall-clock frame rate, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Stop simulation time. `advance` returns the same value until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a fixed step per frame. `None` follows the wall clock.
    pub fn set_fixed_step(&mut self, step_ms: Option<u64>) {
        self.fixed_step_ms = step_ms;
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// Back to 0 ms, frame 0, unpaused. Keeps fixed step and time scale.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.last_frame = now;
        self.now_ms = 0;
        self.remainder_ms = 0.0;
        self.delta_ms = 0;
        self.frames = 0;
        self.fps = 0.0;
        self.fps_window_frames = 0;
        self.fps_window_start = now;
        self.paused = false;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = SimClock::new();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_wall_clock_advance() {
        let mut clock = SimClock::new();
        thread::sleep(Duration::from_millis(10));
        let now = clock.advance();
        assert!(now >= 10);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_step() {
        let mut clock = SimClock::fixed(16);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(clock.advance(), 16);
        assert_eq!(clock.advance(), 32);
        assert_eq!(clock.delta_ms(), 16);
    }

    #[test]
    fn test_time_scale_carries_fraction() {
        let mut clock = SimClock::fixed(3);
        clock.set_time_scale(0.5);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 3);
    }

    #[test]
    fn test_pause() {
        let mut clock = SimClock::fixed(16);
        clock.advance();
        clock.pause();
        assert_eq!(clock.advance(), 16);
        assert_eq!(clock.delta_ms(), 0);
        clock.toggle_pause();
        assert_eq!(clock.advance(), 32);
    }

    #[test]
    fn test_negative_scale_clamps() {
        let mut clock = SimClock::new();
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = SimClock::fixed(10);
        clock.advance();
        clock.reset();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.advance(), 10);
    }
}
