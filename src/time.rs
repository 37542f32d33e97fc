//! Frame timing.
//!
//! The render loop owns a clock and ticks it once per frame. Clocks report in
//! engine units (milliseconds); the field converts them into animation time
//! with its `delta_scale`.
//!
//! ```
//! use neurofield::time::{FrameClock, ManualClock};
//!
//! let mut clock = ManualClock::new(16.0);
//! clock.tick();
//! clock.tick();
//! assert_eq!(clock.delta_ms(), 16.0);
//! assert_eq!(clock.elapsed_ms(), 32.0);
//! assert_eq!(clock.frame(), 2);
//! ```

use std::time::{Duration, Instant};

/// Source of per-frame timing.
pub trait FrameClock {
    /// Advance to the next frame.
    fn tick(&mut self);

    /// Milliseconds between the last two ticks.
    fn delta_ms(&self) -> f32;

    /// Milliseconds since the clock started, excluding paused time.
    fn elapsed_ms(&self) -> f32;

    /// Number of ticks so far.
    fn frame(&self) -> u64;

    /// Whether the clock is stopped. A paused frame must not advance the
    /// animation at all.
    fn is_paused(&self) -> bool {
        false
    }
}

/// Wall-clock timer for interactive rendering.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    elapsed_ms: f32,
    delta_ms: f32,
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Total time spent paused.
    pause_elapsed: Duration,
    /// Fixed delta in milliseconds, overriding the measured one.
    fixed_delta_ms: Option<f32>,
}

impl Time {
    /// Create a timer starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta_ms: None,
        }
    }

    /// Measured frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Stop time. While paused, ticks report a zero delta.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after [`pause`](Self::pause). The paused span is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Report a fixed delta instead of the measured one. `None` restores
    /// real timing.
    pub fn set_fixed_delta_ms(&mut self, delta: Option<f32>) {
        self.fixed_delta_ms = delta;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for Time {
    fn tick(&mut self) {
        let now = Instant::now();

        if self.paused {
            self.delta_ms = 0.0;
            return;
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.delta_ms = self.fixed_delta_ms.unwrap_or(raw_delta);
        self.last_frame = now;

        let running = now.duration_since(self.start).saturating_sub(self.pause_elapsed);
        self.elapsed_ms = running.as_secs_f32() * 1000.0;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    #[inline]
    fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    #[inline]
    fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    #[inline]
    fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Clock that advances by a fixed step per tick.
///
/// Used for headless runs and tests where wall-clock time is irrelevant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    step_ms: f32,
    delta_ms: f32,
    elapsed_ms: f32,
    frame_count: u64,
    paused: bool,
}

impl ManualClock {
    /// Clock stepping `step_ms` milliseconds per tick.
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms: step_ms.max(0.0),
            delta_ms: 0.0,
            elapsed_ms: 0.0,
            frame_count: 0,
            paused: false,
        }
    }

    /// Stop the clock. Ticks report a zero delta and are not counted.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after [`pause`](Self::pause).
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Change the step used by subsequent ticks.
    pub fn set_step_ms(&mut self, step_ms: f32) {
        self.step_ms = step_ms.max(0.0);
    }
}

impl FrameClock for ManualClock {
    fn tick(&mut self) {
        if self.paused {
            self.delta_ms = 0.0;
            return;
        }
        self.delta_ms = self.step_ms;
        self.elapsed_ms += self.step_ms;
        self.frame_count += 1;
    }

    fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    fn frame(&self) -> u64 {
        self.frame_count
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.delta_ms(), 0.0);
    }

    #[test]
    fn test_time_tick_measures_milliseconds() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        time.tick();

        assert!(time.delta_ms() >= 10.0);
        assert!(time.elapsed_ms() >= 10.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new();
        time.tick();
        time.pause();

        let elapsed_before = time.elapsed_ms();
        thread::sleep(Duration::from_millis(10));
        time.tick();

        assert_eq!(time.elapsed_ms(), elapsed_before);
        assert_eq!(time.delta_ms(), 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fixed_delta() {
        let mut time = Time::new();
        time.set_fixed_delta_ms(Some(16.0));
        thread::sleep(Duration::from_millis(30));
        time.tick();
        assert_eq!(time.delta_ms(), 16.0);
    }

    #[test]
    fn test_manual_clock_rejects_negative_step() {
        let mut clock = ManualClock::new(-5.0);
        clock.tick();
        assert_eq!(clock.delta_ms(), 0.0);
        clock.set_step_ms(8.0);
        clock.tick();
        assert_eq!(clock.elapsed_ms(), 8.0);
    }

    #[test]
    fn test_manual_clock_pause() {
        let mut clock = ManualClock::new(16.0);
        clock.tick();
        clock.pause();
        assert!(clock.is_paused());

        for _ in 0..5 {
            clock.tick();
        }
        assert_eq!(clock.delta_ms(), 0.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
        assert_eq!(clock.frame(), 1);

        clock.resume();
        clock.tick();
        assert!(!clock.is_paused());
        assert_eq!(clock.delta_ms(), 16.0);
        assert_eq!(clock.frame(), 2);
    }
}
