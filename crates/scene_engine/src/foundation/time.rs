//! Frame timing
//!
//! The camera consumes a per-frame delta time and the debug overlay shows a
//! frames-per-second figure that only refreshes once per second. A
//! [`Stopwatch`] measures individual stages such as a graph walk.

use std::time::{Duration, Instant};

/// Frame timer providing delta time and a once-per-second FPS sample
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    window_elapsed: f32,
    window_frames: u32,
    last_fps: u32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            window_elapsed: 0.0,
            window_frames: 0,
            last_fps: 0,
        }
    }

    /// Advance by the wall-clock time since the previous tick
    ///
    /// Call once per frame. Returns the new delta time in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit duration
    ///
    /// Used by fixed-step hosts and tests that must not depend on the clock.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;

        self.window_elapsed += self.delta_time;
        self.window_frames += 1;
        if self.window_elapsed >= 1.0 {
            self.last_fps = self.window_frames;
            log::trace!("FPS: {}", self.last_fps);
            self.window_elapsed -= 1.0;
            self.window_frames = 0;
        }

        self.delta_time
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames counted during the last complete one-second window
    pub fn fps(&self) -> u32 {
        self.last_fps
    }

    /// Average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Accumulating stopwatch for timing individual frame stages
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// Stopped stopwatch at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Stopwatch that is already running
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start or resume
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Pause, keeping the time measured so far
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Zero the stopwatch and start again
    pub fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    /// Total measured time, including a running interval
    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started.map_or(Duration::ZERO, |started| started.elapsed())
    }

    /// Measured time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Whether the stopwatch is running
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}
