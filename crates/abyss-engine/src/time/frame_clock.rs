use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f64,

    /// Time elapsed since the clock was created (or last reset), in seconds.
    pub elapsed: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// A snapshot for a frame that took exactly `dt` seconds.
    pub fn fixed(dt: f64, frame_index: u64) -> Self {
        Self {
            dt,
            elapsed: dt * frame_index as f64,
            frame_index,
        }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so that a debugger pause or a stalled present does not
/// turn into one enormous zoom step on the next frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline and the elapsed time.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
        self.frame_index = 0;
    }

    /// Frames ticked since construction or the last `reset`.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
