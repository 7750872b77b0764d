//! Frame timing

use std::time::{Duration, Instant};

/// Counts display refreshes and the wall time between them
pub struct FrameTimer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Record one frame (call once per display refresh)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Restart counting from zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Seconds between the last two frames
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Frames recorded since creation or the last reset
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Wall time since creation or the last reset
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average frames per second since creation or the last reset
    pub fn average_fps(&self) -> f32 {
        let total = self.elapsed().as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counting() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.frame_count(), 0);

        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);

        timer.reset();
        assert_eq!(timer.frame_count(), 0);
    }
}
