use std::{thread::sleep, time::{Duration, Instant}};

/// Keeps the loop at a fixed frame rate.
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        FrameClock { frame, last: Instant::now() }
    }

    /// Sleeps out whatever is left of the current frame. Returns the time
    /// actually spent in the frame, sleep included.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if let Some(rest) = self.frame.checked_sub(elapsed) {
            sleep(rest);
        }

        let now = Instant::now();
        let spent = now.duration_since(self.last);
        self.last = now;
        spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_waits_for_the_frame() {
        let mut clock = FrameClock::new(Duration::from_millis(20));
        let spent = clock.tick();
        assert!(spent >= Duration::from_millis(20));
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let mut clock = FrameClock::new(Duration::from_millis(50));
        sleep(Duration::from_millis(60));
        let start = Instant::now();
        clock.tick();
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
