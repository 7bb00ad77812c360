use tokio::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Fixed-window limit on ICE candidates accepted from one connection.
#[derive(Debug)]
pub struct CandidateThrottle {
    limit: u32,
    window_start: Instant,
    count: u32,
}

impl CandidateThrottle {
    /// `limit == 0` disables throttling.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            window_start: Instant::now(),
            count: 0,
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        if self.limit == 0 {
            return true;
        }

        let now = Instant::now();
        if now.duration_since(self.window_start) >= WINDOW {
            self.window_start = now;
            self.count = 0;
        }

        if self.count >= self.limit {
            return false;
        }

        self.count += 1;
        true
    }
}
