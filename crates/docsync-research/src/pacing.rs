//! Fixed-interval pacing between calls to one service

use std::time::{Duration, Instant};

/// Spaces consecutive calls at least `interval` apart
///
/// No adaptive backoff: the first call goes out immediately, later calls
/// sleep for whatever is left of the interval.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    /// Search API spacing
    pub const SEARCH: Duration = Duration::from_secs(1);
    /// Source-hosting API spacing
    pub const GITHUB: Duration = Duration::from_millis(500);

    /// Create pacer with `interval`
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Pacer that never sleeps
    #[must_use]
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Block until the next call may go out, then mark it sent
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
