use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out one token per navigation. Starting a navigation supersedes
/// every token issued before it.
#[derive(Clone, Default)]
pub struct NavigationTracker {
    latest: Arc<AtomicU64>,
}

/// Passed into a resolution; tells it whether the caller still wants the
/// result.
#[derive(Clone)]
pub struct NavigationToken {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> NavigationToken {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        NavigationToken {
            generation,
            latest: self.latest.clone(),
        }
    }
}

impl NavigationToken {
    /// Token nobody can supersede, for one-shot requests.
    pub fn detached() -> Self {
        NavigationToken {
            generation: 0,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_wins() {
        let tracker = NavigationTracker::new();
        let first = tracker.begin();
        assert!(!first.is_superseded());

        let second = tracker.begin();
        assert!(first.is_superseded());
        assert!(!second.is_superseded());

        let third = tracker.clone().begin();
        assert!(second.is_superseded());
        assert!(!third.is_superseded());
    }

    #[test]
    fn test_detached() {
        let token = NavigationToken::detached();
        assert!(!token.is_superseded());
    }
}
