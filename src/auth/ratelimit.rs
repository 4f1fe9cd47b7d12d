use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config;

/// Counter for the resend endpoint. Behind a trait so a multi-instance
/// deployment can swap in a shared store without touching call sites.
pub trait RateLimitStore: Send + Sync {
    /// Records a hit for `key` and reports whether it is still allowed.
    fn hit(&self, key: &str) -> bool;
}

struct Entry {
    count: u32,
    window_start: Instant,
}

pub struct MemoryRateLimiter {
    window: Duration,
    max_requests: u32,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        MemoryRateLimiter {
            window,
            max_requests,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::rate_limit_window(), config::rate_limit_max_requests())
    }

    fn hit_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock().expect("rate limit lock poisoned");
        match entries.get_mut(key) {
            Some(entry) if now.duration_since(entry.window_start) <= self.window => {
                if entry.count >= self.max_requests {
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        count: 1,
                        window_start: now,
                    },
                );
                true
            }
        }
    }
}

impl RateLimitStore for MemoryRateLimiter {
    fn hit(&self, key: &str) -> bool {
        self.hit_at(key, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourth_hit_within_window_is_denied() {
        let limiter = MemoryRateLimiter::new(Duration::from_secs(900), 3);
        let now = Instant::now();
        assert!(limiter.hit_at("a@example.com", now));
        assert!(limiter.hit_at("a@example.com", now));
        assert!(limiter.hit_at("a@example.com", now));
        assert!(!limiter.hit_at("a@example.com", now));
    }

    #[test]
    fn window_elapse_resets_the_counter() {
        let limiter = MemoryRateLimiter::new(Duration::from_secs(900), 3);
        let now = Instant::now();
        for _ in 0..3 {
            assert!(limiter.hit_at("a@example.com", now));
        }
        assert!(!limiter.hit_at("a@example.com", now));

        let later = now + Duration::from_secs(901);
        assert!(limiter.hit_at("a@example.com", later));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let limiter = MemoryRateLimiter::new(Duration::from_secs(900), 3);
        let now = Instant::now();
        for _ in 0..3 {
            assert!(limiter.hit_at("a@example.com", now));
        }
        assert!(!limiter.hit_at("a@example.com", now));
        assert!(limiter.hit_at("b@example.com", now));
    }
}
