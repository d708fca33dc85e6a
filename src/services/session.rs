use std::collections::{HashMap, VecDeque};

/// Default number of users whose last reply is remembered
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

/// Last reply handle per user, so an edited `run` can rewrite it in place.
///
/// Recording overwrites; there is no removal. Once more than `capacity`
/// users are tracked, the user recorded least recently is evicted.
pub struct SessionTracker<H> {
    entries: HashMap<u64, (H, u64)>,
    /// (user_id, generation) in recording order; stale generations are skipped on eviction
    order: VecDeque<(u64, u64)>,
    generation: u64,
    capacity: usize,
}

impl<H> SessionTracker<H> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            generation: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, user_id: u64, handle: H) {
        self.generation += 1;
        self.entries.insert(user_id, (handle, self.generation));
        self.order.push_back((user_id, self.generation));

        while self.entries.len() > self.capacity {
            let Some((old_user, old_gen)) = self.order.pop_front() else { break };
            if self.entries.get(&old_user).is_some_and(|(_, g)| *g == old_gen) {
                self.entries.remove(&old_user);
            }
        }

        // Overwrites leave stale queue entries behind; compact once they dominate
        if self.order.len() > self.capacity * 2 {
            let entries = &self.entries;
            self.order.retain(|(u, g)| entries.get(u).is_some_and(|(_, cur)| cur == g));
        }
    }

    pub fn lookup(&self, user_id: u64) -> Option<&H> {
        self.entries.get(&user_id).map(|(h, _)| h)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for SessionTracker<H> {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing() {
        let tracker: SessionTracker<&str> = SessionTracker::default();
        assert_eq!(tracker.lookup(1), None);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut tracker = SessionTracker::default();
        tracker.record(1, "A");
        tracker.record(1, "B");
        assert_eq!(tracker.lookup(1), Some(&"B"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_users_are_independent() {
        let mut tracker = SessionTracker::default();
        tracker.record(1, "A");
        tracker.record(2, "B");
        assert_eq!(tracker.lookup(1), Some(&"A"));
        assert_eq!(tracker.lookup(2), Some(&"B"));
    }

    #[test]
    fn test_evicts_least_recently_recorded() {
        let mut tracker = SessionTracker::new(2);
        tracker.record(1, "A");
        tracker.record(2, "B");
        tracker.record(1, "A2");
        tracker.record(3, "C");
        assert_eq!(tracker.lookup(2), None);
        assert_eq!(tracker.lookup(1), Some(&"A2"));
        assert_eq!(tracker.lookup(3), Some(&"C"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_repeated_overwrites_stay_bounded() {
        let mut tracker = SessionTracker::new(3);
        for i in 0..100 {
            tracker.record(7, i);
        }
        assert_eq!(tracker.lookup(7), Some(&99));
        assert!(tracker.order.len() <= 6);
    }
}
