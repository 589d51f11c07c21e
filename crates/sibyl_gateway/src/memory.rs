//! Bounded recent-query log with ring-buffer semantics: oldest evicted
//! first, retained entries reported in submission order.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct RecentQueries {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentQueries {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, query: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(query.to_string());
    }

    /// Retained queries, oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut memory = RecentQueries::new(5);
        for i in 1..=7 {
            memory.add(&format!("query {}", i));
        }
        assert_eq!(
            memory.recent(),
            vec!["query 3", "query 4", "query 5", "query 6", "query 7"]
        );
    }

    #[test]
    fn test_under_capacity_keeps_all_in_order() {
        let mut memory = RecentQueries::new(5);
        memory.add("a");
        memory.add("b");
        assert_eq!(memory.recent(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut memory = RecentQueries::new(5);
        memory.add("a");
        memory.clear();
        assert!(memory.recent().is_empty());
    }
}
