// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl queue ("frontier") for one crawl job.
//
// How it works:
// - Two tiers: priority URLs (likely contact pages) and normal URLs
// - pop() always drains the priority tier first
// - Priority URLs go to the FRONT of their tier, normal URLs to the BACK
// - A URL can be queued at most once per job (the `queued` set)
// - A URL is marked visited when it is popped, before it is fetched
//
// Because the two tiers are separate deques, "priority before normal" holds
// no matter how the queue is drained.
//
// Rust concepts:
// - VecDeque: push/pop at both ends in O(1)
// - HashSet::insert returns false if the value was already present
// =============================================================================

use std::collections::{HashSet, VecDeque};

// A queued page: canonical URL plus its priority flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub url: String,
    pub priority: bool,
}

#[derive(Debug, Default)]
pub struct CrawlQueue {
    priority: VecDeque<QueueEntry>,
    normal: VecDeque<QueueEntry>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a canonical URL to the queue
    //
    // Returns: true if it was added, false if it was already queued
    // (or visited) earlier in this job
    pub fn push(&mut self, url: String, priority: bool) -> bool {
        if self.visited.contains(&url) || !self.queued.insert(url.clone()) {
            return false;
        }

        let entry = QueueEntry { url, priority };
        if priority {
            self.priority.push_front(entry);
        } else {
            self.normal.push_back(entry);
        }
        true
    }

    // Takes the next URL to fetch and marks it visited
    //
    // Entries that were visited in the meantime are skipped.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        loop {
            let entry = self
                .priority
                .pop_front()
                .or_else(|| self.normal.pop_front())?;

            if self.visited.insert(entry.url.clone()) {
                return Some(entry);
            }
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.normal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut CrawlQueue) -> Vec<String> {
        std::iter::from_fn(|| queue.pop()).map(|e| e.url).collect()
    }

    #[test]
    fn test_priority_before_normal() {
        let mut queue = CrawlQueue::new();
        queue.push("/blog".to_string(), false);
        queue.push("/contact".to_string(), true);
        queue.push("/about".to_string(), false);

        assert_eq!(drain(&mut queue), vec!["/contact", "/blog", "/about"]);
    }

    #[test]
    fn test_priority_tier_is_front_inserted() {
        let mut queue = CrawlQueue::new();
        queue.push("/contact".to_string(), true);
        queue.push("/support".to_string(), true);

        assert_eq!(drain(&mut queue), vec!["/support", "/contact"]);
    }

    #[test]
    fn test_push_is_insert_once() {
        let mut queue = CrawlQueue::new();
        assert!(queue.push("/a".to_string(), false));
        assert!(!queue.push("/a".to_string(), true));

        assert_eq!(drain(&mut queue), vec!["/a"]);
        assert!(!queue.push("/a".to_string(), false));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_marks_visited() {
        let mut queue = CrawlQueue::new();
        queue.push("/a".to_string(), false);
        assert!(!queue.is_visited("/a"));

        let entry = queue.pop().unwrap();
        assert_eq!(entry.url, "/a");
        assert!(queue.is_visited("/a"));
        assert_eq!(queue.visited_count(), 1);
        assert!(queue.pop().is_none());
    }
}
