//! Earliest-deadline-first queue.
//!
//! Jobs are kept in a min-heap keyed by `(deadline, job id)`, so the job with
//! the nearest deadline runs next and equal deadlines fall back to arrival
//! order. A job without a deadline sorts after every job that has one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::queueing::{Job, JobId};
use crate::sim::SimTime;

use super::PendingQueue;

#[derive(Debug, Default)]
pub struct EdfQueue {
    heap: BinaryHeap<Reverse<(SimTime, JobId)>>,
}

impl EdfQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline of the job that would be dequeued next.
    pub fn earliest_deadline(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }
}

impl PendingQueue for EdfQueue {
    fn enqueue(&mut self, job: &Job) {
        let deadline = job.deadline.unwrap_or(SimTime::INFINITY);
        self.heap.push(Reverse((deadline, job.id)));
    }

    fn dequeue(&mut self) -> Option<JobId> {
        self.heap.pop().map(|Reverse((_, id))| id)
    }

    fn peek(&self) -> Option<JobId> {
        self.heap.peek().map(|Reverse((_, id))| *id)
    }

    fn ids(&self) -> Vec<JobId> {
        self.heap.iter().map(|Reverse((_, id))| *id).collect()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
