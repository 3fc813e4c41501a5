use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::time::Duration;

pub trait Supervisor<MessageType: Message> {}

pub trait Message {
    fn get_info(&self) -> MessageInfo;
}

/// Work counters reported by a single agent, summable over a batch of agents.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub evaluations: usize,
    pub iterations: usize,
    pub backtracks: usize,
    pub loops_removed: usize,
    pub cpu_time: Duration,
}

impl MessageInfo {
    pub fn new(
        evaluations: usize,
        iterations: usize,
        backtracks: usize,
        loops_removed: usize,
        cpu_time: Duration,
    ) -> Self {
        Self {
            evaluations,
            iterations,
            backtracks,
            loops_removed,
            cpu_time,
        }
    }
}

impl Add for MessageInfo {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            evaluations: self.evaluations + other.evaluations,
            iterations: self.iterations + other.iterations,
            backtracks: self.backtracks + other.backtracks,
            loops_removed: self.loops_removed + other.loops_removed,
            cpu_time: self.cpu_time + other.cpu_time,
        }
    }
}

impl AddAssign for MessageInfo {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
