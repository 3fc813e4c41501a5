use crate::metaheuristic::supervisor;
use crate::metaheuristic::supervisor::MessageInfo;

use std::time::Duration;

/// Report an ant sends to the supervisor once its walk is over.
#[derive(Debug, Clone)]
pub struct Message {
    pub ant_id: usize,
    pub generation: usize,
    pub route_length: usize,
    pub done: bool,
    pub evaluations: usize,
    pub iterations: usize,
    pub backtracks: usize,
    pub loops_removed: usize,
    pub cpu_time: Duration,
}

impl Message {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ant_id: usize,
        generation: usize,
        route_length: usize,
        done: bool,
        evaluations: usize,
        iterations: usize,
        backtracks: usize,
        loops_removed: usize,
        cpu_time: Duration,
    ) -> Self {
        Self {
            ant_id,
            generation,
            route_length,
            done,
            evaluations,
            iterations,
            backtracks,
            loops_removed,
            cpu_time,
        }
    }
}

impl supervisor::Message for Message {
    fn get_info(&self) -> MessageInfo {
        MessageInfo::new(
            self.evaluations,
            self.iterations,
            self.backtracks,
            self.loops_removed,
            self.cpu_time,
        )
    }
}
