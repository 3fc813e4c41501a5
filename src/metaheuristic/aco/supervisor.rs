use crate::metaheuristic::aco;
use crate::metaheuristic::supervisor;
use crate::metaheuristic::supervisor::{Message, MessageInfo};

use csv::Writer;
use serde::Serialize;
use std::io::{sink, Sink, Write};
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

/// Summary of one generation. Route statistics are `None` if no ant completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub ants: usize,
    pub completed: usize,
    pub shortest: Option<usize>,
    pub average: Option<f64>,
    pub longest: Option<usize>,
    pub best: Option<usize>,
    pub evaluations: usize,
    pub backtracks: usize,
    pub loops_removed: usize,
    pub cpu_time_ms: f64,
}

/// Collects the reports of all ants of a generation and writes one CSV row per generation.
pub struct Supervisor<W: Write> {
    sender: Sender<aco::Message>,
    receiver: Receiver<aco::Message>,
    ants: usize,
    writer: Writer<W>,
}

impl<W: Write> Supervisor<W> {
    pub fn new(writer: Writer<W>) -> Self {
        let (tx, rx) = mpsc::channel();
        Supervisor {
            sender: tx,
            receiver: rx,
            ants: 0,
            writer,
        }
    }

    pub fn new_ant(&mut self) -> (Sender<aco::Message>, usize) {
        self.ants += 1;
        let id = self.ants;

        (self.sender.clone(), id)
    }

    /// Drains every report received so far. Must only be called once all ants of
    /// the generation finished, reports may arrive in any order.
    pub fn aggregate_receive(&mut self, generation: usize, best: Option<usize>) -> GenerationStats {
        let messages: Vec<aco::Message> = self.receiver.try_iter().collect();

        let mut info = MessageInfo::default();
        for message in messages.iter() {
            info += message.get_info();
        }

        let lengths: Vec<usize> = messages
            .iter()
            .filter(|message| message.done)
            .map(|message| message.route_length)
            .collect();
        let average = if lengths.is_empty() {
            None
        } else {
            Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
        };

        GenerationStats {
            generation,
            ants: messages.len(),
            completed: lengths.len(),
            shortest: lengths.iter().min().copied(),
            average,
            longest: lengths.iter().max().copied(),
            best,
            evaluations: info.evaluations,
            backtracks: info.backtracks,
            loops_removed: info.loops_removed,
            cpu_time_ms: info.cpu_time.as_secs_f64() * 1000.0,
        }
    }

    pub fn write_stats(&mut self, stats: &GenerationStats) -> Result<(), csv::Error> {
        self.writer.serialize(stats)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.ants = 0;
        let (tx, rx) = mpsc::channel();
        self.sender = tx;
        self.receiver = rx;
    }

    pub fn into_inner(self) -> Result<W, String> {
        self.writer.into_inner().map_err(|e| e.to_string())
    }
}

impl<W: Write> supervisor::Supervisor<aco::Message> for Supervisor<W> {}

impl Default for Supervisor<Sink> {
    fn default() -> Self {
        Supervisor::new(Writer::from_writer(sink()))
    }
}
