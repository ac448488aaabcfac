//! Wall-clock tracking of named stages.
//!
//! A `Stopwatch` is owned by exactly one run. Time spent in a stage with the
//! same name is accumulated into the record created by its first use, so
//! records stay in first-seen order.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub name: String,
    pub duration: Duration,
}

#[derive(Debug)]
pub struct Stopwatch {
    name: String,
    started_at: Instant,
    stages: Vec<StageRecord>,
}

impl Stopwatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Instant::now(),
            stages: Vec::new(),
        }
    }

    /// Run `f`, charging its duration to the stage `name`.
    pub fn track_stage<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.add(name, start.elapsed());
        result
    }

    fn add(&mut self, name: &str, elapsed: Duration) {
        match self.stages.iter_mut().find(|s| s.name == name) {
            Some(record) => record.duration += elapsed,
            None => self.stages.push(StageRecord {
                name: name.to_string(),
                duration: elapsed,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Stages formatted slowest first, e.g. `nolint: 3ms, exclude: 1ms`.
    pub fn summary(&self) -> String {
        let mut sorted: Vec<&StageRecord> = self.stages.iter().collect();
        sorted.sort_by(|a, b| b.duration.cmp(&a.duration).then(a.name.cmp(&b.name)));
        sorted
            .iter()
            .map(|s| format!("{}: {:?}", s.name, s.duration))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn print(&self) {
        log::info!("{} took {:?}", self.name, self.elapsed());
    }

    pub fn print_stages(&self) {
        if self.stages.is_empty() {
            return;
        }
        log::info!(
            "{} took {:?} with stages: {}",
            self.name,
            self.elapsed(),
            self.summary()
        );
    }

    pub fn into_records(self) -> Vec<StageRecord> {
        self.stages
    }
}
