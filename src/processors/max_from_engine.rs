use super::Processor;
use crate::core::Issue;
use crate::errors::Result;
use std::collections::{BTreeMap, HashMap};

/// Keeps the first N issues of every engine. A limit of 0 disables the
/// stage.
pub struct MaxFromEngine {
    limit: usize,
    counts: HashMap<String, usize>,
}

impl MaxFromEngine {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            counts: HashMap::new(),
        }
    }

    /// Engines that went over the limit and their total issue counts.
    pub fn hidden(&self) -> BTreeMap<&str, usize> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > self.limit)
            .map(|(engine, &count)| (engine.as_str(), count))
            .collect()
    }
}

impl Processor for MaxFromEngine {
    fn name(&self) -> &str {
        "max_from_engine"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.limit == 0 {
            return Ok(issues.to_vec());
        }
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            let count = self.counts.entry(issue.from_engine.clone()).or_default();
            *count += 1;
            if *count <= self.limit {
                out.push(issue.clone());
            }
        }
        Ok(out)
    }

    fn finish(&mut self) {
        for (engine, count) in self.hidden() {
            log::info!(
                "{}/{} issues from engine {} were hidden, use issues.max_issues_per_engine to see them",
                count - self.limit,
                count,
                engine
            );
        }
    }
}
