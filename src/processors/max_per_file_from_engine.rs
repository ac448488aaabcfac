use super::Processor;
use crate::core::Issue;
use crate::errors::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Caps how many issues one engine may report within a single file.
/// Engines without a configured limit are not capped.
pub struct MaxPerFileFromEngine {
    limits: HashMap<String, usize>,
    counts: HashMap<(String, PathBuf), usize>,
}

impl MaxPerFileFromEngine {
    pub fn new(limits: HashMap<String, usize>) -> Self {
        Self {
            limits,
            counts: HashMap::new(),
        }
    }
}

impl Processor for MaxPerFileFromEngine {
    fn name(&self) -> &str {
        "max_per_file_from_engine"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            let Some(&limit) = self.limits.get(&issue.from_engine) else {
                out.push(issue.clone());
                continue;
            };
            let count = self
                .counts
                .entry((issue.from_engine.clone(), issue.file_path().to_path_buf()))
                .or_default();
            if *count < limit {
                *count += 1;
                out.push(issue.clone());
            }
        }
        Ok(out)
    }

    fn finish(&mut self) {}
}
