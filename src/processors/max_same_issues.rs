use super::Processor;
use crate::core::Issue;
use crate::errors::Result;
use std::collections::{BTreeMap, HashMap};

/// Limits how many issues with identical text are reported. A limit of 0
/// disables the stage.
pub struct MaxSameIssues {
    limit: usize,
    counts: HashMap<String, usize>,
}

impl MaxSameIssues {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            counts: HashMap::new(),
        }
    }

    /// Texts that went over the limit and how many issues each had in total.
    pub fn hidden(&self) -> BTreeMap<&str, usize> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > self.limit)
            .map(|(text, &count)| (text.as_str(), count))
            .collect()
    }
}

impl Processor for MaxSameIssues {
    fn name(&self) -> &str {
        "max_same_issues"
    }

    fn process(&mut self, issues: &[Issue]) -> Result<Vec<Issue>> {
        if self.limit == 0 {
            return Ok(issues.to_vec());
        }
        let mut out = Vec::with_capacity(issues.len());
        for issue in issues {
            let count = self.counts.entry(issue.text.clone()).or_default();
            *count += 1;
            if *count <= self.limit {
                out.push(issue.clone());
            }
        }
        Ok(out)
    }

    fn finish(&mut self) {
        for (text, count) in self.hidden() {
            log::info!(
                "{}/{} issues with text {:?} were hidden, use issues.max_same_issues to see them",
                count - self.limit,
                count,
                text
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::test_support::{issue, texts};

    #[test]
    fn test_identical_texts_are_capped() {
        let mut p = MaxSameIssues::new(2);
        let out = p
            .process(&[
                issue("a", "x.rs", 1, "dup"),
                issue("b", "y.rs", 2, "dup"),
                issue("a", "z.rs", 3, "dup"),
                issue("a", "z.rs", 4, "unique"),
            ])
            .unwrap();
        assert_eq!(texts(&out), vec!["dup", "dup", "unique"]);
        assert_eq!(p.hidden(), BTreeMap::from([("dup", 3)]));
    }

    #[test]
    fn test_zero_disables() {
        let mut p = MaxSameIssues::new(0);
        let issues: Vec<_> = (1..=5).map(|l| issue("a", "x.rs", l, "same")).collect();
        assert_eq!(p.process(&issues).unwrap().len(), 5);
    }
}
