//! Runs engines and drives their merged issues through the processor chain.

use crate::config::{default_exclude_patterns, default_skip_dirs, Config};
use crate::context::{AnalysisContext, ExecutionContext};
use crate::core::Issue;
use crate::engine::{run_engine_safe, Engine, EngineFailure};
use crate::errors::Result;
use crate::io::LineCache;
use crate::observability::{StageRecord, Stopwatch};
use crate::processors::{
    AutogeneratedExclude, Diff, DiffSource, Exclude, ExcludeRules, IdentifierMarker,
    LocationNormalizer, MaxFromEngine, MaxPerFileFromEngine, MaxSameIssues, Nolint,
    PathPrettifier, PathShortener, Processor, SkipDirs, SkipFiles, SourceCode, UniqByLine,
};
use std::sync::Arc;

/// Issue counts seen by one stage, accumulated over successful calls only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStat {
    pub in_count: usize,
    pub out_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStat {
    pub name: String,
    pub stat: ProcessorStat,
}

/// What happened during one run, for logging and inspection.
#[derive(Debug, Clone, Default)]
pub struct ProcessingReport {
    /// Per-stage counts in chain order. Stages that failed or never ran
    /// are absent.
    pub stats: Vec<StageStat>,
    /// Time spent per engine, in run order
    pub engine_stages: Vec<StageRecord>,
    /// Time spent per processor, including `finish`
    pub processing_stages: Vec<StageRecord>,
    pub issues_before: usize,
    pub issues_after: usize,
}

impl ProcessingReport {
    pub fn stat(&self, name: &str) -> Option<&ProcessorStat> {
        self.stats.iter().find(|s| s.name == name).map(|s| &s.stat)
    }

    pub fn stat_names(&self) -> Vec<&str> {
        self.stats.iter().map(|s| s.name.as_str()).collect()
    }

    fn record(&mut self, name: &str, in_count: usize, out_count: usize) {
        match self.stats.iter_mut().find(|s| s.name == name) {
            Some(s) => {
                s.stat.in_count += in_count;
                s.stat.out_count += out_count;
            }
            None => self.stats.push(StageStat {
                name: name.to_string(),
                stat: ProcessorStat {
                    in_count,
                    out_count,
                },
            }),
        }
    }

    /// `name: out/in` for every stage that received issues.
    pub fn filtering_summary(&self) -> String {
        self.stats
            .iter()
            .filter(|s| s.stat.in_count != 0)
            .map(|s| format!("{}: {}/{}", s.name, s.stat.out_count, s.stat.in_count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of [`Runner::run`].
#[derive(Debug)]
pub struct RunOutcome {
    /// Issues that survived the chain; empty, never absent.
    pub issues: Vec<Issue>,
    /// Set only when an engine failed and the runner is fail-fast.
    pub error: Option<EngineFailure>,
    pub report: ProcessingReport,
}

pub struct Runner {
    processors: Vec<Box<dyn Processor>>,
    fail_fast: bool,
}

impl Runner {
    /// Build the standard chain from configuration.
    ///
    /// Issue paths are resolved against the line cache's root.
    /// `enabled_engines` is used to judge which suppression directives can
    /// be reported as unused.
    pub fn new(
        config: &Config,
        line_cache: Arc<LineCache>,
        enabled_engines: &[String],
    ) -> Result<Self> {
        let root = line_cache.root().to_path_buf();
        let run = &config.run;
        let issues = &config.issues;

        let mut skip_dirs = run.skip_dirs.clone();
        if run.use_default_skip_dirs {
            skip_dirs.extend(default_skip_dirs());
        }

        let mut excludes = issues.exclude.clone();
        if issues.use_default_excludes {
            excludes.extend(default_exclude_patterns());
        }

        // The order is significant: each stage relies on what the stages
        // before it have established.
        let processors: Vec<Box<dyn Processor>> = vec![
            // Engine-specific paths must be fixed before anything looks at them.
            Box::new(LocationNormalizer::new(
                run.path_mappings.clone(),
                run.build_cache_dirs.clone(),
            )),
            // Everything after this sees root-relative paths.
            Box::new(PathPrettifier::new(&root)),
            Box::new(SkipFiles::new(&run.skip_files)?),
            Box::new(SkipDirs::new(&skip_dirs, &root, &run.args)?),
            Box::new(AutogeneratedExclude::new(Arc::clone(&line_cache))),
            // Marks identifiers so exclude patterns can be written against
            // the marked text.
            Box::new(IdentifierMarker::new()),
            Box::new(Exclude::from_patterns(&excludes)?),
            Box::new(ExcludeRules::from_config(
                &issues.exclude_rules,
                Arc::clone(&line_cache),
            )?),
            Box::new(Nolint::new(
                Arc::clone(&line_cache),
                enabled_engines,
                issues.report_unused_directives,
            )),
            Box::new(UniqByLine::new(config.output.uniq_by_line)),
            Box::new(Diff::new(DiffSource::from_config(issues), &root)),
            Box::new(MaxPerFileFromEngine::new(
                issues.max_per_file_per_engine.clone(),
            )),
            Box::new(MaxSameIssues::new(issues.max_same_issues)),
            Box::new(MaxFromEngine::new(issues.max_issues_per_engine)),
            // Only for issues that will actually be shown.
            Box::new(SourceCode::new(Arc::clone(&line_cache))),
            Box::new(PathShortener::new(&root)),
        ];

        Ok(Self::with_processors(processors, run.fail_fast))
    }

    /// Use an explicit chain instead of the standard one.
    pub fn with_processors(processors: Vec<Box<dyn Processor>>, fail_fast: bool) -> Self {
        Self {
            processors,
            fail_fast,
        }
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Run every engine in order, then process the merged issues.
    ///
    /// A failing engine never stops the others. Its failure is returned
    /// only in fail-fast mode; with several failures the last one wins.
    pub fn run(
        &mut self,
        engines: &[Box<dyn Engine>],
        exec: &ExecutionContext,
        ctx: &AnalysisContext,
    ) -> RunOutcome {
        let mut sw = Stopwatch::new("engines");
        let mut issues = Vec::new();
        let mut error = None;

        for engine in engines {
            let name = engine.name().to_string();
            let result = sw.track_stage(&name, || run_engine_safe(engine.as_ref(), exec, ctx));
            match result {
                Ok(engine_issues) => issues.extend(engine_issues),
                Err(failure) => {
                    log::warn!("Can't run engine {}: {}", name, failure);
                    if self.fail_fast {
                        error = Some(failure);
                    }
                }
            }
        }
        sw.print();

        let mut report = ProcessingReport {
            engine_stages: sw.into_records(),
            ..ProcessingReport::default()
        };
        let issues = self.process_results(issues, &mut report);

        RunOutcome {
            issues,
            error,
            report,
        }
    }

    /// Drive `issues` through the whole chain and finish every stage.
    pub fn process_results(&mut self, issues: Vec<Issue>, report: &mut ProcessingReport) -> Vec<Issue> {
        let mut sw = Stopwatch::new("processing");

        report.issues_before = issues.len();
        let out = if issues.is_empty() {
            issues
        } else {
            self.process_issues(issues, &mut sw, report)
        };
        report.issues_after = out.len();

        for processor in self.processors.iter_mut() {
            let name = processor.name().to_string();
            sw.track_stage(&name, || processor.finish());
        }

        if report.issues_before != report.issues_after {
            log::info!(
                "Issues before processing: {}, after processing: {}",
                report.issues_before,
                report.issues_after
            );
        }
        let summary = report.filtering_summary();
        if !summary.is_empty() {
            log::info!("Processors filtering stat (out/in): {}", summary);
        }
        sw.print_stages();

        report.processing_stages = sw.into_records();
        out
    }

    fn process_issues(
        &mut self,
        mut issues: Vec<Issue>,
        sw: &mut Stopwatch,
        report: &mut ProcessingReport,
    ) -> Vec<Issue> {
        for processor in self.processors.iter_mut() {
            let name = processor.name().to_string();
            let span = tracing::debug_span!("processor", name = %name);
            let _entered = span.enter();

            let result = sw.track_stage(&name, || processor.process(&issues));
            match result {
                Ok(out) => {
                    report.record(&name, issues.len(), out.len());
                    issues = out;
                }
                Err(e) => {
                    log::warn!("Can't process result by {} processor: {}", name, e);
                }
            }
        }
        issues
    }
}
