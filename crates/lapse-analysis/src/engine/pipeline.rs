//! Per-file parallel pipeline.
//!
//! Phases for `analyze_path`: discover, read + parse (parallel), build the
//! compilation, dispatch every `+=` node to the rule (parallel per file).
//! Failures on individual files are collected, never fatal.

use std::path::Path;
use std::time::Instant;

use lapse_core::config::LapseConfig;
use lapse_core::diagnostics::Finding;
use lapse_core::errors::{AnalysisError, PipelineError, PipelineResult, ScanError};
use lapse_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;

use super::suppression::{PragmaSuppressions, SuppressingSink};
use crate::host::SemanticHost;
use crate::parsers::{CSharpParser, FileId, SourceFile};
use crate::rules::event_leak::{EventLeakAnalyzer, Verdict};
use crate::rules::DiagnosticSink;
use crate::scanner::Scanner;
use crate::semantic::{Compilation, SemanticModel};

pub struct AnalysisPipeline {
    config: LapseConfig,
    analyzer: EventLeakAnalyzer,
    scanner: Scanner,
    parser: CSharpParser,
}

impl AnalysisPipeline {
    pub fn new(config: LapseConfig) -> Self {
        Self {
            analyzer: EventLeakAnalyzer::from_config(&config.analysis),
            scanner: Scanner::new(config.scan.clone()),
            parser: CSharpParser::new(),
            config,
        }
    }

    pub fn config(&self) -> &LapseConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &EventLeakAnalyzer {
        &self.analyzer
    }

    /// Run the rule over every file of `compilation`. Findings come back
    /// sorted by location; skipped sites are reported as non-fatal errors.
    pub fn analyze_compilation(
        &self,
        compilation: &Compilation,
        cancel: &CancellationToken,
    ) -> PipelineResult<Vec<Finding>> {
        let start = Instant::now();
        if !self.config.analysis.effective_enabled() {
            tracing::info!("event-leak analysis disabled by configuration");
            return PipelineResult::default();
        }

        let (tx, rx) = crossbeam_channel::unbounded::<Finding>();
        let file_ids: Vec<FileId> = compilation.file_ids().collect();
        let outcomes: Vec<Result<Vec<AnalysisError>, PipelineError>> = self.run_parallel(|| {
            file_ids
                .par_iter()
                .map(|&file_id| {
                    if cancel.is_cancelled() {
                        return Err(PipelineError::Cancelled);
                    }
                    Ok(self.analyze_file(compilation, file_id, &tx))
                })
                .collect()
        });
        drop(tx);

        let mut findings: Vec<Finding> = rx.iter().collect();
        findings.sort_by(|a, b| a.location.cmp(&b.location));

        let mut result = PipelineResult::new(findings);
        let mut cancelled = false;
        for outcome in outcomes {
            match outcome {
                Ok(skipped) => skipped.into_iter().for_each(|e| result.add_error(e)),
                Err(PipelineError::Cancelled) => cancelled = true,
                Err(e) => result.add_error(e),
            }
        }
        if cancelled {
            result.add_error(PipelineError::Cancelled);
        }

        tracing::info!(
            files = file_ids.len(),
            findings = result.data.len(),
            skipped = result.error_count(),
            ms = start.elapsed().as_millis() as u64,
            "event-leak analysis complete"
        );
        result
    }

    /// Discover, parse, and analyze every source under `root`.
    ///
    /// Fails only when the root is missing or the run is cancelled; files
    /// that cannot be read or decoded become non-fatal errors.
    pub fn analyze_path(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<PipelineResult<Vec<Finding>>, PipelineError> {
        let scan = self.scanner.scan(root, cancel).map_err(|e| match e {
            ScanError::Cancelled => PipelineError::Cancelled,
            other => other.into(),
        })?;

        let mut errors: Vec<PipelineError> = scan.errors.into_iter().map(PipelineError::from).collect();

        let parsed: Vec<Result<SourceFile, PipelineError>> = self.run_parallel(|| {
            scan.files
                .par_iter()
                .map(|file| {
                    if cancel.is_cancelled() {
                        return Err(PipelineError::Cancelled);
                    }
                    let bytes = std::fs::read(&file.path).map_err(|source| ScanError::IoError {
                        path: file.path.clone(),
                        source,
                    })?;
                    Ok(self.parser.parse_bytes(&bytes, Path::new(&file.relative))?)
                })
                .collect()
        });
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let mut files = Vec::with_capacity(parsed.len());
        for outcome in parsed {
            match outcome {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable source");
                    errors.push(e);
                }
            }
        }

        let compilation = Compilation::new(files);
        let mut result = self.analyze_compilation(&compilation, cancel);
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        errors.append(&mut result.errors);
        result.errors = errors;
        Ok(result)
    }

    /// Walk one file and hand every triggering node to the rule.
    fn analyze_file(
        &self,
        compilation: &Compilation,
        file_id: FileId,
        sink: &dyn DiagnosticSink,
    ) -> Vec<AnalysisError> {
        let Some(file) = compilation.file(file_id) else {
            return Vec::new();
        };
        let registration = self.analyzer.registration();
        if file.is_generated && !registration.analyze_generated_code {
            tracing::debug!(path = %file.path, "generated file, not reported");
            return Vec::new();
        }

        let model = SemanticModel::new(compilation);
        let Some(root) = model.root(file_id) else {
            return Vec::new();
        };
        let suppressions = self
            .config
            .analysis
            .effective_respect_pragmas()
            .then(|| PragmaSuppressions::parse(&file.source))
            .filter(|s| !s.is_empty());
        let sink = SuppressingSink::new(sink, suppressions.as_ref());

        let mut skipped = Vec::new();
        for node in model.descendants(root) {
            if !registration.trigger.matches(&model, node) {
                continue;
            }
            if let Verdict::Skipped(error) = self.analyzer.analyze_node(&model, node, &sink) {
                skipped.push(error);
            }
        }
        skipped
    }

    /// Run `op` on a dedicated pool when `scan.threads` is set, otherwise on
    /// the global rayon pool.
    fn run_parallel<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        let threads = self.config.scan.effective_threads();
        if threads == 0 {
            return op();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(op),
            Err(e) => {
                tracing::warn!(threads, error = %e, "thread pool unavailable, using global pool");
                op()
            }
        }
    }
}
