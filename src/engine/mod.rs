//! Generation engine module
//!
//! Runs a whole pass in memory and returns a [`Plan`] of file writes.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Generator` - Runs the boolean and aggregate passes
//! - `Plan` - Changed files plus a serializable pass report
//! - `AggregateTargets` - The files the aggregate pass works on
//!
//! Nothing here touches the filesystem: callers hand in file contents and
//! decide what to do with the plan. A file appears in a plan only when its
//! rendered content differs from what was read, so running a pass on its
//! own output plans no writes.

mod types;
mod workspace;

pub use types::{
    AggregateReport, AggregateTargets, BooleanReport, FileWrite, MatchSummary, Plan,
};

use crate::classify::{Classified, Sourced};
use crate::config::GeneratorConfig;
use crate::document::DataConnectorLinkDef;
use crate::error::{Error, Result};
use crate::loader::{parse_project, ParseFailure, ProjectFiles};
use crate::matcher::match_object_types;
use crate::merge::{
    append_documents, ensure_graphql_aggregate_section, patch_model_aggregates,
    patch_model_filter, strip_and_append, strip_kinds, ModelPatch, SectionOutcome,
};
use crate::synth::{
    missing_scalars, synthesize_aggregate, synthesize_boolean, RepresentationTable,
    SynthesisInput,
};
use crate::types::{DocumentKind, Pass};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use workspace::Workspace;

/// Runs generation passes with one configuration
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // ========================================================================
    // Boolean pass
    // ========================================================================

    /// Generate boolean expressions for a project.
    ///
    /// `files` holds every project file. `output_file` receives the
    /// generated `BooleanExpressionType`s; it may or may not be among
    /// `files`. Legacy documents are stripped and models are pointed at
    /// their filter expression in files with a rewrite extension.
    pub fn boolean(&self, files: &ProjectFiles, output_file: &Path) -> Result<Plan<BooleanReport>> {
        let parsed = parse_project(files);
        if parsed.failures.iter().any(|f| f.path == output_file) {
            return Err(Error::invalid_document(
                "BooleanExpressionType",
                format!(
                    "output file {} failed to parse, refusing to overwrite it",
                    output_file.display()
                ),
            ));
        }

        let mut report = BooleanReport {
            files: parsed.streams.len(),
            parse_failures: parsed.failures,
            ..BooleanReport::default()
        };

        let mut workspace = Workspace::new();
        for (path, stream) in parsed.streams {
            let original = files.get(&path).cloned();
            workspace.insert(&path, original, stream);
        }
        workspace.open(output_file, None)?;

        let classified = Classified::from_streams(workspace.streams());
        tracing::debug!("Classified {} documents", classified.total());
        let outcome = match_object_types(&classified.object_types, &classified.links);
        report.matching = MatchSummary::from(&outcome);
        let representations = RepresentationTable::from_sourced(&classified.representations);

        let synthesis = synthesize_boolean(&SynthesisInput {
            matched: &outcome.table,
            representations: &representations,
            links: &classified.links,
            subgraph: classified.subgraph.as_deref(),
            config: &self.config,
        })?;
        report.scalar_expressions = synthesis.scalars.len();
        report.object_expressions = synthesis.objects.len();

        // Legacy cleanup first, so every model patch sees every removed name
        let legacy = self.config.legacy_document_kinds();
        let mut removed = HashSet::new();
        for (path, stream) in workspace.streams_mut() {
            if !self.rewritable(path) {
                continue;
            }
            let names = strip_kinds(stream, &legacy);
            if !names.is_empty() {
                tracing::info!(
                    "Removed {} legacy documents from {}",
                    names.len(),
                    path.display()
                );
            }
            removed.extend(names.iter().filter(|n| !n.is_empty()).cloned());
            report.legacy_removed.extend(names);
        }

        let filters: BTreeMap<String, String> = synthesis
            .objects
            .iter()
            .map(|e| (e.operand.clone(), e.name.clone()))
            .collect();
        let mut models = ModelPatch::default();
        for (path, stream) in workspace.streams_mut() {
            if self.rewritable(path) {
                models.merge(patch_model_filter(stream, &filters, &removed));
            }
        }
        report.models = models;

        if let Some(output) = workspace.stream_mut(output_file) {
            report.output = strip_and_append(
                output,
                &[Pass::Boolean.output_kind()],
                synthesis.documents().cloned(),
            );
        }
        report.synthesis = synthesis.report;

        let writes = workspace.into_writes()?;
        tracing::info!(
            "Boolean pass: {} expressions, {} files to write",
            report.scalar_expressions + report.object_expressions,
            writes.len()
        );
        Ok(Plan {
            pass: Pass::Boolean,
            writes,
            report,
        })
    }

    fn rewritable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.config.rewrites_extension(e))
    }

    // ========================================================================
    // Aggregate pass
    // ========================================================================

    /// Generate aggregate expressions.
    ///
    /// `files` holds the content of every target that exists. The link
    /// file, the model files and the GraphQL config must be present; the
    /// types and output files are created when missing. A model file that
    /// fails to parse is skipped.
    pub fn aggregate(
        &self,
        targets: &AggregateTargets,
        files: &ProjectFiles,
    ) -> Result<Plan<AggregateReport>> {
        let mut workspace = Workspace::new();
        let mut parse_failures = Vec::new();

        workspace.open(&targets.link_file, Some(required(files, &targets.link_file)?))?;
        let links: Vec<Sourced<DataConnectorLinkDef>> = workspace
            .stream(&targets.link_file)
            .map(|stream| Classified::from_streams([(targets.link_file.as_path(), stream)]).links)
            .unwrap_or_default();
        if links.is_empty() {
            return Err(Error::missing_link(&targets.link_file));
        }

        for path in &targets.model_files {
            if let Err(e) = workspace.open(path, Some(required(files, path)?)) {
                tracing::error!("{}", e);
                parse_failures.push(ParseFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
        workspace.open(&targets.types_file, optional(files, &targets.types_file))?;
        workspace.open(&targets.output_file, optional(files, &targets.output_file))?;
        workspace.open(
            &targets.graphql_config,
            Some(required(files, &targets.graphql_config)?),
        )?;

        let classified = Classified::from_streams(
            workspace
                .streams()
                .filter(|(path, _)| *path != targets.output_file.as_path()),
        );
        let mut representations = RepresentationTable::from_sourced(&classified.representations);

        // Undeclared connector scalars go to the types file first
        let mut declared: Vec<String> = classified
            .scalar_type_names()
            .map(str::to_string)
            .collect();
        let mut generated_types = Vec::new();
        let mut representations_added = 0;
        for link in &links {
            let missing = missing_scalars(
                &link.item,
                declared.iter().map(String::as_str),
                &representations,
                &self.config,
            )?;
            declared.extend(
                missing
                    .documents
                    .iter()
                    .filter_map(|d| d.name())
                    .map(str::to_string),
            );
            representations_added += missing.representations.len();
            for representation in missing.representations {
                representations.push(representation);
            }
            generated_types.extend(missing.documents);
        }
        let scalar_types_added = generated_types
            .iter()
            .filter(|d| *d.kind() == DocumentKind::ScalarType)
            .count();
        if let Some(types) = workspace.stream_mut(&targets.types_file) {
            append_documents(types, generated_types);
        }

        let object_types: Vec<_> = classified
            .object_types
            .iter()
            .filter(|o| targets.model_files.contains(&o.source))
            .cloned()
            .collect();
        let outcome = match_object_types(&object_types, &links);
        let synthesis = synthesize_aggregate(&SynthesisInput {
            matched: &outcome.table,
            representations: &representations,
            links: &links,
            subgraph: classified.subgraph.as_deref(),
            config: &self.config,
        })?;

        let output = workspace
            .stream_mut(&targets.output_file)
            .map(|stream| {
                strip_and_append(
                    stream,
                    &[Pass::Aggregate.output_kind()],
                    synthesis.documents().cloned(),
                )
            })
            .unwrap_or_default();

        let expressions: BTreeMap<String, String> = synthesis
            .objects
            .iter()
            .map(|e| (e.operand.clone(), e.name.clone()))
            .collect();
        let mut models = ModelPatch::default();
        for path in &targets.model_files {
            if let Some(stream) = workspace.stream_mut(path) {
                models.merge(patch_model_aggregates(stream, &expressions));
            }
        }

        let graphql_config = workspace
            .stream_mut(&targets.graphql_config)
            .map_or(SectionOutcome::NotFound, |stream| {
                ensure_graphql_aggregate_section(stream, &self.config.graphql_aggregate)
            });

        let report = AggregateReport {
            parse_failures,
            matching: MatchSummary::from(&outcome),
            scalar_types_added,
            representations_added,
            scalar_expressions: synthesis.scalars.len(),
            object_expressions: synthesis.objects.len(),
            synthesis: synthesis.report,
            output,
            models,
            graphql_config,
        };

        let writes = workspace.into_writes()?;
        tracing::info!(
            "Aggregate pass: {} expressions, {} files to write",
            report.scalar_expressions + report.object_expressions,
            writes.len()
        );
        Ok(Plan {
            pass: Pass::Aggregate,
            writes,
            report,
        })
    }
}

fn required<'a>(files: &'a ProjectFiles, path: &Path) -> Result<&'a str> {
    files
        .get(path)
        .map(String::as_str)
        .ok_or_else(|| Error::file_not_found(path.display().to_string()))
}

fn optional<'a>(files: &'a ProjectFiles, path: &Path) -> Option<&'a str> {
    files.get(path).map(String::as_str)
}
