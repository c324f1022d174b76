//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::GeneratorConfig;
use crate::engine::{AggregateTargets, BooleanReport, Generator, Plan};
use crate::error::{Result, ResultExt};
use crate::loader::{read_file, read_optional, read_project, ProjectFiles};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let generator = Generator::new(self.load_config()?);
        match &self.cli.command {
            Commands::Boolean {
                project_path,
                output_file,
            } => {
                let plan = self.boolean(&generator, project_path, output_file)?;
                self.finish(&plan)
            }
            Commands::Aggregate {
                data_connector_link,
                data_connector_link_types,
                models,
                output_file,
                graphql_config,
            } => {
                let targets = unify_targets(AggregateTargets {
                    link_file: data_connector_link.clone(),
                    types_file: data_connector_link_types.clone(),
                    model_files: models.clone(),
                    output_file: output_file.clone(),
                    graphql_config: graphql_config.clone(),
                });
                let plan = generator.aggregate(&targets, &read_targets(&targets)?)?;
                self.finish(&plan)
            }
        }
    }

    fn load_config(&self) -> Result<GeneratorConfig> {
        match &self.cli.config {
            Some(path) => {
                let config = GeneratorConfig::from_file(path)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(GeneratorConfig::default()),
        }
    }

    fn boolean(
        &self,
        generator: &Generator,
        project_path: &Path,
        output_file: &Path,
    ) -> Result<Plan<BooleanReport>> {
        let mut files = read_project(project_path, generator.config())?;
        tracing::info!(
            "Read {} files from {}",
            files.len(),
            project_path.display()
        );

        let output = match project_key(&files, output_file) {
            Some(key) => key,
            None => {
                if let Some(content) = read_optional(output_file)? {
                    files.insert(output_file.to_path_buf(), content);
                }
                output_file.to_path_buf()
            }
        };
        generator.boolean(&files, &output)
    }

    /// Apply a plan, then print its report
    fn finish<R: Serialize>(&self, plan: &Plan<R>) -> Result<()> {
        for write in &plan.writes {
            let action = if write.created { "create" } else { "update" };
            if self.cli.dry_run {
                tracing::info!("Dry run: would {} {}", action, write.path.display());
                continue;
            }
            if write.created {
                if let Some(parent) = write.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&write.path, &write.content)
                .with_context(|| format!("Failed to write {}", write.path.display()))?;
            tracing::info!("Wrote {}", write.path.display());
        }

        match self.cli.format {
            OutputFormat::Text => {
                if plan.is_noop() {
                    println!("{}: no changes", plan.pass);
                }
                for write in &plan.writes {
                    let action = if write.created { "created" } else { "updated" };
                    let prefix = if self.cli.dry_run { "would be " } else { "" };
                    println!("{}: {}{} {}", plan.pass, prefix, action, write.path.display());
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string(plan)?),
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(plan)?),
        }
        Ok(())
    }
}

/// The project key naming the same file as `path`, if the project read it
fn project_key(files: &ProjectFiles, path: &Path) -> Option<PathBuf> {
    if files.contains_key(path) {
        return Some(path.to_path_buf());
    }
    let target = canonical_path(path)?;
    files
        .keys()
        .find(|key| canonical_path(key).is_some_and(|k| k == target))
        .cloned()
}

/// Absolute form of `path`; a file that does not exist yet resolves
/// through its parent directory
fn canonical_path(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Some(canonical);
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(fs::canonicalize(parent).ok()?.join(path.file_name()?))
}

/// Spell every target naming the same file the same way, so the engine
/// opens and writes each file once
fn unify_targets(targets: AggregateTargets) -> AggregateTargets {
    let mut seen: Vec<(PathBuf, PathBuf)> = Vec::new();
    let mut unify = |path: PathBuf| -> PathBuf {
        let Some(canonical) = canonical_path(&path) else {
            return path;
        };
        if let Some((_, known)) = seen.iter().find(|(c, _)| *c == canonical) {
            return known.clone();
        }
        seen.push((canonical, path.clone()));
        path
    };

    let link_file = unify(targets.link_file);
    let types_file = unify(targets.types_file);
    let mut model_files = Vec::new();
    for path in targets.model_files {
        let path = unify(path);
        if !model_files.contains(&path) {
            model_files.push(path);
        }
    }
    let output_file = unify(targets.output_file);
    let graphql_config = unify(targets.graphql_config);
    AggregateTargets {
        link_file,
        types_file,
        model_files,
        output_file,
        graphql_config,
    }
}

/// Read every aggregate target that exists; the engine checks required ones
fn read_targets(targets: &AggregateTargets) -> Result<ProjectFiles> {
    let mut files = ProjectFiles::new();
    let required = std::iter::once(&targets.link_file)
        .chain(&targets.model_files)
        .chain(std::iter::once(&targets.graphql_config));
    for path in required {
        if !files.contains_key(path) {
            files.insert(path.clone(), read_file(path)?);
        }
    }
    for path in [&targets.types_file, &targets.output_file] {
        if files.contains_key(path) {
            continue;
        }
        if let Some(content) = read_optional(path)? {
            files.insert(path.clone(), content);
        }
    }
    Ok(files)
}
