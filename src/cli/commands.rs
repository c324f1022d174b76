//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate boolean and aggregate expressions for HML metadata
#[derive(Parser, Debug)]
#[command(name = "hml-expressions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generator configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log planned writes without touching any file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Report format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate BooleanExpressionTypes for every matched type in a project
    Boolean {
        /// Project root to scan for metadata files
        #[arg(long)]
        project_path: PathBuf,

        /// File receiving the generated expressions
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Generate AggregateExpressions and wire them into models
    Aggregate {
        /// File holding the DataConnectorLink
        #[arg(long)]
        data_connector_link: PathBuf,

        /// File receiving missing ScalarTypes and representations
        #[arg(long)]
        data_connector_link_types: PathBuf,

        /// Model files (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        models: Vec<PathBuf>,

        /// File receiving the generated expressions
        #[arg(long)]
        output_file: PathBuf,

        /// File holding the GraphqlConfig
        #[arg(long)]
        graphql_config: PathBuf,
    },
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One summary line per planned write
    Text,
    /// JSON report on one line
    Json,
    /// Indented JSON report
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_boolean() {
        let cli = Cli::parse_from([
            "hml-expressions",
            "--dry-run",
            "boolean",
            "--project-path",
            "app",
            "--output-file",
            "app/metadata/boolean-expressions.hml",
        ]);
        assert!(cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Text);
        match cli.command {
            Commands::Boolean {
                project_path,
                output_file,
            } => {
                assert_eq!(project_path, PathBuf::from("app"));
                assert_eq!(
                    output_file,
                    PathBuf::from("app/metadata/boolean-expressions.hml")
                );
            }
            other => panic!("Expected boolean command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_aggregate_models_list() {
        let cli = Cli::parse_from([
            "hml-expressions",
            "aggregate",
            "--data-connector-link",
            "chinook.hml",
            "--data-connector-link-types",
            "chinook-types.hml",
            "--models",
            "albums.hml,tracks.hml",
            "--output-file",
            "aggregates.hml",
            "--graphql-config",
            "graphql-config.hml",
            "-v",
            "--format",
            "json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Aggregate { models, .. } => assert_eq!(
                models,
                vec![PathBuf::from("albums.hml"), PathBuf::from("tracks.hml")]
            ),
            other => panic!("Expected aggregate command, got {other:?}"),
        }
    }
}
