//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use revfeat_core::{
    Consolidator, CorrelationEngine, CorrelationMethod, RevfeatConfig, RunDirectory,
    TransformRegistry,
};

#[derive(Debug, Parser)]
#[command(name = "revfeat", version, about = "Consolidate review features and correlate them with gold labels")]
pub struct Cli {
    /// Configuration file (TOML, or JSON by extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge every feature type's raw records into final_features.json
    Consolidate {
        /// Run directory holding <feature_type>_features.json files
        #[arg(short = 'd', long)]
        run_directory: PathBuf,

        /// Feature types to merge, in order (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        feature_types: Vec<String>,
    },

    /// Correlate consolidated features with a gold annotation field
    Correlate {
        /// Run directory holding final_features.json
        #[arg(short = 'd', long)]
        run_directory: PathBuf,

        /// Adjudicated annotation file
        #[arg(short = 'a', long)]
        adjudicated_annotation_file: PathBuf,

        /// Field of the gold annotation to correlate with
        #[arg(short = 'c', long)]
        correlation_field: String,

        /// Correlation statistic: pearson or spearman
        #[arg(long)]
        method: Option<CorrelationMethod>,

        /// Fail if labelled reviews do not share one feature schema
        #[arg(long)]
        strict_schema: bool,

        /// Number of strongest correlations to print
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// List registered feature types in default processing order
    FeatureTypes,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => RevfeatConfig::load(path)?,
            None => RevfeatConfig::default(),
        };

        match self.command {
            Command::Consolidate {
                run_directory,
                feature_types,
            } => {
                if !feature_types.is_empty() {
                    config.consolidate.feature_types = feature_types;
                }
                config.validate()?;

                let registry = TransformRegistry::with_builtins(&config.transform);
                let run = RunDirectory::open(run_directory)?;
                let (_, path) = Consolidator::new(&registry)
                    .consolidate(&run, &config.consolidate.feature_types)?;

                println!("{}", path.display());
            }

            Command::Correlate {
                run_directory,
                adjudicated_annotation_file,
                correlation_field,
                method,
                strict_schema,
                top,
            } => {
                if let Some(method) = method {
                    config.correlate.method = method;
                }
                config.correlate.strict_schema |= strict_schema;

                let run = RunDirectory::open(run_directory)?;
                let engine = CorrelationEngine::new(config.correlate.clone());
                let (table, path) =
                    engine.run(&run, &adjudicated_annotation_file, &correlation_field)?;

                println!("{}", path.display());
                for (feature, r, p) in table.ranked().into_iter().take(top) {
                    println!("{feature:<32} r={r:>8.4}  p={p:.3e}");
                }
                let undefined = table.undefined();
                if !undefined.is_empty() {
                    println!("undefined (zero variance): {}", undefined.join(", "));
                }
            }

            Command::FeatureTypes => {
                let registry = TransformRegistry::with_builtins(&config.transform);
                for transform in registry.iter() {
                    println!("{:<12} {}", transform.feature_type(), transform.description());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_correlate() {
        let cli = Cli::try_parse_from([
            "revfeat", "correlate", "-d", "run", "-a", "gold.json", "-c", "quality", "--method",
            "spearman",
        ])
        .unwrap();

        match cli.command {
            Command::Correlate {
                correlation_field,
                method,
                top,
                ..
            } => {
                assert_eq!(correlation_field, "quality");
                assert_eq!(method, Some(CorrelationMethod::Spearman));
                assert_eq!(top, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_feature_type_list() {
        let cli = Cli::try_parse_from([
            "revfeat",
            "consolidate",
            "-d",
            "run",
            "--feature-types",
            "argument,aspect",
        ])
        .unwrap();

        match cli.command {
            Command::Consolidate { feature_types, .. } => {
                assert_eq!(feature_types, vec!["argument", "aspect"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = Cli::try_parse_from([
            "revfeat", "correlate", "-d", "run", "-a", "gold.json", "-c", "quality", "--method",
            "kendall",
        ]);
        assert!(result.is_err());
    }
}
