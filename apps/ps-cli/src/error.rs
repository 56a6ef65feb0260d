use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid comparison file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Comparison file lists no controllers")]
    NoControllers,

    #[error(transparent)]
    Grid(#[from] ps_core::CoreError),

    #[error(transparent)]
    Plant(#[from] ps_lti::LtiError),

    #[error(transparent)]
    Sim(#[from] ps_sim::SimError),
}

pub type CliResult<T> = Result<T, CliError>;
