use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use starbase_utils::fs::FsError;
use starbase_utils::yaml::YamlError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunManifestError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Yaml(#[from] Box<YamlError>),

    #[diagnostic(
        code(prebun::manifest::missing),
        help = "Is the path pointing at a JavaScript action?"
    )]
    #[error(
        "No {} or {} found in {} or any parent directory.",
        "action.yml".style(Style::File),
        "action.yaml".style(Style::File),
        .root.style(Style::Path),
    )]
    NotFound { root: PathBuf },

    #[diagnostic(code(prebun::manifest::malformed))]
    #[error("Action {} is not a valid YAML mapping.", .path.style(Style::Path))]
    Malformed {
        path: PathBuf,
        #[source]
        error: Box<YamlError>,
    },

    #[diagnostic(code(prebun::manifest::missing_runs))]
    #[error("No {} in action.", "runs".style(Style::Property))]
    MissingRuns,

    #[diagnostic(code(prebun::manifest::invalid_runs))]
    #[error("{} is not a mapping.", "runs".style(Style::Property))]
    RunsNotMapping,

    #[diagnostic(code(prebun::manifest::invalid_using))]
    #[error("{} is missing or not a string.", "runs.using".style(Style::Property))]
    InvalidUsing,

    #[diagnostic(code(prebun::manifest::unknown_runtime))]
    #[error(
        "{} is not in {}, found {}.",
        "runs.using".style(Style::Property),
        .known.join(", "),
        .using.style(Style::Id),
    )]
    UnknownRuntime { using: String, known: Vec<String> },

    #[diagnostic(code(prebun::manifest::invalid_stage))]
    #[error("{} is missing or not a string.", format!("runs.{}", .stage).style(Style::Property))]
    InvalidStage { stage: String },
}

impl PrebunManifestError {
    /// Whether the error describes the shape of the manifest, as opposed
    /// to a failure to find, read, or write it.
    pub fn is_shape_problem(&self) -> bool {
        !matches!(self, Self::Fs(_) | Self::Yaml(_) | Self::NotFound { .. })
    }
}

impl From<FsError> for PrebunManifestError {
    fn from(e: FsError) -> PrebunManifestError {
        PrebunManifestError::Fs(Box::new(e))
    }
}

impl From<YamlError> for PrebunManifestError {
    fn from(e: YamlError) -> PrebunManifestError {
        PrebunManifestError::Yaml(Box::new(e))
    }
}
