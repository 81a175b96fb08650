use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunCliError {
    #[diagnostic(
        code(prebun::cli::unknown_runner),
        help("Set RUNNER_OS and RUNNER_ARCH to a supported runner platform.")
    )]
    #[error("Failed to detect the runner platform.")]
    UnknownRunner {
        #[source]
        error: Box<system_env::Error>,
    },

    #[diagnostic(code(prebun::cli::working_dir))]
    #[error("Unable to determine the current working directory.")]
    WorkingDir {
        #[source]
        error: Box<io::Error>,
    },

    #[diagnostic(code(prebun::cli::missing_path))]
    #[error("Action directory {} does not exist.", .path.style(Style::Path))]
    MissingPath { path: PathBuf },
}

impl From<system_env::Error> for PrebunCliError {
    fn from(e: system_env::Error) -> PrebunCliError {
        PrebunCliError::UnknownRunner { error: Box::new(e) }
    }
}
