use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use starbase_utils::fs::FsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunDispatchError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    #[diagnostic(code(prebun::dispatch::invalid_path))]
    #[error("Invalid {} stage path {}, {reason}.", .stage, .path.style(Style::File))]
    InvalidPath {
        stage: String,
        path: String,
        reason: String,
    },

    #[diagnostic(code(prebun::dispatch::render_failed))]
    #[error("Failed to render dispatcher script {}.", .path.style(Style::Path))]
    RenderFailed {
        path: PathBuf,
        #[source]
        error: Box<tera::Error>,
    },
}

impl From<FsError> for PrebunDispatchError {
    fn from(e: FsError) -> PrebunDispatchError {
        PrebunDispatchError::Fs(Box::new(e))
    }
}
