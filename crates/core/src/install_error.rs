use crate::client_error::PrebunClientError;
use crate::target_error::PrebunTargetError;
use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use starbase_utils::fs::FsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunInstallError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Target(#[from] Box<PrebunTargetError>),

    #[diagnostic(code(prebun::install::download_failed))]
    #[error("Failed to download archive {}.", .url.style(Style::Url))]
    DownloadFailed {
        url: String,
        #[source]
        error: Box<PrebunClientError>,
    },

    #[diagnostic(
        code(prebun::install::not_available),
        help = "Was this build published for the release?"
    )]
    #[error("Download {} is not available.", .url.style(Style::Url))]
    DownloadNotFound { url: String },

    #[diagnostic(code(prebun::install::extract_failed))]
    #[error("Failed to unpack archive {}.", .archive.style(Style::Path))]
    ExtractFailed {
        archive: PathBuf,
        #[diagnostic_source]
        error: miette::Report,
    },

    #[diagnostic(code(prebun::install::missing_executable))]
    #[error("Unpacked archive is missing the executable {}.", .path.style(Style::Path))]
    MissingExecutable { path: PathBuf },
}

impl From<FsError> for PrebunInstallError {
    fn from(e: FsError) -> PrebunInstallError {
        PrebunInstallError::Fs(Box::new(e))
    }
}

impl From<PrebunTargetError> for PrebunInstallError {
    fn from(e: PrebunTargetError) -> PrebunInstallError {
        PrebunInstallError::Target(Box::new(e))
    }
}
