use crate::config_error::PrebunConfigError;
use crate::dispatch_error::PrebunDispatchError;
use crate::install_error::PrebunInstallError;
use crate::manifest_error::PrebunManifestError;
use crate::process::PrebunProcessError;
use crate::resolve_error::PrebunResolveError;
use crate::target_error::PrebunTargetError;
use miette::Diagnostic;
use starbase_utils::fs::FsError;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunRewriteError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Config(#[from] Box<PrebunConfigError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Dispatch(#[from] Box<PrebunDispatchError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Install(#[from] Box<PrebunInstallError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Manifest(#[from] Box<PrebunManifestError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Process(#[from] Box<PrebunProcessError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Resolve(#[from] Box<PrebunResolveError>),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Target(#[from] Box<PrebunTargetError>),
}

impl From<PrebunConfigError> for PrebunRewriteError {
    fn from(e: PrebunConfigError) -> PrebunRewriteError {
        PrebunRewriteError::Config(Box::new(e))
    }
}

impl From<PrebunDispatchError> for PrebunRewriteError {
    fn from(e: PrebunDispatchError) -> PrebunRewriteError {
        PrebunRewriteError::Dispatch(Box::new(e))
    }
}

impl From<FsError> for PrebunRewriteError {
    fn from(e: FsError) -> PrebunRewriteError {
        PrebunRewriteError::Fs(Box::new(e))
    }
}

impl From<PrebunInstallError> for PrebunRewriteError {
    fn from(e: PrebunInstallError) -> PrebunRewriteError {
        PrebunRewriteError::Install(Box::new(e))
    }
}

impl From<PrebunManifestError> for PrebunRewriteError {
    fn from(e: PrebunManifestError) -> PrebunRewriteError {
        PrebunRewriteError::Manifest(Box::new(e))
    }
}

impl From<PrebunProcessError> for PrebunRewriteError {
    fn from(e: PrebunProcessError) -> PrebunRewriteError {
        PrebunRewriteError::Process(Box::new(e))
    }
}

impl From<PrebunResolveError> for PrebunRewriteError {
    fn from(e: PrebunResolveError) -> PrebunRewriteError {
        PrebunRewriteError::Resolve(Box::new(e))
    }
}

impl From<PrebunTargetError> for PrebunRewriteError {
    fn from(e: PrebunTargetError) -> PrebunRewriteError {
        PrebunRewriteError::Target(Box::new(e))
    }
}
