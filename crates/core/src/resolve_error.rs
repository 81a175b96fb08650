use crate::client_error::PrebunClientError;
use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunResolveError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Client(#[from] Box<PrebunClientError>),

    #[diagnostic(
        code(prebun::resolve::no_releases),
        help = "Does the repository publish releases with version tags?"
    )]
    #[error("No releases found for {}.", .repo.style(Style::Id))]
    NoReleases { repo: String },

    #[diagnostic(
        code(prebun::resolve::no_matching_version),
        help = "Does this version exist and has it been released?"
    )]
    #[error(
        "No release of {} satisfies {}.",
        .repo.style(Style::Id),
        .range.style(Style::Hash),
    )]
    NoMatchingVersion { repo: String, range: String },

    #[diagnostic(code(prebun::resolve::unknown_runtime))]
    #[error(
        "Unknown runtime {}, expected one of {}.",
        .runtime.style(Style::Id),
        .known.join(", "),
    )]
    UnknownRuntime { runtime: String, known: Vec<String> },
}

impl From<PrebunClientError> for PrebunResolveError {
    fn from(e: PrebunClientError) -> PrebunResolveError {
        PrebunResolveError::Client(Box::new(e))
    }
}
