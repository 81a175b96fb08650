use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use starbase_utils::fs::FsError;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunClientError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    #[diagnostic(code(prebun::client::create_failed))]
    #[error("Failed to create HTTP client.")]
    CreateFailed {
        #[source]
        error: Box<reqwest::Error>,
    },

    #[diagnostic(code(prebun::client::request_failed))]
    #[error("Failed to make HTTP request for {}.", .url.style(Style::Url))]
    Http {
        url: String,
        #[source]
        error: Box<reqwest::Error>,
    },

    #[diagnostic(code(prebun::client::invalid_response))]
    #[error(
        "Request for {} failed.\n{}",
        .url.style(Style::Url),
        format!("Status: {}", .status).style(Style::MutedLight),
    )]
    InvalidResponse { url: String, status: String },

    #[diagnostic(code(prebun::client::not_found))]
    #[error("Nothing found at {}.", .url.style(Style::Url))]
    NotFound { url: String },
}

impl From<FsError> for PrebunClientError {
    fn from(e: FsError) -> PrebunClientError {
        PrebunClientError::Fs(Box::new(e))
    }
}
