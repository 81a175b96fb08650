use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunConfigError {
    #[diagnostic(code(prebun::config::invalid_repository))]
    #[error(
        "Invalid repository {}, expected an {} slug.",
        .slug.style(Style::Id),
        "owner/name".style(Style::Label),
    )]
    InvalidRepository { slug: String },

    #[diagnostic(code(prebun::config::invalid_setting))]
    #[error(
        "Invalid {} setting {}, expected one of {}.",
        .setting,
        .value.style(Style::Id),
        .expected.join(", "),
    )]
    InvalidSetting {
        setting: String,
        value: String,
        expected: Vec<String>,
    },

    #[diagnostic(code(prebun::config::invalid_runtime))]
    #[error("Invalid runtime {}, standard runtimes must start with {}.", .runtime.style(Style::Id), "node".style(Style::Label))]
    InvalidStandardRuntime { runtime: String },
}
