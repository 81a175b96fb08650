#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown or unsupported operating system `{0}`.")]
    UnknownOs(String),

    #[error("Unknown or unsupported architecture `{0}`.")]
    UnknownArch(String),
}
