#[derive(thiserror::Error, Debug)]
pub enum SpecError {
    #[error("Invalid version `{0}`. Expected a dotted triple like `1.2.3`, `v1.2.3`, or `bun-v1.2.3`.")]
    InvalidVersion(String),

    #[error("Unsupported range `{0}`. Only major ranges of the form `^MAJOR.0.0` are supported.")]
    UnsupportedRange(String),

    #[error(transparent)]
    Semver(#[from] semver::Error),
}
