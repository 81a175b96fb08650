use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunTargetError {
    #[diagnostic(code(prebun::target::unsupported_platform))]
    #[error("Unsupported platform {} + {}.", .os.style(Style::Id), .arch.style(Style::Id))]
    UnsupportedPlatform { os: String, arch: String },

    #[diagnostic(
        code(prebun::target::unknown_avx2),
        help = "Pass --avx2 true or --avx2 false explicitly."
    )]
    #[error("Unable to pick a build for {}, AVX2 support is unknown.", .target.style(Style::Id))]
    UnknownAvx2 { target: String },

    #[diagnostic(code(prebun::target::unknown_variant))]
    #[error("Unknown build variant {}, expected {}.", .variant.style(Style::Id), "debug-info".style(Style::Id))]
    UnknownVariant { variant: String },
}
