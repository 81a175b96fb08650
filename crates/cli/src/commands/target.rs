use crate::session::PrebunSession;
use clap::Args;
use prebun_core::{BuildVariant, DEFAULT_TOOL, map_target};
use starbase::AppResult;
use system_env::{SystemArch, SystemOS};

#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    #[arg(long, help = "Runner operating system, like Linux or macOS")]
    os: SystemOS,

    #[arg(long, help = "Runner architecture, like X64 or ARM64")]
    arch: SystemArch,

    #[arg(long, help = "Whether the CPU supports AVX2, required for X64")]
    avx2: Option<bool>,

    #[arg(value_enum, long, help = "Build variant to select")]
    variant: Option<BuildVariant>,
}

#[tracing::instrument(skip_all)]
pub async fn target(_session: PrebunSession, args: TargetArgs) -> AppResult {
    let target = map_target(args.os, args.arch, args.avx2, args.variant)?;

    println!("{target}");
    println!("{}", target.archive_file_name(DEFAULT_TOOL));

    Ok(None)
}
