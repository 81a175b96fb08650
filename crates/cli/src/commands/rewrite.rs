use crate::error::PrebunCliError;
use crate::session::PrebunSession;
use clap::Args;
use prebun_core::flow::{RewriteOutcome, Rewriter};
use prebun_core::{Avx2Policy, BuildVariant, PrebunConfig, ScriptLayout};
use starbase::AppResult;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Clone, Debug)]
pub struct RewriteArgs {
    #[arg(
        long,
        env = "INPUT_PATH",
        default_value = ".",
        help = "Directory containing the action manifest"
    )]
    path: PathBuf,

    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "Token for the GitHub releases API"
    )]
    token: Option<String>,

    #[arg(
        value_enum,
        long,
        env = "PREBUN_LAYOUT",
        help = "Where to write dispatcher scripts"
    )]
    layout: Option<ScriptLayout>,

    #[arg(
        long,
        env = "PREBUN_RUNTIME",
        help = "Runtime to write to runs.using"
    )]
    runtime: Option<String>,

    #[arg(
        value_enum,
        long,
        env = "PREBUN_AVX2",
        help = "Whether x64 installs use the AVX2 build"
    )]
    avx2: Option<Avx2Policy>,

    #[arg(
        value_enum,
        long,
        env = "PREBUN_VARIANT",
        help = "Build variant to install"
    )]
    variant: Option<BuildVariant>,

    #[arg(
        long,
        env = "PREBUN_GIT_ADD",
        help = "Stage the rewritten files with git"
    )]
    git_add: bool,
}

impl RewriteArgs {
    fn to_config(&self) -> PrebunConfig {
        let mut config = PrebunConfig::default();

        if let Some(layout) = self.layout {
            config.layout = layout;
        }

        if let Some(runtime) = &self.runtime {
            config.standard_runtime = runtime.to_owned();
        }

        if let Some(avx2) = self.avx2 {
            config.avx2 = avx2;
        }

        if self.variant.is_some() {
            config.variant = self.variant;
        }

        config
    }
}

#[tracing::instrument(skip_all)]
pub async fn rewrite(session: PrebunSession, args: RewriteArgs) -> AppResult {
    let root = session.working_dir.join(&args.path);

    if !root.is_dir() {
        return Err(PrebunCliError::MissingPath { path: root }.into());
    }

    let config = args.to_config();
    let context = session.get_context()?;
    let client = session.create_client(&config, args.token.as_deref())?;

    debug!(root = ?root, "Rewriting action");

    let outcome = Rewriter::new(&config, &context, &client)
        .with_git_add(args.git_add)
        .rewrite(&root)
        .await?;

    match outcome {
        RewriteOutcome::Rewritten(report) => {
            println!(
                "Rewrote {} to run {} with {} {}",
                report.manifest.display(),
                config.standard_runtime,
                config.tool,
                report.release,
            );

            for dir in &report.installed {
                println!("  installed {}", dir.display());
            }

            for dir in &report.reused {
                println!("  reused {}", dir.display());
            }

            for script in &report.scripts {
                println!("  wrote {}", script.display());
            }
        }
        RewriteOutcome::Skipped { manifest, reason } => {
            // Already logged, this surfaces it in the workflow summary
            if session.is_github_actions() {
                println!("::warning file={}::{reason}", manifest.display());
            }
        }
    }

    Ok(None)
}
