use crate::session::PrebunSession;
use clap::Args;
use prebun_core::{PrebunConfig, resolve_runtime};
use starbase::AppResult;

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    #[arg(required = true, help = "Runtime to resolve, like bun1")]
    runtime: String,

    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "Token for the GitHub releases API"
    )]
    token: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn resolve(session: PrebunSession, args: ResolveArgs) -> AppResult {
    let config = PrebunConfig::default();
    let client = session.create_client(&config, args.token.as_deref())?;
    let release = resolve_runtime(&client, &config, &args.runtime).await?;

    println!("{} {}", release.version, release.tag);

    Ok(None)
}
