use crate::app::{App as CLI, Commands};
use crate::error::PrebunCliError;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use prebun_core::{GitHubClient, PrebunConfig, resolve_token};
use starbase::{AppResult, AppSession};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use system_env::RuntimeContext;
use tracing::debug;

#[derive(Clone)]
pub struct PrebunSession {
    pub cli: CLI,
    pub working_dir: PathBuf,

    // Lazy components
    context: OnceCell<Arc<RuntimeContext>>,
}

impl PrebunSession {
    pub fn new(cli: CLI) -> Self {
        Self {
            cli,
            context: OnceCell::new(),
            working_dir: PathBuf::new(),
        }
    }

    pub fn get_context(&self) -> miette::Result<Arc<RuntimeContext>> {
        let item = self.context.get_or_try_init(|| {
            RuntimeContext::from_env()
                .map(Arc::new)
                .map_err(PrebunCliError::from)
        })?;

        Ok(Arc::clone(item))
    }

    /// Create a releases API client, authenticated with the first token
    /// found on the command line or in the environment.
    pub fn create_client(
        &self,
        config: &PrebunConfig,
        token: Option<&str>,
    ) -> miette::Result<GitHubClient> {
        let context = self.get_context()?;
        let client = GitHubClient::new(&config.api_host, resolve_token(token, &context))?;

        Ok(client)
    }

    pub fn is_github_actions(&self) -> bool {
        self.get_context()
            .is_ok_and(|context| context.is_github_actions())
    }
}

#[async_trait]
impl AppSession for PrebunSession {
    async fn startup(&mut self) -> AppResult {
        self.working_dir =
            env::current_dir().map_err(|error| PrebunCliError::WorkingDir {
                error: Box::new(error),
            })?;

        // Capture the runner up front so a bad environment fails before any work
        if matches!(self.cli.command, Commands::Rewrite(_) | Commands::Resolve(_)) {
            let context = self.get_context()?;

            debug!(
                os = %context.os,
                arch = %context.arch,
                github_actions = context.is_github_actions(),
                "Running on runner platform"
            );
        }

        Ok(None)
    }
}
