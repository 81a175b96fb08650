mod app;
mod commands;
mod error;
mod session;

use app::{App as CLI, Commands};
use clap::Parser;
use session::PrebunSession;
use starbase::tracing::TracingOptions;
use starbase::{App, MainResult};
use starbase_utils::string_vec;
use std::env;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> MainResult {
    let cli = CLI::parse();

    let app = App::default();
    app.setup_diagnostics();

    let _guard = app.setup_tracing(TracingOptions {
        default_level: match cli.log.clone().unwrap_or_default() {
            app::LogLevel::Off => starbase::tracing::LogLevel::Off,
            app::LogLevel::Error => starbase::tracing::LogLevel::Error,
            app::LogLevel::Warn => starbase::tracing::LogLevel::Warn,
            app::LogLevel::Info => starbase::tracing::LogLevel::Info,
            app::LogLevel::Debug => starbase::tracing::LogLevel::Debug,
            app::LogLevel::Trace => starbase::tracing::LogLevel::Trace,
        },
        filter_modules: string_vec!["prebun", "starbase"],
        log_env: "PREBUN_LOG".into(),
        test_env: "PREBUN_TEST".into(),
        ..TracingOptions::default()
    });

    debug!(
        args = ?env::args().collect::<Vec<_>>(),
        "Running prebun v{}",
        env!("CARGO_PKG_VERSION")
    );

    let exit_code = app
        .run(PrebunSession::new(cli), |session| async move {
            match session.cli.command.clone() {
                Commands::Resolve(args) => commands::resolve(session, args).await,
                Commands::Rewrite(args) => commands::rewrite(session, args).await,
                Commands::Target(args) => commands::target(session, args).await,
            }
        })
        .await?;

    Ok(ExitCode::from(exit_code))
}
