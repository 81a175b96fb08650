use miette::Diagnostic;
use starbase_styles::{Style, Stylize, color};
use std::io;
use std::process::{Output, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::trace;

#[derive(Error, Debug, Diagnostic)]
pub enum PrebunProcessError {
    #[diagnostic(code(prebun::process::command_failed))]
    #[error("Failed to execute command {}.", .command.style(Style::Shell))]
    FailedCommand {
        command: String,
        #[source]
        error: Box<io::Error>,
    },

    #[diagnostic(code(prebun::process::command_failed))]
    #[error(
        "Command {} returned a {code} exit code.\n{}",
        .command.style(Style::Shell),
        .stderr.style(Style::MutedLight),
    )]
    FailedCommandNonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

pub struct ProcessResult {
    pub command: String,
    pub exit_code: i32,
    pub stderr: String,
    pub stdout: String,
}

async fn spawn_command(command: &mut Command) -> io::Result<Output> {
    let child = command.spawn()?;
    let output = child.wait_with_output().await?;

    Ok(output)
}

fn format_command_line(command: &Command) -> String {
    let inner = command.as_std();

    format!(
        "{} {}",
        inner.get_program().to_string_lossy(),
        shell_words::join(
            inner
                .get_args()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
        )
    )
}

/// Run the command with piped output, failing on a non-zero exit code.
pub async fn exec_command_piped(command: &mut Command) -> Result<ProcessResult, PrebunProcessError> {
    let command_line = format_command_line(command);

    trace!(
        cwd = ?command.as_std().get_current_dir(),
        "Running command {}",
        color::shell(&command_line)
    );

    let output = spawn_command(command.stderr(Stdio::piped()).stdout(Stdio::piped()))
        .await
        .map_err(|error| PrebunProcessError::FailedCommand {
            command: command_line.clone(),
            error: Box::new(error),
        })?;

    let stderr = String::from_utf8(output.stderr).unwrap_or_default();
    let stdout = String::from_utf8(output.stdout).unwrap_or_default();
    let code = output.status.code().unwrap_or(-1);

    trace!(code, "Ran command {}", color::shell(&command_line));

    if !output.status.success() {
        return Err(PrebunProcessError::FailedCommandNonZeroExit {
            command: command_line,
            code,
            stderr: stderr.trim().to_owned(),
        });
    }

    Ok(ProcessResult {
        command: command_line,
        exit_code: code,
        stderr,
        stdout,
    })
}
