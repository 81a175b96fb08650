use crate::config::DEFAULT_TOOL;
use crate::dispatch_error::PrebunDispatchError;
use crate::layout::ScriptLayout;
use serde::{Deserialize, Serialize};
use starbase_utils::fs;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;
use version_spec::Version;

/// Lifecycle stages of a JavaScript action.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pre,
    Main,
    Post,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Pre, Stage::Main, Stage::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Main => "main",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct DispatcherContext<'script> {
    /// Stage being dispatched, for error messages.
    pub stage: Stage,

    /// Name of the tool binary and its `.<tool>` directory.
    pub tool: &'script str,

    /// Entry file to run, relative to the action root.
    pub file_relative_path: &'script str,

    /// Version used as the tool cache key.
    pub installed_version: String,

    /// Path from the script's directory back to the action root.
    pub root_relative_path: &'script str,
}

impl<'script> DispatcherContext<'script> {
    pub fn new(
        stage: Stage,
        file_relative_path: &'script str,
        installed_version: &Version,
        layout: ScriptLayout,
    ) -> Self {
        Self {
            stage,
            tool: DEFAULT_TOOL,
            file_relative_path,
            installed_version: installed_version.to_string(),
            root_relative_path: layout.root_relative_path(),
        }
    }

    pub fn with_tool(mut self, tool: &'script str) -> Self {
        self.tool = tool;
        self
    }

    pub fn render(&self) -> Result<String, PrebunDispatchError> {
        validate_relative_path(self.stage, self.file_relative_path)?;

        build_script_file(self)
    }

    /// Render the script and write it to the path.
    pub fn write_script(&self, script_path: &Path) -> Result<(), PrebunDispatchError> {
        debug!(
            stage = %self.stage,
            file = self.file_relative_path,
            script = ?script_path,
            "Writing dispatcher script"
        );

        fs::write_file(script_path, self.render()?)?;

        Ok(())
    }
}

/// Render the dispatcher for a single stage with the default tool.
pub fn render_stage_script(
    stage: Stage,
    file_relative_path: &str,
    installed_version: &Version,
    layout: ScriptLayout,
) -> Result<String, PrebunDispatchError> {
    DispatcherContext::new(stage, file_relative_path, installed_version, layout).render()
}

/// Ensure a stage path stays within the action root.
pub fn validate_relative_path(stage: Stage, path: &str) -> Result<(), PrebunDispatchError> {
    let invalid = |reason: &str| PrebunDispatchError::InvalidPath {
        stage: stage.to_string(),
        path: path.to_owned(),
        reason: reason.to_owned(),
    };

    if path.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }

    if path.contains('\0') {
        return Err(invalid("must not contain NUL bytes"));
    }

    let normalized = path.replace('\\', "/");

    if normalized.starts_with('/') || Path::new(path).is_absolute() || has_drive_prefix(path) {
        return Err(invalid("must be relative to the action root"));
    }

    if PathBuf::from(&normalized)
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(invalid("must not traverse outside the action root"));
    }

    Ok(())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();

    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn build_script_file(context: &DispatcherContext) -> Result<String, PrebunDispatchError> {
    let script_name = format!("{}.mjs", context.stage);
    let handle_error = |error: tera::Error| PrebunDispatchError::RenderFailed {
        path: PathBuf::from(&script_name),
        error: Box::new(error),
    };

    let mut tera = Tera::default();

    tera.add_raw_template("stage.mjs", include_str!("../templates/stage.mjs.tpl"))
        .map_err(handle_error)?;

    let result = tera
        .render(
            "stage.mjs",
            &Context::from_serialize(context).map_err(handle_error)?,
        )
        .map_err(handle_error)?;

    Ok(result)
}
