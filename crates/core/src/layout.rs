use crate::config_error::PrebunConfigError;
use crate::dispatcher::Stage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use system_env::{SystemArch, SystemOS};

pub const RELEASE_TAG_FILE: &str = ".release-tag";

/// Where dispatcher scripts are written, relative to the manifest.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ScriptLayout {
    /// `_main.mjs` next to the manifest.
    Flat,

    /// `.bun/main.mjs` inside the install directory.
    #[default]
    Nested,
}

impl ScriptLayout {
    /// Path of a stage script, relative to the action root and
    /// always `/` separated, as written into the manifest.
    pub fn script_relative_path(&self, stage: Stage, tool: &str) -> String {
        match self {
            Self::Flat => format!("_{stage}.mjs"),
            Self::Nested => format!(".{tool}/{stage}.mjs"),
        }
    }

    /// Path from a stage script back to the action root.
    pub fn root_relative_path(&self) -> &'static str {
        match self {
            Self::Flat => ".",
            Self::Nested => "..",
        }
    }
}

impl FromStr for ScriptLayout {
    type Err = PrebunConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "flat" => Ok(Self::Flat),
            "nested" => Ok(Self::Nested),
            other => Err(PrebunConfigError::InvalidSetting {
                setting: "layout".into(),
                value: other.to_owned(),
                expected: vec!["flat".into(), "nested".into()],
            }),
        }
    }
}

/// Paths of everything written into an action directory.
#[derive(Clone, Debug)]
pub struct InstallLayout {
    pub root: PathBuf,
    pub tool: String,
}

impl InstallLayout {
    pub fn new(root: impl AsRef<Path>, tool: impl AsRef<str>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            tool: tool.as_ref().to_owned(),
        }
    }

    /// The `.bun` directory holding every platform install.
    pub fn tool_dir(&self) -> PathBuf {
        self.root.join(format!(".{}", self.tool))
    }

    /// The install directory for a platform, like `.bun/Linux-X64`.
    pub fn platform_dir(&self, os: SystemOS, arch: SystemArch) -> PathBuf {
        self.tool_dir().join(format!("{os}-{arch}"))
    }

    pub fn exe_path(&self, os: SystemOS, arch: SystemArch) -> PathBuf {
        self.platform_dir(os, arch)
            .join("bin")
            .join(os.get_exe_name(&self.tool))
    }

    pub fn script_path(&self, layout: ScriptLayout, stage: Stage) -> PathBuf {
        self.root
            .join(layout.script_relative_path(stage, &self.tool))
    }
}
