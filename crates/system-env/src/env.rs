use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env::consts;
use std::fmt;
use std::str::FromStr;

/// Architecture of a runner, named the way GitHub Actions names them
/// in `RUNNER_ARCH`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SystemArch {
    #[serde(rename = "X64", alias = "x64", alias = "x86_64", alias = "amd64")]
    X64,
    #[serde(rename = "X86", alias = "x86", alias = "i686", alias = "ia32")]
    X86,
    #[serde(rename = "ARM64", alias = "arm64", alias = "aarch64")]
    Arm64,
    #[serde(rename = "ARM", alias = "arm")]
    Arm,
}

impl SystemArch {
    /// Return an instance derived from [`std::env::consts::ARCH`].
    pub fn from_env() -> Result<SystemArch, Error> {
        Self::from_str(consts::ARCH)
    }

    /// Return the architecture name that Node.js reports in `process.arch`.
    pub fn to_node_arch(&self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::X86 => "ia32",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
        }
    }
}

impl FromStr for SystemArch {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(value.to_owned()))
            .map_err(|_| Error::UnknownArch(value.to_owned()))
    }
}

impl fmt::Display for SystemArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::X64 => "X64",
                Self::X86 => "X86",
                Self::Arm64 => "ARM64",
                Self::Arm => "ARM",
            }
        )
    }
}

/// Operating system of a runner, named the way GitHub Actions names them
/// in `RUNNER_OS`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SystemOS {
    #[serde(rename = "Linux", alias = "linux")]
    Linux,
    #[serde(rename = "macOS", alias = "macos", alias = "darwin", alias = "mac")]
    MacOS,
    #[serde(rename = "Windows", alias = "windows", alias = "win32")]
    Windows,
}

impl SystemOS {
    /// Return an instance derived from [`std::env::consts::OS`].
    pub fn from_env() -> Result<SystemOS, Error> {
        Self::from_str(consts::OS)
    }

    /// Return the provided name as a system formatted file name for executables.
    /// On Windows this will append an ".exe" extension. On Unix, no extension.
    pub fn get_exe_name(&self, name: impl AsRef<str>) -> String {
        let name = name.as_ref();

        if self.is_windows() && !name.ends_with(".exe") {
            format!("{name}.exe")
        } else {
            name.to_owned()
        }
    }

    /// Return true if Linux.
    pub fn is_linux(&self) -> bool {
        matches!(self, Self::Linux)
    }

    /// Return true if MacOS.
    pub fn is_mac(&self) -> bool {
        matches!(self, Self::MacOS)
    }

    /// Return true if Windows.
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl FromStr for SystemOS {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(value.to_owned()))
            .map_err(|_| Error::UnknownOs(value.to_owned()))
    }
}

impl fmt::Display for SystemOS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Linux => "Linux",
                Self::MacOS => "macOS",
                Self::Windows => "Windows",
            }
        )
    }
}
