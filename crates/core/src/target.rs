use crate::target_error::PrebunTargetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use system_env::{SystemArch, SystemOS};

/// Alternate builds published alongside the default artifacts.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BuildVariant {
    /// Builds with debug symbols, published with a `-profile` suffix.
    DebugInfo,
}

impl FromStr for BuildVariant {
    type Err = PrebunTargetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "debug-info" => Ok(Self::DebugInfo),
            other => Err(PrebunTargetError::UnknownVariant {
                variant: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DebugInfo => write!(f, "debug-info"),
        }
    }
}

/// Canonical artifact identifier, like `linux-x64-baseline`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct TargetId {
    id: String,
    profile: bool,
}

impl TargetId {
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Whether this is a debug-info build.
    pub fn is_profile(&self) -> bool {
        self.profile
    }

    /// Name of the directory the archive unpacks into, like `bun-linux-x64`.
    pub fn archive_dir_name(&self, tool: &str) -> String {
        format!("{tool}-{}", self.id)
    }

    /// Name of the downloadable archive, like `bun-linux-x64.zip`.
    pub fn archive_file_name(&self, tool: &str) -> String {
        format!("{}.zip", self.archive_dir_name(tool))
    }

    /// Name of the executable inside the archive directory.
    pub fn exe_name(&self, tool: &str, os: SystemOS) -> String {
        if self.profile {
            os.get_exe_name(format!("{tool}-profile"))
        } else {
            os.get_exe_name(tool)
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl AsRef<str> for TargetId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl PartialEq<&str> for TargetId {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

/// Everything that determines which artifact to download for a platform.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PlatformKey {
    pub os: SystemOS,
    pub arch: SystemArch,
    pub avx2: Option<bool>,
    pub variant: Option<BuildVariant>,
}

impl PlatformKey {
    pub fn new(os: SystemOS, arch: SystemArch) -> Self {
        Self {
            os,
            arch,
            avx2: None,
            variant: None,
        }
    }

    pub fn with_avx2(mut self, avx2: Option<bool>) -> Self {
        self.avx2 = avx2;
        self
    }

    pub fn with_variant(mut self, variant: Option<BuildVariant>) -> Self {
        self.variant = variant;
        self
    }

    pub fn to_target(&self) -> Result<TargetId, PrebunTargetError> {
        map_target(self.os, self.arch, self.avx2, self.variant)
    }
}

/// Map a platform to the artifact identifier published upstream.
///
/// x64 builds require AVX2 support to be known, since CPUs without it
/// need the `-baseline` build. Windows is never supported.
pub fn map_target(
    os: SystemOS,
    arch: SystemArch,
    avx2: Option<bool>,
    variant: Option<BuildVariant>,
) -> Result<TargetId, PrebunTargetError> {
    let unsupported = || PrebunTargetError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    };

    if os.is_windows() {
        return Err(unsupported());
    }

    let base = match (os, arch) {
        (SystemOS::MacOS, SystemArch::X64) => "darwin-x64",
        (SystemOS::MacOS, SystemArch::Arm64) => "darwin-aarch64",
        (SystemOS::Linux, SystemArch::X64) => "linux-x64",
        (SystemOS::Linux, SystemArch::Arm64) => "linux-aarch64",
        _ => return Err(unsupported()),
    };

    let mut id = base.to_owned();

    if arch == SystemArch::X64 {
        match avx2 {
            Some(true) => {}
            Some(false) => id.push_str("-baseline"),
            None => {
                return Err(PrebunTargetError::UnknownAvx2 {
                    target: base.to_owned(),
                });
            }
        }
    }

    let profile = matches!(variant, Some(BuildVariant::DebugInfo));

    if profile {
        id.push_str("-profile");
    }

    Ok(TargetId { id, profile })
}
