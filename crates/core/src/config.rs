use crate::client::RepoCoordinates;
use crate::config_error::PrebunConfigError;
use crate::layout::ScriptLayout;
use crate::target::BuildVariant;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use system_env::{FeatureSupport, RuntimeContext, SystemArch, SystemOS};
use tracing::debug;
use version_spec::{MajorRange, Version};

pub const DEFAULT_STANDARD_RUNTIME: &str = "node20";
pub const DEFAULT_TOOL: &str = "bun";

/// Variables checked for an API token, in order, after an explicit token.
pub const TOKEN_VARS: [&str; 3] = ["INPUT_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

/// How a custom runtime identifier maps to upstream releases.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeSpec {
    /// A fixed release that is never resolved against the network.
    Pinned {
        version: Version,
        tag: String,
        #[serde(default)]
        deprecated: bool,
    },

    /// The highest release within a major version.
    Range(MajorRange),
}

/// Whether to use AVX2 builds for x64 platforms.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Avx2Policy {
    /// Query the host CPU, assuming support when the answer is inconclusive.
    #[default]
    Auto,

    #[serde(rename = "true")]
    #[cfg_attr(feature = "clap", value(name = "true"))]
    Always,

    #[serde(rename = "false")]
    #[cfg_attr(feature = "clap", value(name = "false"))]
    Never,
}

impl Avx2Policy {
    /// Decide AVX2 support, only querying the host for the auto policy.
    pub fn resolve(&self, query: impl FnOnce() -> FeatureSupport) -> bool {
        match self {
            Self::Auto => query().or_assume(true),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl FromStr for Avx2Policy {
    type Err = PrebunConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(Self::Auto),
            "true" => Ok(Self::Always),
            "false" => Ok(Self::Never),
            other => Err(PrebunConfigError::InvalidSetting {
                setting: "avx2".into(),
                value: other.to_owned(),
                expected: vec!["auto".into(), "true".into(), "false".into()],
            }),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PrebunConfig {
    /// Custom runtime identifiers accepted in `runs.using`.
    pub runtimes: IndexMap<String, RuntimeSpec>,

    /// Runtime written to `runs.using` after rewriting.
    pub standard_runtime: String,

    /// Repository that publishes the releases.
    pub repository: RepoCoordinates,

    /// Host that serves release downloads.
    pub download_host: String,

    /// Host of the releases API.
    pub api_host: String,

    /// Name of the tool, used for artifacts, executables, and directories.
    pub tool: String,

    pub layout: ScriptLayout,

    pub avx2: Avx2Policy,

    pub variant: Option<BuildVariant>,

    /// Platforms to install, in order.
    pub permutations: Vec<(SystemOS, SystemArch)>,
}

impl Default for PrebunConfig {
    fn default() -> Self {
        let mut runtimes = IndexMap::new();

        runtimes.insert(
            "bun0".to_owned(),
            RuntimeSpec::Pinned {
                version: Version::new(0, 8, 1),
                tag: "bun-v0.8.1".to_owned(),
                deprecated: true,
            },
        );
        runtimes.insert("bun1".to_owned(), RuntimeSpec::Range(MajorRange::new(1)));

        Self {
            runtimes,
            standard_runtime: DEFAULT_STANDARD_RUNTIME.to_owned(),
            repository: RepoCoordinates::new("oven-sh", "bun"),
            download_host: "https://github.com".to_owned(),
            api_host: "https://api.github.com".to_owned(),
            tool: DEFAULT_TOOL.to_owned(),
            layout: ScriptLayout::default(),
            avx2: Avx2Policy::default(),
            variant: None,
            permutations: vec![
                (SystemOS::Linux, SystemArch::X64),
                (SystemOS::Linux, SystemArch::Arm64),
                (SystemOS::MacOS, SystemArch::X64),
                (SystemOS::MacOS, SystemArch::Arm64),
            ],
        }
    }
}

impl PrebunConfig {
    pub fn runtime_names(&self) -> Vec<String> {
        self.runtimes.keys().cloned().collect()
    }

    /// Base URL that release artifacts are downloaded from.
    pub fn release_download_url(&self) -> String {
        format!(
            "{}/{}/{}/releases/download",
            self.download_host.trim_end_matches('/'),
            self.repository.owner,
            self.repository.name,
        )
    }

    pub fn set_repository(&mut self, slug: &str) -> Result<(), PrebunConfigError> {
        self.repository =
            RepoCoordinates::parse(slug).ok_or_else(|| PrebunConfigError::InvalidRepository {
                slug: slug.to_owned(),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), PrebunConfigError> {
        if !self.standard_runtime.starts_with("node") {
            return Err(PrebunConfigError::InvalidStandardRuntime {
                runtime: self.standard_runtime.clone(),
            });
        }

        Ok(())
    }
}

/// Find a token for the releases API. An explicit token wins, then the
/// action input, then the GitHub CLI and Actions variables.
pub fn resolve_token(explicit: Option<&str>, context: &RuntimeContext) -> Option<String> {
    if let Some(token) = explicit.filter(|token| !token.is_empty()) {
        debug!("Using explicitly provided token");

        return Some(token.to_owned());
    }

    for name in TOKEN_VARS {
        if let Some(token) = context.var(name) {
            debug!("Using token from {name}");

            return Some(token.to_owned());
        }
    }

    debug!("No token found, API requests will be unauthenticated");

    None
}
