use crate::env::{SystemArch, SystemOS};
use crate::error::Error;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use tracing::debug;

const CAPTURED_VARS: &[&str] = &[
    "GH_TOKEN",
    "GITHUB_ACTIONS",
    "GITHUB_TOKEN",
    "INPUT_PATH",
    "INPUT_TOKEN",
    "RUNNER_ARCH",
    "RUNNER_OS",
    "RUNNER_TEMP",
    "RUNNER_TOOL_CACHE",
];

/// Snapshot of the environment the tool is running in. Everything that
/// would otherwise be read from process globals is captured here once,
/// so that the rest of the pipeline can be driven from tests.
#[derive(Clone, Debug)]
pub struct RuntimeContext {
    pub os: SystemOS,
    pub arch: SystemArch,
    pub temp_dir: PathBuf,
    pub vars: BTreeMap<String, String>,
}

impl RuntimeContext {
    pub fn new(os: SystemOS, arch: SystemArch, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            os,
            arch,
            temp_dir: temp_dir.into(),
            vars: BTreeMap::new(),
        }
    }

    /// Capture the current process environment. `RUNNER_OS` and `RUNNER_ARCH`
    /// take precedence over the compiled host, and `RUNNER_TEMP` over the
    /// system temporary directory.
    pub fn from_env() -> Result<Self, Error> {
        let mut vars = BTreeMap::new();

        for name in CAPTURED_VARS {
            if let Ok(value) = env::var(name) {
                vars.insert((*name).to_owned(), value);
            }
        }

        let non_empty = |name: &str| vars.get(name).filter(|value| !value.is_empty());

        let os = match non_empty("RUNNER_OS") {
            Some(value) => value.parse()?,
            None => SystemOS::from_env()?,
        };

        let arch = match non_empty("RUNNER_ARCH") {
            Some(value) => value.parse()?,
            None => SystemArch::from_env()?,
        };

        let temp_dir = match non_empty("RUNNER_TEMP") {
            Some(value) => PathBuf::from(value),
            None => env::temp_dir(),
        };

        debug!(
            os = %os,
            arch = %arch,
            temp_dir = ?temp_dir,
            "Captured runtime context"
        );

        Ok(Self {
            os,
            arch,
            temp_dir,
            vars,
        })
    }

    pub fn with_var(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.vars
            .insert(name.as_ref().to_owned(), value.as_ref().to_owned());
        self
    }

    /// Return a variable's value, treating empty values as unset.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn is_github_actions(&self) -> bool {
        self.var("GITHUB_ACTIONS").is_some_and(|value| value == "true")
    }
}
