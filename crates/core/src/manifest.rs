use crate::dispatcher::Stage;
use crate::manifest_error::PrebunManifestError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use starbase_styles::color;
use starbase_utils::fs;
use starbase_utils::yaml::{self, YamlMapping, YamlValue};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

/// Manifest file names, in order of preference.
pub const MANIFEST_FILE_NAMES: [&str; 2] = ["action.yml", "action.yaml"];

const STAGE_KEYS: [&str; 4] = ["using", "main", "pre", "post"];

/// Find the action manifest in the directory or its closest ancestor.
#[instrument]
pub fn find_manifest(root: &Path) -> Result<PathBuf, PrebunManifestError> {
    for dir in root.ancestors() {
        for name in MANIFEST_FILE_NAMES {
            let path = dir.join(name);

            trace!(path = ?path, "Checking for action manifest");

            if path.is_file() {
                debug!("Found action manifest at {}", color::path(&path));

                return Ok(path);
            }
        }
    }

    Err(PrebunManifestError::NotFound {
        root: root.to_path_buf(),
    })
}

/// The validated `runs` section of a manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct RunsConfig {
    pub using: String,
    pub main: String,
    pub pre: Option<String>,
    pub post: Option<String>,

    /// Every other key, like `pre-if` and `post-if`.
    pub rest: IndexMap<String, YamlValue>,
}

impl RunsConfig {
    pub fn get_stage(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Pre => self.pre.as_deref(),
            Stage::Main => Some(&self.main),
            Stage::Post => self.post.as_deref(),
        }
    }

    /// Stages present in the manifest with their entry files.
    pub fn stages(&self) -> Vec<(Stage, &str)> {
        Stage::ALL
            .into_iter()
            .filter_map(|stage| self.get_stage(stage).map(|file| (stage, file)))
            .collect()
    }
}

/// An action manifest. Every key is kept as is, so that rewriting
/// only touches the `runs` fields it needs to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActionManifest {
    pub fields: IndexMap<String, YamlValue>,
}

impl ActionManifest {
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, PrebunManifestError> {
        debug!("Loading action manifest {}", color::path(path));

        let content = fs::read_file(path)?;

        yaml::parse(content).map_err(|error| PrebunManifestError::Malformed {
            path: path.to_path_buf(),
            error: Box::new(error),
        })
    }

    #[instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), PrebunManifestError> {
        debug!("Saving action manifest {}", color::path(path));

        yaml::write_file(path, self)?;

        Ok(())
    }

    /// Validate the `runs` section against the known custom runtimes.
    pub fn validate_runs(&self, known_runtimes: &[String]) -> Result<RunsConfig, PrebunManifestError> {
        let runs = match self.fields.get("runs") {
            None | Some(YamlValue::Null) => return Err(PrebunManifestError::MissingRuns),
            Some(YamlValue::Mapping(runs)) => runs,
            Some(_) => return Err(PrebunManifestError::RunsNotMapping),
        };

        let using = get_string(runs, "using")
            .ok_or(PrebunManifestError::InvalidUsing)?
            .ok_or(PrebunManifestError::InvalidUsing)?;

        if !known_runtimes.iter().any(|known| known == using) {
            return Err(PrebunManifestError::UnknownRuntime {
                using: using.to_owned(),
                known: known_runtimes.to_vec(),
            });
        }

        let invalid_stage = |stage: Stage| PrebunManifestError::InvalidStage {
            stage: stage.to_string(),
        };

        let main = get_string(runs, "main")
            .ok_or_else(|| invalid_stage(Stage::Main))?
            .ok_or_else(|| invalid_stage(Stage::Main))?;

        let pre = match get_optional_string(runs, "pre") {
            None => None,
            Some(value) => Some(value.ok_or_else(|| invalid_stage(Stage::Pre))?),
        };

        let post = match get_optional_string(runs, "post") {
            None => None,
            Some(value) => Some(value.ok_or_else(|| invalid_stage(Stage::Post))?),
        };

        let rest = runs
            .iter()
            .filter_map(|(key, value)| {
                key.as_str()
                    .filter(|key| !STAGE_KEYS.contains(key))
                    .map(|key| (key.to_owned(), value.clone()))
            })
            .collect();

        Ok(RunsConfig {
            using: using.to_owned(),
            main: main.to_owned(),
            pre: pre.map(|pre| pre.to_owned()),
            post: post.map(|post| post.to_owned()),
            rest,
        })
    }

    /// Point `runs.using` at the standard runtime and each stage at its
    /// script. Keys keep their position, unknown keys are untouched.
    pub fn rewrite_runs(
        &mut self,
        using: &str,
        scripts: &[(Stage, String)],
    ) -> Result<(), PrebunManifestError> {
        let runs = match self.fields.get_mut("runs") {
            None | Some(YamlValue::Null) => return Err(PrebunManifestError::MissingRuns),
            Some(YamlValue::Mapping(runs)) => runs,
            Some(_) => return Err(PrebunManifestError::RunsNotMapping),
        };

        runs.insert(
            YamlValue::String("using".into()),
            YamlValue::String(using.to_owned()),
        );

        for (stage, script) in scripts {
            runs.insert(
                YamlValue::String(stage.to_string()),
                YamlValue::String(script.to_owned()),
            );
        }

        Ok(())
    }
}

// Outer `None` when the key is absent, inner `None` when it's not a string.
fn get_string<'a>(map: &'a YamlMapping, key: &str) -> Option<Option<&'a str>> {
    map.get(key).map(|value| value.as_str())
}

// Like `get_string`, but an explicit `null` counts as absent.
fn get_optional_string<'a>(map: &'a YamlMapping, key: &str) -> Option<Option<&'a str>> {
    match map.get(key) {
        None | Some(YamlValue::Null) => None,
        Some(value) => Some(value.as_str()),
    }
}
