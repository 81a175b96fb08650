use crate::client::{ReleaseClient, RepoCoordinates};
use crate::config::{PrebunConfig, RuntimeSpec};
use crate::resolve_error::PrebunResolveError;
use serde::Serialize;
use starbase_styles::color;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument, trace, warn};
use version_spec::{MajorRange, Version, max_satisfying};

/// Mapping of every parsable release version to the tag it was published
/// under. When multiple tags parse to the same version, the last one wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReleaseTagMap(BTreeMap<Version, String>);

impl ReleaseTagMap {
    /// Build a map from raw tags, skipping any that are not versions.
    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut map = Self::default();

        for tag in tags {
            map.insert_tag(tag.as_ref());
        }

        map
    }

    pub fn insert(&mut self, version: Version, tag: impl AsRef<str>) {
        self.0.insert(version, tag.as_ref().to_owned());
    }

    /// Insert a tag if it parses as a version, returning true when inserted.
    pub fn insert_tag(&mut self, tag: &str) -> bool {
        match Version::parse(tag) {
            Some(version) => {
                self.insert(version, tag);
                true
            }
            None => {
                trace!(tag, "Skipping release, tag is not a version");
                false
            }
        }
    }

    pub fn get(&self, version: &Version) -> Option<&str> {
        self.0.get(version).map(|tag| tag.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.0.keys()
    }
}

/// A version chosen for installation, and the upstream tag it came from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedRelease {
    pub version: Version,
    pub tag: String,
}

impl fmt::Display for ResolvedRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.tag)
    }
}

/// Page through every release of the repository and collect the versioned tags.
#[instrument(skip(client))]
pub async fn list_release_versions(
    client: &dyn ReleaseClient,
    repo: &RepoCoordinates,
) -> Result<ReleaseTagMap, PrebunResolveError> {
    debug!(repo = %repo, "Loading available releases");

    let mut map = ReleaseTagMap::default();
    let mut page = 1;

    loop {
        let result = client.list_releases_page(repo, page).await?;
        let count = result.releases.len();

        trace!(page, count, "Loaded releases page");

        for release in result.releases {
            map.insert_tag(&release.tag_name);
        }

        // An empty page ends pagination even if more are advertised
        if !result.has_next || count == 0 {
            break;
        }

        page += 1;
    }

    if map.is_empty() {
        return Err(PrebunResolveError::NoReleases {
            repo: repo.to_string(),
        });
    }

    debug!(repo = %repo, count = map.len(), "Loaded release versions");

    Ok(map)
}

/// Select the highest version in the map that satisfies the range.
pub fn resolve_target(
    map: &ReleaseTagMap,
    range: &MajorRange,
    repo: &RepoCoordinates,
) -> Result<ResolvedRelease, PrebunResolveError> {
    let no_match = || PrebunResolveError::NoMatchingVersion {
        repo: repo.to_string(),
        range: range.to_string(),
    };

    let version = max_satisfying(map.versions(), range).ok_or_else(no_match)?;
    let tag = map.get(&version).ok_or_else(no_match)?.to_owned();

    debug!(
        range = %range,
        version = %version,
        "Resolved release {}",
        color::id(&tag)
    );

    Ok(ResolvedRelease { version, tag })
}

/// Resolve a runtime identifier (like `bun1`) to a release. Pinned runtimes
/// never touch the network.
#[instrument(skip(client, config))]
pub async fn resolve_runtime(
    client: &dyn ReleaseClient,
    config: &PrebunConfig,
    runtime: &str,
) -> Result<ResolvedRelease, PrebunResolveError> {
    let Some(spec) = config.runtimes.get(runtime) else {
        return Err(PrebunResolveError::UnknownRuntime {
            runtime: runtime.to_owned(),
            known: config.runtimes.keys().cloned().collect(),
        });
    };

    resolve_runtime_spec(client, config, runtime, spec).await
}

pub async fn resolve_runtime_spec(
    client: &dyn ReleaseClient,
    config: &PrebunConfig,
    runtime: &str,
    spec: &RuntimeSpec,
) -> Result<ResolvedRelease, PrebunResolveError> {
    match spec {
        RuntimeSpec::Pinned {
            version,
            tag,
            deprecated,
        } => {
            if *deprecated {
                warn!(
                    "The {} runtime is deprecated and pinned to {}, migrate to a newer runtime",
                    color::id(runtime),
                    color::hash(version.to_string()),
                );
            }

            Ok(ResolvedRelease {
                version: *version,
                tag: tag.to_owned(),
            })
        }
        RuntimeSpec::Range(range) => {
            let map = list_release_versions(client, &config.repository).await?;

            resolve_target(&map, range, &config.repository)
        }
    }
}
