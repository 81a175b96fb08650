pub use super::rewrite_error::PrebunRewriteError;
use crate::client::ReleaseClient;
use crate::config::{Avx2Policy, PrebunConfig};
use crate::dispatcher::{DispatcherContext, validate_relative_path};
use crate::installer::Installer;
use crate::layout::{InstallLayout, ScriptLayout};
use crate::manifest::{ActionManifest, find_manifest};
use crate::manifest_error::PrebunManifestError;
use crate::process::exec_command_piped;
use crate::release_resolver::{ResolvedRelease, resolve_runtime};
use crate::target::PlatformKey;
use starbase_styles::color;
use starbase_utils::fs;
use std::path::{Path, PathBuf};
use system_env::{FeatureSupport, RuntimeContext, SystemArch, query_avx2};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct RewriteReport {
    pub manifest: PathBuf,
    pub release: ResolvedRelease,

    /// Platform directories installed during this run.
    pub installed: Vec<PathBuf>,

    /// Platform directories that already held the release.
    pub reused: Vec<PathBuf>,

    pub scripts: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum RewriteOutcome {
    Rewritten(RewriteReport),

    /// The manifest is not a rewritable action and was left untouched.
    Skipped { manifest: PathBuf, reason: String },
}

/// Rewrites an action that runs on a custom runtime to run on the
/// standard runtime through dispatcher scripts.
pub struct Rewriter<'app> {
    pub client: &'app dyn ReleaseClient,
    pub config: &'app PrebunConfig,
    pub context: &'app RuntimeContext,
    pub git_add: bool,
}

impl<'app> Rewriter<'app> {
    pub fn new(
        config: &'app PrebunConfig,
        context: &'app RuntimeContext,
        client: &'app dyn ReleaseClient,
    ) -> Self {
        Self {
            client,
            config,
            context,
            git_add: false,
        }
    }

    pub fn with_git_add(mut self, git_add: bool) -> Self {
        self.git_add = git_add;
        self
    }

    #[instrument(skip(self))]
    pub async fn rewrite(&self, root: &Path) -> Result<RewriteOutcome, PrebunRewriteError> {
        self.config.validate()?;

        let manifest_path = find_manifest(root)?;
        let action_root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        let mut manifest = match ActionManifest::load(&manifest_path) {
            Ok(manifest) => manifest,
            Err(error) if error.is_shape_problem() => return Ok(skip(manifest_path, error)),
            Err(error) => return Err(error.into()),
        };

        let runs = match manifest.validate_runs(&self.config.runtime_names()) {
            Ok(runs) => runs,
            Err(error) if error.is_shape_problem() => return Ok(skip(manifest_path, error)),
            Err(error) => return Err(error.into()),
        };

        let stages = runs.stages();

        for (stage, file) in &stages {
            validate_relative_path(*stage, file)?;
        }

        let release = resolve_runtime(self.client, self.config, &runs.using).await?;
        let layout = InstallLayout::new(&action_root, &self.config.tool);
        let (installed, reused) = self.install_permutations(&layout, &release).await?;

        let mut scripts = vec![];
        let mut stage_paths = vec![];

        for (stage, file) in stages {
            let script_path = layout.script_path(self.config.layout, stage);

            DispatcherContext::new(stage, file, &release.version, self.config.layout)
                .with_tool(&self.config.tool)
                .write_script(&script_path)?;

            stage_paths.push((
                stage,
                self.config
                    .layout
                    .script_relative_path(stage, &self.config.tool),
            ));
            scripts.push(script_path);
        }

        manifest.rewrite_runs(&self.config.standard_runtime, &stage_paths)?;
        manifest.save(&manifest_path)?;

        if self.git_add {
            self.stage_files(&action_root, &manifest_path, &layout, &scripts)
                .await?;
        }

        info!(
            "Rewrote {} to run {} with {} {}",
            color::path(&manifest_path),
            color::id(&self.config.standard_runtime),
            self.config.tool,
            color::hash(release.version.to_string()),
        );

        Ok(RewriteOutcome::Rewritten(RewriteReport {
            manifest: manifest_path,
            release,
            installed,
            reused,
            scripts,
        }))
    }

    /// Install the release for every configured platform, one after another.
    /// Platforms already holding the release are left alone.
    async fn install_permutations(
        &self,
        layout: &InstallLayout,
        release: &ResolvedRelease,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>), PrebunRewriteError> {
        let avx2 = self.detect_avx2().await;
        let keys = self
            .config
            .permutations
            .iter()
            .map(|(os, arch)| {
                PlatformKey::new(*os, *arch)
                    .with_avx2(avx2)
                    .with_variant(self.config.variant)
            })
            .collect::<Vec<_>>();

        // Map every platform up front so nothing is downloaded for an unsupported matrix
        for key in &keys {
            key.to_target()?;
        }

        let installer = Installer::new(self.config, self.context);
        let mut installed = vec![];
        let mut reused = vec![];

        for key in &keys {
            let dest_dir = layout.platform_dir(key.os, key.arch);

            if installer.is_installed(&dest_dir, &release.tag) {
                debug!(
                    dest_dir = ?dest_dir,
                    "{} {} already installed, skipping",
                    self.config.tool,
                    color::id(&release.tag),
                );

                reused.push(dest_dir);
                continue;
            }

            if dest_dir.exists() {
                debug!(dest_dir = ?dest_dir, "Removing stale install");

                fs::remove_dir_all(&dest_dir)?;
            }

            installer
                .install(self.client, &dest_dir, &release.tag, key)
                .await?;

            installed.push(dest_dir);
        }

        Ok((installed, reused))
    }

    async fn detect_avx2(&self) -> Option<bool> {
        if self
            .config
            .permutations
            .iter()
            .all(|(_, arch)| *arch != SystemArch::X64)
        {
            return None;
        }

        let support = if self.config.avx2 == Avx2Policy::Auto {
            let os = self.context.os;

            // The query may spawn processes and wait, keep it off the runtime threads
            tokio::task::spawn_blocking(move || query_avx2(os))
                .await
                .unwrap_or(FeatureSupport::Unknown)
        } else {
            FeatureSupport::Unknown
        };

        Some(self.config.avx2.resolve(|| support))
    }

    async fn stage_files(
        &self,
        action_root: &Path,
        manifest_path: &Path,
        layout: &InstallLayout,
        scripts: &[PathBuf],
    ) -> Result<(), PrebunRewriteError> {
        let mut paths = vec![manifest_path.to_path_buf(), layout.tool_dir()];

        if self.config.layout == ScriptLayout::Flat {
            paths.extend(scripts.iter().cloned());
        }

        for path in paths {
            debug!("Staging {} with git", color::path(&path));

            let mut command = Command::new("git");
            command.args(["add", "-f"]).arg(&path).current_dir(action_root);

            exec_command_piped(&mut command).await?;
        }

        Ok(())
    }
}

fn skip(manifest: PathBuf, error: PrebunManifestError) -> RewriteOutcome {
    let reason = error.to_string();

    warn!(manifest = ?manifest, "{reason} Leaving the action unmodified");

    RewriteOutcome::Skipped { manifest, reason }
}
