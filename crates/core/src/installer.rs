use crate::client::ReleaseClient;
use crate::client_error::PrebunClientError;
use crate::config::PrebunConfig;
use crate::install_error::PrebunInstallError;
use crate::layout::RELEASE_TAG_FILE;
use crate::target::{PlatformKey, TargetId};
use starbase_archive::Archiver;
use starbase_styles::color;
use starbase_utils::fs;
use std::path::{Path, PathBuf};
use system_env::RuntimeContext;
use tracing::{debug, instrument, trace};

/// Downloads release archives and installs the executable into a
/// platform directory, laid out as `<dest>/bin/<tool>`.
#[derive(Clone, Debug)]
pub struct Installer {
    /// Base URL that tags and artifacts are appended to.
    pub download_url: String,

    /// Where archives are downloaded to before unpacking.
    pub temp_dir: PathBuf,

    pub tool: String,
}

impl Installer {
    pub fn new(config: &PrebunConfig, context: &RuntimeContext) -> Self {
        Self {
            download_url: config.release_download_url(),
            temp_dir: context.temp_dir.join("prebun"),
            tool: config.tool.clone(),
        }
    }

    pub fn get_download_url(&self, tag: &str, target: &TargetId) -> String {
        format!(
            "{}/{tag}/{}",
            self.download_url.trim_end_matches('/'),
            target.archive_file_name(&self.tool)
        )
    }

    /// Return true if the destination holds an executable installed
    /// from the same release tag.
    pub fn is_installed(&self, dest_dir: &Path, tag: &str) -> bool {
        let bin_dir = dest_dir.join("bin");
        let has_exe = bin_dir.join(&self.tool).is_file()
            || bin_dir.join(format!("{}.exe", self.tool)).is_file();

        has_exe
            && fs::read_file(dest_dir.join(RELEASE_TAG_FILE))
                .is_ok_and(|installed| installed.trim() == tag)
    }

    /// Download, unpack, and relocate the executable for a platform.
    /// Returns the path to the installed executable.
    #[instrument(skip(self, client))]
    pub async fn install(
        &self,
        client: &dyn ReleaseClient,
        dest_dir: &Path,
        tag: &str,
        key: &PlatformKey,
    ) -> Result<PathBuf, PrebunInstallError> {
        let target = key.to_target()?;
        let download_url = self.get_download_url(tag, &target);
        let archive_file = self
            .temp_dir
            .join(tag)
            .join(target.archive_file_name(&self.tool));

        debug!(
            target = target.as_str(),
            tag,
            dest_dir = ?dest_dir,
            "Installing {} from {}",
            self.tool,
            color::url(&download_url),
        );

        client
            .download_file(&download_url, &archive_file)
            .await
            .map_err(|error| match error {
                PrebunClientError::NotFound { url } => PrebunInstallError::DownloadNotFound { url },
                error => PrebunInstallError::DownloadFailed {
                    url: download_url.clone(),
                    error: Box::new(error),
                },
            })?;

        let bin_dir = dest_dir.join("bin");

        trace!(
            source = ?archive_file,
            target = ?bin_dir,
            "Unpacking downloaded archive"
        );

        fs::create_dir_all(&bin_dir)?;

        Archiver::new(&bin_dir, &archive_file)
            .unpack_from_ext()
            .map_err(|error| PrebunInstallError::ExtractFailed {
                archive: archive_file.clone(),
                error,
            })?;

        let extracted_dir = bin_dir.join(target.archive_dir_name(&self.tool));
        let source_exe = extracted_dir.join(target.exe_name(&self.tool, key.os));
        let exe_path = bin_dir.join(key.os.get_exe_name(&self.tool));

        trace!(
            source = ?source_exe,
            target = ?exe_path,
            "Moving unpacked executable into place"
        );

        if !source_exe.is_file() {
            return Err(PrebunInstallError::MissingExecutable { path: source_exe });
        }

        fs::rename(&source_exe, &exe_path)?;
        fs::update_perms(&exe_path, None)?;
        fs::remove(&extracted_dir)?;
        fs::remove(&archive_file)?;
        fs::write_file(dest_dir.join(RELEASE_TAG_FILE), tag)?;

        debug!(
            exe = ?exe_path,
            "Installed {} {}",
            self.tool,
            color::id(tag)
        );

        Ok(exe_path)
    }
}
