#![allow(dead_code)]

use prebun_core::*;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const EXE_CONTENT: &[u8] = b"#!/bin/sh\necho bun\n";

/// In-memory releases API that counts every request it serves.
#[derive(Default)]
pub struct MockReleaseClient {
    pub pages: Vec<Vec<String>>,
    pub archives: HashMap<String, Vec<u8>>,
    list_calls: AtomicUsize,
    download_calls: AtomicUsize,
}

impl MockReleaseClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, tags: &[&str]) -> Self {
        self.pages
            .push(tags.iter().map(|tag| tag.to_string()).collect());
        self
    }

    pub fn with_archive(mut self, url: impl AsRef<str>, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.as_ref().to_owned(), bytes);
        self
    }

    /// Serve an archive for every configured platform of the release.
    pub fn with_release_archives(mut self, config: &PrebunConfig, tag: &str, avx2: bool) -> Self {
        let installer = Installer {
            download_url: config.release_download_url(),
            temp_dir: Default::default(),
            tool: config.tool.clone(),
        };

        for (os, arch) in &config.permutations {
            let key = PlatformKey::new(*os, *arch)
                .with_avx2(Some(avx2))
                .with_variant(config.variant);
            let target = key.to_target().unwrap();

            self.archives.insert(
                installer.get_download_url(tag, &target),
                create_zip(
                    &target.archive_dir_name(&config.tool),
                    &target.exe_name(&config.tool, *os),
                ),
            );
        }

        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.list_calls() + self.download_calls()
    }
}

#[async_trait]
impl ReleaseClient for MockReleaseClient {
    async fn list_releases_page(
        &self,
        _repo: &RepoCoordinates,
        page: usize,
    ) -> Result<ReleasePage, PrebunClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let releases = self
            .pages
            .get(page - 1)
            .map(|tags| {
                tags.iter()
                    .map(|tag| GitHubRelease {
                        tag_name: tag.to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ReleasePage {
            releases,
            has_next: page < self.pages.len(),
        })
    }

    async fn download_file(&self, url: &str, dest_file: &Path) -> Result<(), PrebunClientError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);

        let Some(bytes) = self.archives.get(url) else {
            return Err(PrebunClientError::NotFound {
                url: url.to_owned(),
            });
        };

        std::fs::create_dir_all(dest_file.parent().unwrap()).unwrap();
        std::fs::write(dest_file, bytes).unwrap();

        Ok(())
    }
}

/// Build a zip laid out like an upstream artifact: `<dir>/<exe>`.
pub fn create_zip(dir_name: &str, exe_name: &str) -> Vec<u8> {
    let path = format!("{dir_name}/{exe_name}");

    create_zip_with_files(&[(path.as_str(), EXE_CONTENT)])
}

pub fn create_zip_with_files(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());

    {
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }

        zip.finish().unwrap();
    }

    buffer.into_inner()
}

pub fn write_action(root: &Path, content: &str) {
    std::fs::write(root.join("action.yml"), content).unwrap();
}

pub fn read_action(root: &Path) -> String {
    std::fs::read_to_string(root.join("action.yml")).unwrap()
}

pub fn create_context(root: &Path) -> system_env::RuntimeContext {
    system_env::RuntimeContext::new(
        system_env::SystemOS::Linux,
        system_env::SystemArch::X64,
        root.join(".tmp"),
    )
}

pub fn create_config() -> PrebunConfig {
    PrebunConfig {
        avx2: Avx2Policy::Always,
        ..PrebunConfig::default()
    }
}
