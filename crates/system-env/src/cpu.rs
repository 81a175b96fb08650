use crate::env::SystemOS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Maximum time to wait on a CPU feature query before giving up.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

static AVX2_FLAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bavx2\b").unwrap());

/// Result of querying the host CPU for an instruction set extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeatureSupport {
    Supported,
    Unsupported,
    Unknown,
}

impl FeatureSupport {
    /// Collapse into a boolean, using `default` when the query was inconclusive.
    pub fn or_assume(self, default: bool) -> bool {
        match self {
            Self::Supported => true,
            Self::Unsupported => false,
            Self::Unknown => default,
        }
    }
}

impl From<Option<bool>> for FeatureSupport {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Supported,
            Some(false) => Self::Unsupported,
            None => Self::Unknown,
        }
    }
}

/// Return true if the provided CPU feature listing (`/proc/cpuinfo`,
/// `sysctl` output, etc) contains the AVX2 flag.
pub fn has_avx2_flag(text: &str) -> bool {
    AVX2_FLAG.is_match(text)
}

/// Query the host CPU for AVX2 using [`QUERY_TIMEOUT`].
pub fn query_avx2(os: SystemOS) -> FeatureSupport {
    query_avx2_with_timeout(os, QUERY_TIMEOUT)
}

/// Query the host CPU for AVX2. The query runs on a separate thread,
/// and if it does not finish within `timeout` the result is unknown.
pub fn query_avx2_with_timeout(os: SystemOS, timeout: Duration) -> FeatureSupport {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let _ = tx.send(detect_avx2(os));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            let support = FeatureSupport::from(result);

            debug!(os = %os, support = ?support, "Queried CPU for AVX2");

            support
        }
        Err(_) => {
            warn!(
                os = %os,
                "Timed out after {}ms querying CPU for AVX2",
                timeout.as_millis()
            );

            FeatureSupport::Unknown
        }
    }
}

fn detect_avx2(os: SystemOS) -> Option<bool> {
    match os {
        SystemOS::Linux => {
            let info = std::fs::read_to_string("/proc/cpuinfo").ok()?;

            Some(has_avx2_flag(&info))
        }
        SystemOS::MacOS => {
            let output = Command::new("sysctl")
                .args(["-n", "machdep.cpu.features", "machdep.cpu.leaf7_features"])
                .output()
                .ok()?;

            // Apple Silicon has no such keys, so an empty listing is inconclusive
            let text = String::from_utf8_lossy(&output.stdout);

            trace!(output = %text.trim(), "Read sysctl CPU features");

            if text.trim().is_empty() {
                None
            } else {
                Some(has_avx2_flag(&text))
            }
        }
        SystemOS::Windows => detect_avx2_native(),
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_avx2_native() -> Option<bool> {
    Some(std::arch::is_x86_feature_detected!("avx2"))
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn detect_avx2_native() -> Option<bool> {
    None
}
