use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client settings, filled from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    pub timeout: Duration,
    /// Where the consent record lives; `None` means the user data dir.
    pub consent_file: Option<PathBuf>,
    pub max_files_per_request: usize,
    pub max_file_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            consent_file: None,
            max_files_per_request: 10,
            max_file_size: 100 * 1024 * 1024,
        }
    }
}
