use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Profile-Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account: AccountConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Credentials used to authenticate each browser session
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub username: String,
    pub password: String,
}

/// Well-known addresses on the target site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Login form page
    #[serde(rename = "login-url", default = "default_login_url")]
    pub login_url: String,

    /// Navigating here ends the authenticated session
    #[serde(rename = "logout-url", default = "default_logout_url")]
    pub logout_url: String,

    /// Where an authenticated session lands after login
    #[serde(rename = "landing-url", default = "default_landing_url")]
    pub landing_url: String,

    /// Where removed profiles redirect to
    #[serde(rename = "unavailable-url", default = "default_unavailable_url")]
    pub unavailable_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            logout_url: default_logout_url(),
            landing_url: default_landing_url(),
            unavailable_url: default_unavailable_url(),
        }
    }
}

fn default_login_url() -> String {
    "https://www.linkedin.com/uas/login".to_string()
}

fn default_logout_url() -> String {
    "https://www.linkedin.com/m/logout".to_string()
}

fn default_landing_url() -> String {
    "https://www.linkedin.com/feed/".to_string()
}

fn default_unavailable_url() -> String {
    "https://www.linkedin.com/in/unavailable/".to_string()
}

/// WebDriver connection and browser launch options
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Address of the running WebDriver server (e.g. chromedriver)
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Optional override of the browser binary
    #[serde(rename = "chrome-path", default)]
    pub chrome_path: Option<String>,

    /// Extra command-line arguments passed to the browser
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            chrome_path: None,
            args: Vec::new(),
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

/// Worker pool and timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Number of parallel workers in headless mode
    pub workers: u32,

    /// Separates the profile address from the graduation date in an entry
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Settling delay after actions that trigger asynchronous loads (milliseconds)
    #[serde(rename = "loading-pause-ms", default = "default_loading_pause_ms")]
    pub loading_pause_ms: u64,

    /// Delay between lazy-load scroll steps (milliseconds)
    #[serde(rename = "scroll-pause-ms", default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    /// Interval between checks while waiting for a manual check (seconds)
    #[serde(rename = "manual-check-poll-secs", default = "default_poll_secs")]
    pub manual_check_poll_secs: u64,
}

impl ScraperConfig {
    pub fn loading_pause(&self) -> Duration {
        Duration::from_millis(self.loading_pause_ms)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn manual_check_poll(&self) -> Duration {
        Duration::from_secs(self.manual_check_poll_secs)
    }
}

fn default_delimiter() -> String {
    ":::".to_string()
}

fn default_loading_pause_ms() -> u64 {
    2000
}

fn default_scroll_pause_ms() -> u64 {
    1000
}

fn default_poll_secs() -> u64 {
    30
}

/// Input and output files
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// One entry per line
    #[serde(rename = "input-file")]
    pub input_file: String,

    /// Path of the CSV export
    #[serde(rename = "output-file")]
    pub output_file: String,

    /// Insert a unix timestamp before the export's extension
    #[serde(rename = "append-timestamp", default)]
    pub append_timestamp: bool,

    /// File receiving full details of unanticipated failures
    #[serde(rename = "error-log", default = "default_error_log")]
    pub error_log: String,
}

fn default_error_log() -> String {
    "errlog.txt".to_string()
}

/// User-facing notification options
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Speak notifications aloud in addition to printing them
    #[serde(default)]
    pub speak: bool,

    /// Text-to-speech program invoked with the message as its argument
    #[serde(rename = "speech-command", default = "default_speech_command")]
    pub speech_command: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            speak: false,
            speech_command: default_speech_command(),
        }
    }
}

fn default_speech_command() -> String {
    "espeak".to_string()
}
