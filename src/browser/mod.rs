//! Browser automation seam
//!
//! The scraper only talks to the browser through [`BrowserSession`], a narrow
//! view of a WebDriver session: navigation, location queries, script
//! execution, page source, form input, and a single secondary tab. Each
//! worker owns exactly one session for its whole run.

mod auth;
mod webdriver;

pub use auth::{login, logout};
pub use webdriver::{WebDriverFactory, WebDriverSession};

use crate::DriverResult;
use async_trait::async_trait;
use serde_json::Value;

/// One exclusive browser session
///
/// Implementations are driven from a single worker task at a time and never
/// shared across workers.
#[async_trait]
pub trait BrowserSession: Send {
    /// Loads the address in the focused tab and waits for navigation to settle
    async fn navigate(&mut self, url: &str) -> DriverResult<()>;

    /// Address currently shown in the focused tab
    async fn current_url(&mut self) -> DriverResult<String>;

    /// Runs a script in the focused tab and returns its JSON result
    async fn execute(&mut self, script: &str) -> DriverResult<Value>;

    /// Rendered HTML of the focused tab
    async fn page_source(&mut self) -> DriverResult<String>;

    /// Types text into the element with the given id
    async fn fill_field(&mut self, element_id: &str, text: &str) -> DriverResult<()>;

    /// Sends an Enter key press to the element with the given id
    async fn press_enter(&mut self, element_id: &str) -> DriverResult<()>;

    /// Opens a secondary tab and focuses it
    async fn open_tab(&mut self) -> DriverResult<()>;

    /// Closes the focused secondary tab and refocuses the primary one
    async fn close_tab(&mut self) -> DriverResult<()>;

    /// Ends the session and releases the browser
    async fn quit(&mut self) -> DriverResult<()>;
}

/// Creates browser sessions for workers
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Opens a new session; `headless` disables the visible window
    async fn open(&self, headless: bool) -> DriverResult<Box<dyn BrowserSession>>;
}
