//! WebDriver-backed browser sessions
//!
//! Sessions connect to an already running WebDriver server (chromedriver by
//! default) and launch Chrome with the configured options.

use crate::browser::{BrowserSession, SessionFactory};
use crate::config::BrowserConfig;
use crate::{DriverError, DriverResult};
use async_trait::async_trait;
use serde_json::Value;
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities, WindowHandle};

/// WebDriver encoding of the Enter key
const ENTER_KEY: &str = "\u{E007}";

/// Opens Chrome sessions on a WebDriver server
pub struct WebDriverFactory {
    config: BrowserConfig,
}

impl WebDriverFactory {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn capabilities(&self, headless: bool) -> WebDriverResult<ChromeCapabilities> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;

        if headless {
            caps.set_headless()?;
        }

        if let Some(path) = &self.config.chrome_path {
            caps.set_binary(path)?;
        }

        for arg in &self.config.args {
            caps.add_arg(arg)?;
        }

        Ok(caps)
    }
}

#[async_trait]
impl SessionFactory for WebDriverFactory {
    async fn open(&self, headless: bool) -> DriverResult<Box<dyn BrowserSession>> {
        let caps = self
            .capabilities(headless)
            .map_err(|e| DriverError::command("capabilities", e))?;

        tracing::debug!(
            "Connecting to WebDriver at {} (headless: {})",
            self.config.webdriver_url,
            headless
        );

        let driver = WebDriver::new(self.config.webdriver_url.as_str(), caps)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;

        let primary = driver
            .window()
            .await
            .map_err(|e| DriverError::command("window", e))?;

        Ok(Box::new(WebDriverSession {
            driver: Some(driver),
            primary,
        }))
    }
}

/// A Chrome session controlled over WebDriver
pub struct WebDriverSession {
    driver: Option<WebDriver>,
    primary: WindowHandle,
}

impl WebDriverSession {
    fn driver(&self) -> DriverResult<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| DriverError::Session("session already closed".to_string()))
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> DriverResult<()> {
        self.driver()?
            .goto(url)
            .await
            .map_err(|e| DriverError::command("goto", e))
    }

    async fn current_url(&mut self) -> DriverResult<String> {
        self.driver()?
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| DriverError::command("current_url", e))
    }

    async fn execute(&mut self, script: &str) -> DriverResult<Value> {
        let ret = self
            .driver()?
            .execute(script, Vec::new())
            .await
            .map_err(|e| DriverError::command("execute", e))?;
        Ok(ret.json().clone())
    }

    async fn page_source(&mut self) -> DriverResult<String> {
        self.driver()?
            .source()
            .await
            .map_err(|e| DriverError::command("source", e))
    }

    async fn fill_field(&mut self, element_id: &str, text: &str) -> DriverResult<()> {
        let element = self
            .driver()?
            .find(By::Id(element_id))
            .await
            .map_err(|_| DriverError::NoSuchElement(format!("#{}", element_id)))?;
        element
            .send_keys(text)
            .await
            .map_err(|e| DriverError::command("send_keys", e))
    }

    async fn press_enter(&mut self, element_id: &str) -> DriverResult<()> {
        let element = self
            .driver()?
            .find(By::Id(element_id))
            .await
            .map_err(|_| DriverError::NoSuchElement(format!("#{}", element_id)))?;
        element
            .send_keys(ENTER_KEY)
            .await
            .map_err(|e| DriverError::command("send_keys", e))
    }

    async fn open_tab(&mut self) -> DriverResult<()> {
        let driver = self.driver()?;
        let handle = driver
            .new_tab()
            .await
            .map_err(|e| DriverError::command("new_tab", e))?;
        driver
            .switch_to_window(handle)
            .await
            .map_err(|e| DriverError::command("switch_to_window", e))
    }

    async fn close_tab(&mut self) -> DriverResult<()> {
        let primary = self.primary.clone();
        let driver = self.driver()?;
        driver
            .close_window()
            .await
            .map_err(|e| DriverError::command("close_window", e))?;
        driver
            .switch_to_window(primary)
            .await
            .map_err(|e| DriverError::command("switch_to_window", e))
    }

    async fn quit(&mut self) -> DriverResult<()> {
        match self.driver.take() {
            Some(driver) => driver
                .quit()
                .await
                .map_err(|e| DriverError::command("quit", e)),
            None => Ok(()),
        }
    }
}
