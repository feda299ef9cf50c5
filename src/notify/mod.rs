//! User-facing notifications
//!
//! Messages are printed to the console and logged. With `speak` enabled
//! they are also read aloud by an external text-to-speech program, which is
//! how an operator away from the terminal learns that a manual check is
//! waiting.

use crate::config::NotifyConfig;
use async_trait::async_trait;
use std::process::Stdio;

/// Asked to execute a manual check while recovery waits
pub const MANUAL_CHECK_MESSAGE: &str = "Please execute manual check";

/// Final message of an uninterrupted run
pub const SUCCESS_MESSAGE: &str = "Scraping successfully ended.";

/// Final message when at least one partition was abandoned
pub const INTERRUPTED_MESSAGE: &str = "The scraping didnt end correctly due to Human Check. \
The export was generated but it will contain some entries reporting an error string.";

/// Receives messages meant for the operator
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn message(&self, text: &str);
}

/// Prints messages and optionally speaks them
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    speech_command: Option<String>,
}

impl ConsoleNotifier {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            speech_command: config.speak.then(|| config.speech_command.clone()),
        }
    }

    async fn speak(&self, command: &str, text: &str) {
        let status = tokio::process::Command::new(command)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!("Speech command '{}' exited with {}", command, status),
            Err(e) => tracing::warn!("Failed to run speech command '{}': {}", command, e),
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn message(&self, text: &str) {
        println!("{}", text);
        tracing::info!("{}", text);

        if let Some(command) = &self.speech_command {
            self.speak(command, text).await;
        }
    }
}
