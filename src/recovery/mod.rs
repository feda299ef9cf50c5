//! Recovery from anti-automation challenges
//!
//! A challenge is detected when navigation lands somewhere other than the
//! requested profile. Headless workers cannot resolve it and abandon their
//! partition. Interactive workers sign out and back in, then wait until the
//! operator has passed the check and the session is on the landing page.
//!
//! ```text
//! Normal -> ChallengeDetected -> LoggedOut -> AwaitingManualResolution -> Resumed -> Normal
//!                  |
//!                  +-> Abandoned
//! ```

use crate::browser::{login, logout, BrowserSession};
use crate::config::{AccountConfig, SiteConfig};
use crate::notify::{Notifier, MANUAL_CHECK_MESSAGE};
use crate::{Result, ScraperError};
use std::fmt;
use std::time::Duration;

/// Position of a worker's session in the recovery cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryState {
    /// Navigation behaves as expected
    Normal,

    /// Navigation landed on an unexpected page
    ChallengeDetected,

    /// The session was signed out and signed in again
    LoggedOut,

    /// Waiting for the operator to pass the check
    AwaitingManualResolution,

    /// The check was passed; the entry is retried
    Resumed,

    /// No operator can pass the check. Terminal.
    Abandoned,
}

impl RecoveryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ChallengeDetected => "challenge_detected",
            Self::LoggedOut => "logged_out",
            Self::AwaitingManualResolution => "awaiting_manual_resolution",
            Self::Resumed => "resumed",
            Self::Abandoned => "abandoned",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Abandoned)
    }

    /// Returns true if the machine may move from this state to `next`
    pub fn can_transition_to(&self, next: RecoveryState) -> bool {
        use RecoveryState::*;
        matches!(
            (*self, next),
            (Normal, ChallengeDetected)
                | (ChallengeDetected, LoggedOut)
                | (ChallengeDetected, Abandoned)
                | (LoggedOut, AwaitingManualResolution)
                | (AwaitingManualResolution, Resumed)
                | (Resumed, Normal)
        )
    }

    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Normal,
            Self::ChallengeDetected,
            Self::LoggedOut,
            Self::AwaitingManualResolution,
            Self::Resumed,
            Self::Abandoned,
        ]
    }
}

impl fmt::Display for RecoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recovery state of one worker's session
#[derive(Debug, Clone)]
pub struct RecoveryMachine {
    state: RecoveryState,
    interactive: bool,
}

impl RecoveryMachine {
    /// Creates a machine in the `Normal` state
    ///
    /// Only interactive machines attempt manual resolution.
    pub fn new(interactive: bool) -> Self {
        Self {
            state: RecoveryState::Normal,
            interactive,
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    /// Moves to `next`, rejecting edges outside the transition table
    pub fn transition(&mut self, next: RecoveryState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(ScraperError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Recovery: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Records a challenge and escalates or abandons
    ///
    /// Non-interactive machines stop at `Abandoned` without touching the
    /// session. Interactive machines sign the session out and in, then poll
    /// the current location every `poll` until it equals the landing page,
    /// prompting the operator before each wait. Returns the state reached:
    /// `Abandoned` or `Resumed`.
    pub async fn handle_challenge(
        &mut self,
        session: &mut dyn BrowserSession,
        site: &SiteConfig,
        account: &AccountConfig,
        notifier: &dyn Notifier,
        poll: Duration,
    ) -> Result<RecoveryState> {
        self.transition(RecoveryState::ChallengeDetected)?;

        if !self.interactive {
            self.transition(RecoveryState::Abandoned)?;
            return Ok(self.state);
        }

        logout(session, site).await?;
        login(session, site, account).await?;
        self.transition(RecoveryState::LoggedOut)?;

        self.transition(RecoveryState::AwaitingManualResolution)?;
        while session.current_url().await?.trim() != site.landing_url {
            notifier.message(MANUAL_CHECK_MESSAGE).await;
            tokio::time::sleep(poll).await;
        }

        self.transition(RecoveryState::Resumed)?;
        Ok(self.state)
    }

    /// Returns a resumed machine to `Normal` before the entry is retried
    pub fn resume(&mut self) -> Result<()> {
        self.transition(RecoveryState::Normal)
    }

    /// Clears a cycle interrupted by a failed entry
    ///
    /// `Abandoned` is kept: a terminal machine never returns to `Normal`.
    pub fn reset(&mut self) {
        if !self.state.is_terminal() && self.state != RecoveryState::Normal {
            tracing::debug!("Recovery: {} reset to normal", self.state);
            self.state = RecoveryState::Normal;
        }
    }
}
