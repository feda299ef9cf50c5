//! Login and logout against the target site

use crate::browser::BrowserSession;
use crate::config::{AccountConfig, SiteConfig};
use crate::DriverResult;

/// Element ids of the login form
const USERNAME_FIELD: &str = "username";
const PASSWORD_FIELD: &str = "password";

/// Signs the session in with the configured account
///
/// A failed form submission is only logged: the caller verifies the landing
/// location separately and waits for manual resolution when needed.
pub async fn login(
    session: &mut dyn BrowserSession,
    site: &SiteConfig,
    account: &AccountConfig,
) -> DriverResult<()> {
    tracing::debug!("Opening login page {}", site.login_url);
    session.navigate(&site.login_url).await?;

    session.fill_field(USERNAME_FIELD, &account.username).await?;
    session.fill_field(PASSWORD_FIELD, &account.password).await?;

    if let Err(e) = session.press_enter(PASSWORD_FIELD).await {
        tracing::warn!("Login form submission failed: {}", e);
    }

    Ok(())
}

/// Signs the session out
pub async fn logout(session: &mut dyn BrowserSession, site: &SiteConfig) -> DriverResult<()> {
    tracing::debug!("Logging out via {}", site.logout_url);
    session.navigate(&site.logout_url).await
}
