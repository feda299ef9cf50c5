//! Scripts run in the profile tab
//!
//! Each script is self-contained and either returns a JSON value or
//! performs a single click. A missing element makes the script throw, which
//! surfaces as a driver error on the caller's side.

pub const CLICK_CONTACT_INFO: &str =
    "document.querySelector(\"a[data-control-name='contact_see_more']\").click();";

pub const READ_EMAIL: &str = "return document.getElementsByClassName('pv-contact-info__contact-type ci-email')[0].children[2].children[0].innerText;";

pub const DISMISS_MODAL: &str =
    "document.getElementsByClassName('artdeco-modal__dismiss')[0].click();";

pub const WINDOW_HEIGHT: &str = "return window.innerHeight;";

pub const PAGE_HEIGHT: &str = "return document.body.offsetHeight;";

pub const CLICK_SEE_MORE: &str =
    "document.getElementsByClassName('pv-profile-section__see-more-inline')[0].click();";

pub const CLICK_ADDITIONAL_SKILLS: &str =
    "document.getElementsByClassName('pv-skills-section__additional-skills')[0].click();";

pub const READ_SKILLS: &str = "return Array.from(document.getElementsByClassName('pv-skill-category-entity__name-text')).map(e => e.innerText.trim());";

/// Scrolls the window so that its top sits at `offset` pixels
pub fn scroll_to(offset: i64) -> String {
    format!("window.scrollTo(0, {});", offset)
}
