//! Session-scoped state: the authenticated card number and the
//! once-per-session transfer-alert flag. Everything here lives in
//! `sessionStorage`, so it is gone when the tab closes.

use crate::Page;

const CARD_KEY: &str = "cardNumber";
const TRANSFER_ALERT_KEY: &str = "transferAlertShown";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

/// The authenticated card number, if any. Absence is the sole
/// authorization gate for every protected page.
pub fn card_number() -> Option<String> {
    let value = storage()?.get_item(CARD_KEY).ok().flatten()?;
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn store_card_number(card: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(CARD_KEY, card);
    }
}

/// Clears the whole session (logout, account deletion).
pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.clear();
    }
}

/// True until the transfer alert has been auto-opened once this session.
pub fn transfer_alert_pending() -> bool {
    match storage() {
        Some(storage) => !matches!(storage.get_item(TRANSFER_ALERT_KEY), Ok(Some(_))),
        None => false,
    }
}

pub fn mark_transfer_alert_shown() {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TRANSFER_ALERT_KEY, "1");
    }
}

/// Single routing guard: a protected page requested without a session
/// resolves to the login page, so the page component is never mounted
/// and no fetch is issued.
pub fn resolve_page(requested: Page, has_session: bool) -> Page {
    if requested.requires_session() && !has_session {
        Page::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_page;
    use crate::Page;

    #[test]
    fn protected_pages_fall_back_to_login_without_session() {
        for page in [Page::Dashboard, Page::Profile, Page::DeleteAccount] {
            assert_eq!(resolve_page(page, false), Page::Login);
            assert_eq!(resolve_page(page, true), page);
        }
    }

    #[test]
    fn public_pages_are_reachable_either_way() {
        for page in [Page::Login, Page::Register] {
            assert_eq!(resolve_page(page, false), page);
            assert_eq!(resolve_page(page, true), page);
        }
    }
}
