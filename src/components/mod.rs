pub mod history_modal;
pub mod hotel_service;
pub mod login_form;
pub mod logout_button;
pub mod map_view;
pub mod review_modal;
pub mod review_panel;

use leptos::logging::error;
use leptos::window;

/// Browser alert used for the login and review-save notices.
pub(crate) fn notify(message: &str) {
    if window().alert_with_message(message).is_err() {
        error!("notice failed to display: {message}");
    }
}

/// Opens an external link in a new tab. A blocked popup is the browser's
/// business; only an outright failure is logged.
pub(crate) fn open_in_new_tab(link: &str) {
    if let Err(err) = window().open_with_url_and_target(link, "_blank") {
        error!("failed to open {link}: {err:?}");
    }
}
