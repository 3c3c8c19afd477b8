use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::session::Session;

#[component]
pub fn LogoutButton() -> impl IntoView {
    let session = expect_context::<Session>();

    let handle_logout = move |_| {
        spawn_local(async move {
            match api::logout().await {
                Ok(()) => {
                    log!("logged out");
                    session.log_out();
                }
                Err(err) => session.handle_failure("logout", err),
            }
        });
    };

    view! {
        <button class="logout" on:click=handle_logout>
            "Logout"
        </button>
    }
}
