/// Top-level view. Owns the session store and gates the two screens on it:
/// the login form while logged out, the hotel service once logged in.
use leptos::*;
use leptos_meta::{provide_meta_context, Title};

use crate::components::hotel_service::HotelService;
use crate::components::login_form::LoginForm;
use crate::components::logout_button::LogoutButton;
use crate::session::Session;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session::new();
    provide_context(session);

    view! {
        <Title text="StayFinder"/>
        <Show when=move || session.is_logged_in()>
            <div class="logout-corner">
                <LogoutButton/>
            </div>
        </Show>
        <div class="page">
            <Show
                when=move || session.is_logged_in()
                fallback=|| view! { <LoginForm/> }
            >
                <HotelService/>
            </Show>
        </div>
        <div class="last-login">
            "Last login time: " {move || session.last_login_time()}
        </div>
    }
}
