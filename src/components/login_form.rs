use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError};
use crate::components::notify;
use crate::session::Session;
use crate::validate;

/// Login/register form. The same form submits to either endpoint; which one
/// is decided by the button used. Validation failures block submission and
/// are the only field-level errors shown to the user.
#[component]
pub fn LoginForm() -> impl IntoView {
    let session = expect_context::<Session>();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (username_error, set_username_error) = create_signal(None::<String>);
    let (password_error, set_password_error) = create_signal(None::<String>);
    let (is_login, set_is_login) = create_signal(true);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let user = username.get();
        let pass = password.get();

        let user_check = validate::username(&user);
        let pass_check = validate::password(&pass);
        set_username_error.set(user_check.err());
        set_password_error.set(pass_check.err());
        if username_error.get().is_some() || password_error.get().is_some() {
            return;
        }

        let login = is_login.get();
        spawn_local(async move {
            if login {
                match api::login(&user, &pass).await {
                    Ok(last_login_time) => {
                        log!("logged in as {user}");
                        session.log_in(user, last_login_time);
                    }
                    Err(err @ ApiError::Forbidden) => session.handle_failure("login", err),
                    Err(err) => {
                        error!("login failed: {err}");
                        notify("Failed to login/register");
                    }
                }
            } else {
                match api::register(&user, &pass).await {
                    Ok(()) => notify("Successfully registered"),
                    Err(err @ ApiError::Forbidden) => session.handle_failure("register", err),
                    Err(err) => {
                        error!("register failed: {err}");
                        notify("Failed to login/register");
                    }
                }
            }
        });
    };

    view! {
        <div class="login-screen">
            <form class="card login-card" on:submit=handle_submit>
                <label class="field">
                    "Username"
                    <input
                        type="text"
                        placeholder="Harry"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                {move || username_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                <label class="field">
                    "Password"
                    <input
                        type="password"
                        placeholder="*#123Abc"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <p class="field-hint">
                    "Password must contain at least one uppercase letter, one lowercase \
                     letter, one number, and one special character."
                </p>
                {move || password_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                <div class="button-row">
                    <button type="submit" on:click=move |_| set_is_login.set(true)>
                        "Login"
                    </button>
                    <button type="submit" on:click=move |_| set_is_login.set(false)>
                        "Register"
                    </button>
                </div>
            </form>
        </div>
    }
}
