#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use stayfinder::app::App;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_in_container(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();

    let parent: web_sys::HtmlElement = container.clone().dyn_into().unwrap();
    leptos::mount_to(parent, || view! { <App/> });
    container
}

#[wasm_bindgen_test]
async fn login_screen_renders_until_authenticated() {
    let container = mount_in_container("login-render-test");
    sleep(Duration::from_millis(50)).await;

    assert!(container
        .query_selector("input[type='password']")
        .unwrap()
        .is_some());
    // No logout control and no search card before login.
    assert!(container.query_selector(".logout").unwrap().is_none());
    assert!(container.query_selector(".search-card").unwrap().is_none());

    container.remove();
}

#[wasm_bindgen_test]
async fn invalid_credentials_are_blocked_before_any_network_call() {
    let container = mount_in_container("login-validate-test");
    sleep(Duration::from_millis(50)).await;

    // Type an invalid username and password, then submit the form.
    js_sys::eval(
        r#"
        (function() {
            const container = document.getElementById('login-validate-test');
            const inputs = container.querySelectorAll('form input');
            const setter = Object.getOwnPropertyDescriptor(
                window.HTMLInputElement.prototype, 'value').set;
            setter.call(inputs[0], 'x');
            inputs[0].dispatchEvent(new Event('input', { bubbles: true }));
            setter.call(inputs[1], 'short');
            inputs[1].dispatchEvent(new Event('input', { bubbles: true }));
            container.querySelector("form button[type='submit']").click();
        })();
        "#,
    )
    .unwrap();
    sleep(Duration::from_millis(100)).await;

    assert!(
        container.query_selector(".field-error").unwrap().is_some(),
        "validation message should be shown"
    );
    // Still on the login screen.
    assert!(container.query_selector(".search-card").unwrap().is_none());

    container.remove();
}
