use stayfinder::app::App;

// Client-side entry point, run via `trunk serve`.
pub fn main() {
    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
