use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::api;
use crate::components::history_modal::HistoryModal;
use crate::components::map_view::MapView;
use crate::components::review_panel::ReviewPanel;
use crate::like::{LikeReconciler, LikeSubject};
use crate::models::hotel::Hotel;
use crate::reviews::ReviewStore;
use crate::session::Session;
use crate::validate;

/// The logged-in screen. Owns the shared state: the hotel list, the review
/// store for the selected hotel, and the like reconciler. Children receive
/// copies of the store handles and request changes through them; nothing
/// below this component mutates shared state directly.
#[component]
pub fn HotelService() -> impl IntoView {
    let session = expect_context::<Session>();

    let (hotels, set_hotels) = create_signal(Vec::<Hotel>::new());
    let (selected, set_selected) = create_signal(None::<Hotel>);
    let (search, set_search) = create_signal(String::new());
    let (search_error, set_search_error) = create_signal(None::<String>);
    let (history_open, set_history_open) = create_signal(false);

    let store = ReviewStore::new();
    let likes = LikeReconciler::new(session, store.reviews);
    let results_ref = create_node_ref::<html::Div>();

    // The liked-hotel id set is fetched once per session, when this view
    // mounts.
    spawn_local(async move {
        match api::fetch_liked_hotels(&session.username()).await {
            Ok(ids) => likes.seed_hotels(ids),
            Err(err) => session.handle_failure("liked-hotels fetch", err),
        }
    });

    let handle_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        let term = search.get();
        if let Err(msg) = validate::search_term(&term) {
            set_search_error.set(Some(msg));
            return;
        }
        set_search_error.set(None);
        spawn_local(async move {
            match api::search_hotels(&term).await {
                Ok(found) => {
                    log!("search for {term:?} returned {} hotels", found.len());
                    set_hotels.set(found);
                }
                // A failed search leaves the previous list untouched.
                Err(err) => session.handle_failure("hotel search", err),
            }
        });
    };

    // Scroll the results region into view whenever a search lands.
    create_effect(move |_| {
        if !hotels.get().is_empty() {
            if let Some(results) = results_ref.get() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                results.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    });

    let select_hotel = Callback::new(move |hotel: Hotel| {
        log!("selected hotel {}", hotel.hotel_id);
        store.open(&hotel.hotel_id, session);
        set_selected.set(Some(hotel));
    });

    let close_panel = Callback::new(move |_: ()| {
        store.close();
        set_selected.set(None);
    });

    view! {
        <div class="search-screen">
            <form class="card search-card" on:submit=handle_search>
                <label class="field">
                    "Search Hotel"
                    <input
                        type="text"
                        placeholder="San Francisco"
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </label>
                {move || search_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                <div class="button-row">
                    <button type="submit">"Search"</button>
                    <button type="button" on:click=move |_| set_history_open.set(true)>
                        "Booking history"
                    </button>
                </div>
            </form>
        </div>
        <div class="results" node_ref=results_ref>
            <Show when=move || !hotels.get().is_empty()>
                <div class="hotel-grid">
                    {move || {
                        hotels
                            .get()
                            .into_iter()
                            .map(|hotel| {
                                let subject = LikeSubject::Hotel(hotel.hotel_id.clone());
                                let liked = likes.hotel_liked(&hotel.hotel_id);
                                let busy = likes.busy(&subject);
                                let name = hotel.name.clone();
                                view! {
                                    <div class="hotel-card">
                                        <button
                                            class="hotel-name"
                                            on:click=move |_| select_hotel.call(hotel.clone())
                                        >
                                            {name}
                                        </button>
                                        <button
                                            class="like"
                                            class:liked=liked
                                            disabled=busy
                                            on:click=move |_| likes.toggle(subject.clone())
                                        >
                                            {if liked { "\u{2665}" } else { "\u{2661}" }}
                                        </button>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
                <MapView hotels=hotels/>
            </Show>
        </div>
        {move || {
            selected
                .get()
                .map(|hotel| view! { <ReviewPanel hotel store likes on_close=close_panel/> })
        }}
        <HistoryModal open=history_open set_open=set_history_open/>
    }
}
