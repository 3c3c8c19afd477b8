use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::open_in_new_tab;
use crate::models::history::{display_time, remove_entry, HistoryEntry};
use crate::session::Session;

/// Modal listing the user's visited booking links. The full list is fetched
/// each time the modal opens; entries delete individually by timestamp, and
/// clicking a link re-records a visit before opening it.
#[component]
pub fn HistoryModal(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    let session = expect_context::<Session>();
    let (histories, set_histories) = create_signal(Vec::<HistoryEntry>::new());

    create_effect(move |_| {
        if open.get() {
            spawn_local(async move {
                match api::fetch_history(&session.username()).await {
                    Ok(entries) => set_histories.set(entries),
                    Err(err) => session.handle_failure("history fetch", err),
                }
            });
        }
    });

    let delete_entry = move |time: String| {
        spawn_local(async move {
            match api::delete_history_entry(&session.username(), &time).await {
                Ok(()) => {
                    log!("deleted history entry at {time}");
                    set_histories.update(|entries| remove_entry(entries, &time));
                }
                Err(err) => session.handle_failure("history delete", err),
            }
        });
    };

    let open_link = move |link: String| {
        let username = session.username();
        {
            let link = link.clone();
            spawn_local(async move {
                if let Err(err) = api::record_visit(&username, &link).await {
                    session.handle_failure("visit recording", err);
                }
            });
        }
        open_in_new_tab(&link);
    };

    view! {
        <Show when=move || open.get()>
            <div class="overlay" on:click=move |_| set_open.set(false)>
                <div class="panel history-panel" on:click=|ev| ev.stop_propagation()>
                    <button class="corner-right" on:click=move |_| set_open.set(false)>
                        "\u{d7}"
                    </button>
                    <h2>"Visited booking links"</h2>
                    {move || {
                        let entries = histories.get();
                        if entries.is_empty() {
                            view! { <p>"No visits recorded yet."</p> }.into_view()
                        } else {
                            entries
                                .into_iter()
                                .map(|entry| {
                                    let link = entry.link.clone();
                                    let time = entry.time.clone();
                                    view! {
                                        <div class="history-entry">
                                            <button
                                                class="history-link"
                                                on:click=move |_| open_link(link.clone())
                                            >
                                                {entry.link.clone()}
                                            </button>
                                            <button
                                                class="history-delete"
                                                on:click=move |_| delete_entry(time.clone())
                                            >
                                                "\u{d7}"
                                            </button>
                                            <div class="history-time">
                                                {display_time(&entry.time)}
                                            </div>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                                .into_view()
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}
