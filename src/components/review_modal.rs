use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError, ReviewForm, ReviewWrite};
use crate::components::notify;
use crate::reviews::ReviewStore;
use crate::session::Session;
use crate::validate;

/// What the review form was opened for. Editing starts from the review
/// being replaced.
#[derive(Clone, Debug, PartialEq)]
pub enum ReviewIntent {
    Create,
    Edit {
        review_id: String,
        initial: ReviewForm,
    },
}

/// Modal form for writing or replacing a review. On success the review list
/// is refetched in full; on any failure the form closes regardless, with a
/// notice. Server failures never surface as field errors.
#[component]
pub fn ReviewModal(
    hotel_id: String,
    intent: ReviewIntent,
    store: ReviewStore,
    on_close: Callback<()>,
) -> impl IntoView {
    let session = expect_context::<Session>();

    let (write, initial) = match intent {
        ReviewIntent::Create => (ReviewWrite::Create, ReviewForm::default()),
        ReviewIntent::Edit { review_id, initial } => (ReviewWrite::Update { review_id }, initial),
    };
    let write = store_value(write);
    let hotel_id = store_value(hotel_id);

    let (title, set_title) = create_signal(initial.title);
    let (text, set_text) = create_signal(initial.text);
    let (rating, set_rating) = create_signal(initial.rating.to_string());
    let (title_error, set_title_error) = create_signal(None::<String>);
    let (text_error, set_text_error) = create_signal(None::<String>);
    let (rating_error, set_rating_error) = create_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let title_check = validate::review_title(&title.get());
        let text_check = validate::review_text(&text.get());
        let rating_check = validate::rating(&rating.get());
        set_title_error.set(title_check.clone().err());
        set_text_error.set(text_check.clone().err());
        set_rating_error.set(rating_check.clone().err());
        let Ok(rating) = rating_check else { return };
        if title_check.is_err() || text_check.is_err() {
            return;
        }

        let form = ReviewForm {
            title: title.get(),
            text: text.get(),
            rating,
        };
        spawn_local(async move {
            let result = api::save_review(&hotel_id.get_value(), &write.get_value(), &form).await;
            match result {
                Ok(()) => {
                    store.refresh(session);
                    on_close.call(());
                    notify("Successfully updated a review");
                }
                Err(err @ ApiError::Forbidden) => session.handle_failure("review save", err),
                Err(err) => {
                    error!("review save failed: {err}");
                    on_close.call(());
                    notify("Failed to update a review");
                }
            }
        });
    };

    view! {
        <div class="overlay" on:click=move |_| on_close.call(())>
            <div class="card review-form" on:click=|ev| ev.stop_propagation()>
                <form on:submit=handle_submit>
                    <label class="field">
                        "Title"
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=title
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </label>
                    {move || title_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                    <label class="field">
                        "Text"
                        <input
                            type="text"
                            placeholder="Great"
                            prop:value=text
                            on:input=move |ev| set_text.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-hint">"Write a review about your experience"</p>
                    {move || text_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                    <label class="field">
                        "Rating"
                        <input
                            type="number"
                            min="0"
                            max="5"
                            placeholder="0-5"
                            prop:value=rating
                            on:input=move |ev| set_rating.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-hint">"Rate the hotel from 0 to 5"</p>
                    {move || rating_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                    <button type="submit">"Ok"</button>
                </form>
            </div>
        </div>
    }
}
