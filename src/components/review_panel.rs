use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ReviewForm};
use crate::components::open_in_new_tab;
use crate::components::review_modal::{ReviewIntent, ReviewModal};
use crate::like::{LikeReconciler, LikeSubject};
use crate::models::hotel::Hotel;
use crate::reviews::{last_page, ReviewStore};
use crate::session::Session;

/// Detail panel for the selected hotel: address, booking link, the
/// paginated review list with like/edit/delete controls, and the review
/// form modal.
#[component]
pub fn ReviewPanel(
    hotel: Hotel,
    store: ReviewStore,
    likes: LikeReconciler,
    on_close: Callback<()>,
) -> impl IntoView {
    let session = expect_context::<Session>();
    let (editor, set_editor) = create_signal(None::<ReviewIntent>);

    let (name, hotel_id, address) = (
        hotel.name.clone(),
        hotel.hotel_id.clone(),
        format!("{}, {}, {}", hotel.addr, hotel.city, hotel.state),
    );
    let hotel = store_value(hotel);

    let open_booking = move |_| {
        let username = session.username();
        let link = hotel.with_value(|h| h.booking_link());
        // The recording is a detached task: the navigation never waits for
        // it, and its failures resolve through the usual taxonomy later.
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
        <div class="overlay" on:click=move |_| on_close.call(())>
            <div class="panel" on:click=|ev| ev.stop_propagation()>
                <button
                    class="corner-left"
                    on:click=move |_| set_editor.set(Some(ReviewIntent::Create))
                >
                    "Add"
                </button>
                <button class="corner-right" on:click=move |_| on_close.call(())>
                    "\u{d7}"
                </button>
                <h2>{name}</h2>
                <p class="hotel-id">"ID : " {hotel_id}</p>
                <p>{address}</p>
                <button class="booking" on:click=open_booking>
                    "Book on Expedia"
                </button>
                <Show
                    when=move || !store.loading.get()
                    fallback=|| view! { <p>"Loading..."</p> }
                >
                    <div class="reviews">
                        <p class="average">
                            "Average Rating : " {move || format!("{:.1}", store.average.get())}
                        </p>
                        {move || {
                            let user = session.username();
                            store
                                .page_reviews()
                                .into_iter()
                                .map(|review| {
                                    let subject = LikeSubject::Review(review.review_id.clone());
                                    let liked = review.liked_by(&user);
                                    let like_count = review.liked_by_usernames.len();
                                    let busy = likes.busy(&subject);
                                    let mine = review.user == user;
                                    let intent = ReviewIntent::Edit {
                                        review_id: review.review_id.clone(),
                                        initial: ReviewForm {
                                            title: review.title.clone(),
                                            text: review.review_text.clone(),
                                            rating: review.rating,
                                        },
                                    };
                                    let delete_id = review.review_id.clone();
                                    view! {
                                        <div class="review">
                                            <h3>{review.title.clone()}</h3>
                                            <p class="review-text">{review.review_text.clone()}</p>
                                            <p>"Rating: " {review.rating}</p>
                                            <p class="review-date">{review.date.clone()}</p>
                                            <button
                                                class="like"
                                                class:liked=liked
                                                disabled=busy
                                                on:click=move |_| likes.toggle(subject.clone())
                                            >
                                                {if liked { "\u{2665}" } else { "\u{2661}" }}
                                                " "
                                                {like_count}
                                            </button>
                                            {mine.then(|| view! {
                                                <div class="review-actions">
                                                    <button on:click=move |_| {
                                                        set_editor.set(Some(intent.clone()))
                                                    }>
                                                        "Edit"
                                                    </button>
                                                    <button on:click=move |_| {
                                                        store.delete(session, delete_id.clone())
                                                    }>
                                                        "Delete"
                                                    </button>
                                                </div>
                                            })}
                                            <p class="review-author">{review.user.clone()}</p>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                        <div class="pager">
                            <button on:click=move |_| store.prev_page()>"Previous"</button>
                            <span>
                                {move || {
                                    format!(
                                        "Page {} of {}",
                                        store.page.get(),
                                        last_page(store.reviews.get().len()),
                                    )
                                }}
                            </span>
                            <button on:click=move |_| store.next_page()>"Next"</button>
                        </div>
                    </div>
                </Show>
                {move || {
                    editor
                        .get()
                        .map(|intent| {
                            let hotel_id = hotel.with_value(|h| h.hotel_id.clone());
                            let close_editor = Callback::new(move |_: ()| set_editor.set(None));
                            view! {
                                <ReviewModal hotel_id intent store on_close=close_editor/>
                            }
                        })
                }}
            </div>
        </div>
    }
}
