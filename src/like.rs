/// Like toggling for hotels and reviews, reconciled against the backend.
///
/// Policy: **flip after success**. Local like-state is only mutated once the
/// add/remove round-trip confirms, so no rollback path exists. The same
/// policy applies to both subject kinds. At most one toggle per subject is
/// in flight at a time; a toggle issued while the previous one is pending
/// is dropped and the control stays disabled until the round-trip resolves.
use std::collections::HashSet;

use leptos::logging::{error, log};
use leptos::{create_rw_signal, RwSignal, SignalUpdate, SignalWith, SignalWithUntracked};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::review::Review;
use crate::session::Session;

/// What the user is liking: a hotel (by hotel id) or a review (by review
/// id). Also the key for the in-flight set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LikeSubject {
    Hotel(String),
    Review(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeAction {
    Add,
    Remove,
}

/// Direction of the next toggle given the current membership.
pub fn toggle_action(was_liked: bool) -> LikeAction {
    if was_liked {
        LikeAction::Remove
    } else {
        LikeAction::Add
    }
}

/// Applies a confirmed add/remove to a local like-set. Used for both the
/// liked-hotel id set (member = hotel id) and a review's liked-by set
/// (member = username).
pub fn apply_to_set(set: &mut HashSet<String>, member: &str, action: LikeAction) {
    match action {
        LikeAction::Add => {
            set.insert(member.to_string());
        }
        LikeAction::Remove => {
            set.remove(member);
        }
    }
}

#[derive(Clone, Copy)]
pub struct LikeReconciler {
    session: Session,
    liked_hotels: RwSignal<HashSet<String>>,
    reviews: RwSignal<Vec<Review>>,
    in_flight: RwSignal<HashSet<LikeSubject>>,
}

impl LikeReconciler {
    /// `reviews` is the review-list signal owned by the review store; review
    /// toggles mutate the `liked_by_usernames` set of the matching entry.
    pub fn new(session: Session, reviews: RwSignal<Vec<Review>>) -> Self {
        Self {
            session,
            liked_hotels: create_rw_signal(HashSet::new()),
            reviews,
            in_flight: create_rw_signal(HashSet::new()),
        }
    }

    /// Seeds the liked-hotel set fetched once per session.
    pub fn seed_hotels(&self, ids: HashSet<String>) {
        self.liked_hotels.update(|set| *set = ids);
    }

    pub fn hotel_liked(&self, hotel_id: &str) -> bool {
        self.liked_hotels.with(|set| set.contains(hotel_id))
    }

    pub fn busy(&self, subject: &LikeSubject) -> bool {
        self.in_flight.with(|set| set.contains(subject))
    }

    /// Toggles the current user's like on `subject`. Resolves the direction
    /// from current local membership, issues the add/remove request, and
    /// flips local state only after the backend confirms.
    pub fn toggle(&self, subject: LikeSubject) {
        if !self.begin(&subject) {
            log!("like toggle dropped, one already in flight for {subject:?}");
            return;
        }
        let this = *self;
        let username = this.session.username();
        spawn_local(async move {
            let action = toggle_action(this.currently_liked(&subject, &username));
            let result = match (&subject, action) {
                (LikeSubject::Hotel(id), LikeAction::Add) => {
                    api::add_hotel_like(id, &username).await
                }
                (LikeSubject::Hotel(id), LikeAction::Remove) => {
                    api::remove_hotel_like(id, &username).await
                }
                (LikeSubject::Review(id), LikeAction::Add) => {
                    api::add_review_like(id, &username).await
                }
                (LikeSubject::Review(id), LikeAction::Remove) => {
                    api::remove_review_like(id, &username).await
                }
            };
            match result {
                Ok(()) => this.commit(&subject, &username, action),
                Err(err) => this.session.handle_failure("like toggle", err),
            }
            this.finish(&subject);
        });
    }

    fn currently_liked(&self, subject: &LikeSubject, username: &str) -> bool {
        match subject {
            LikeSubject::Hotel(id) => self.liked_hotels.with_untracked(|set| set.contains(id)),
            LikeSubject::Review(id) => self.reviews.with_untracked(|reviews| {
                reviews
                    .iter()
                    .find(|review| review.review_id == *id)
                    .map(|review| review.liked_by(username))
                    .unwrap_or(false)
            }),
        }
    }

    fn commit(&self, subject: &LikeSubject, username: &str, action: LikeAction) {
        match subject {
            LikeSubject::Hotel(id) => {
                self.liked_hotels
                    .update(|set| apply_to_set(set, id, action));
            }
            LikeSubject::Review(id) => {
                self.reviews.update(|reviews| {
                    match reviews.iter_mut().find(|review| review.review_id == *id) {
                        Some(review) => {
                            apply_to_set(&mut review.liked_by_usernames, username, action)
                        }
                        // The list was replaced while the toggle was in
                        // flight; the confirmed state arrives with the next
                        // fetch.
                        None => error!("liked review {id} no longer in the list"),
                    }
                });
            }
        }
    }

    fn begin(&self, subject: &LikeSubject) -> bool {
        let mut started = false;
        self.in_flight.update(|set| {
            started = set.insert(subject.clone());
        });
        started
    }

    fn finish(&self, subject: &LikeSubject) {
        self.in_flight.update(|set| {
            set.remove(subject);
        });
    }
}
