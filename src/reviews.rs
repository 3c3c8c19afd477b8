/// Review list state for the currently selected hotel: fetching, the
/// recomputed average rating, and fixed-size pagination. Every mutation
/// (create, update, delete) is followed by a full refetch rather than an
/// incremental local edit; the fetched list is the authoritative state.
use leptos::logging::{error, log};
use leptos::{
    create_rw_signal, RwSignal, SignalGet, SignalGetUntracked, SignalSet, SignalUpdate,
};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::review::Review;
use crate::session::Session;

pub const PAGE_SIZE: usize = 5;

/// Arithmetic mean of the fetched ratings; an empty list averages to 0.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

/// Last 1-based page index for a list of `len` reviews; an empty list still
/// has page 1.
pub fn last_page(len: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(PAGE_SIZE)
    }
}

/// The slice shown on a 1-based `page`.
pub fn page_slice(reviews: &[Review], page: usize) -> &[Review] {
    let start = page.saturating_sub(1) * PAGE_SIZE;
    if start >= reviews.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(reviews.len());
    &reviews[start..end]
}

#[derive(Clone, Copy)]
pub struct ReviewStore {
    hotel_id: RwSignal<Option<String>>,
    pub reviews: RwSignal<Vec<Review>>,
    pub average: RwSignal<f64>,
    pub page: RwSignal<usize>,
    pub loading: RwSignal<bool>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            hotel_id: create_rw_signal(None),
            reviews: create_rw_signal(Vec::new()),
            average: create_rw_signal(0.0),
            page: create_rw_signal(1),
            loading: create_rw_signal(false),
        }
    }

    /// Switches the store to a new hotel: the list and average are cleared
    /// and the pager snaps back to page 1 before anything is fetched.
    pub fn open(&self, hotel_id: &str, session: Session) {
        self.select(hotel_id);
        self.refresh(session);
    }

    fn select(&self, hotel_id: &str) {
        self.hotel_id.set(Some(hotel_id.to_string()));
        self.reviews.set(Vec::new());
        self.average.set(0.0);
        self.page.set(1);
    }

    pub fn close(&self) {
        self.hotel_id.set(None);
        self.reviews.set(Vec::new());
        self.average.set(0.0);
        self.page.set(1);
        self.loading.set(false);
    }

    /// Refetches the full review list for the current subject and recomputes
    /// the average. The fetch is tagged with the hotel id at issue time; a
    /// response arriving after the user switched hotels is discarded.
    pub fn refresh(&self, session: Session) {
        let Some(subject) = self.hotel_id.get_untracked() else {
            return;
        };
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let result = api::fetch_reviews(&subject).await;
            if this.hotel_id.get_untracked().as_deref() != Some(subject.as_str()) {
                log!("discarding stale review fetch for hotel {subject}");
                return;
            }
            this.loading.set(false);
            match result {
                Ok(reviews) => {
                    this.average.set(average_rating(&reviews));
                    let pages = last_page(reviews.len());
                    this.reviews.set(reviews);
                    // A delete can shrink the list below the current page.
                    this.page.update(|page| *page = (*page).min(pages));
                }
                Err(err) => session.handle_failure("review fetch", err),
            }
        });
    }

    pub fn delete(&self, session: Session, review_id: String) {
        let Some(hotel_id) = self.hotel_id.get_untracked() else {
            error!("review delete requested with no hotel selected");
            return;
        };
        let this = *self;
        spawn_local(async move {
            match api::delete_review(&hotel_id, &review_id).await {
                Ok(()) => {
                    log!("deleted review {review_id}");
                    this.refresh(session);
                }
                Err(err) => session.handle_failure("review delete", err),
            }
        });
    }

    /// The reviews visible on the current page (tracked read).
    pub fn page_reviews(&self) -> Vec<Review> {
        let reviews = self.reviews.get();
        let page = self.page.get();
        page_slice(&reviews, page).to_vec()
    }

    pub fn next_page(&self) {
        let pages = last_page(self.reviews.get_untracked().len());
        self.page.update(|page| {
            if *page < pages {
                *page += 1;
            }
        });
    }

    pub fn prev_page(&self) {
        self.page.update(|page| {
            if *page > 1 {
                *page -= 1;
            }
        });
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            review_id: id.into(),
            title: "Stay".into(),
            review_text: "Clean rooms, quick check-in.".into(),
            rating,
            user: "harry".into(),
            date: "2024-05-01".into(),
            liked_by_usernames: HashSet::new(),
        }
    }

    fn reviews(count: usize) -> Vec<Review> {
        (0..count).map(|i| review(&format!("r-{i}"), 3)).collect()
    }

    #[test]
    fn average_of_empty_list_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_is_the_arithmetic_mean() {
        let list = vec![review("a", 5), review("b", 4), review("c", 0)];
        assert_eq!(average_rating(&list), 3.0);
        let list = vec![review("a", 5), review("b", 4)];
        assert_eq!(average_rating(&list), 4.5);
    }

    #[test]
    fn last_page_is_ceil_of_len_over_page_size() {
        assert_eq!(last_page(0), 1);
        assert_eq!(last_page(1), 1);
        assert_eq!(last_page(5), 1);
        assert_eq!(last_page(6), 2);
        assert_eq!(last_page(11), 3);
    }

    #[test]
    fn page_one_shows_the_first_five() {
        let list = reviews(7);
        let page = page_slice(&list, 1);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].review_id, "r-0");
        assert_eq!(page[4].review_id, "r-4");

        let rest = page_slice(&list, 2);
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].review_id, "r-5");

        assert!(page_slice(&list, 3).is_empty());
    }

    #[test]
    fn paging_is_a_no_op_past_either_end() {
        let runtime = leptos::create_runtime();
        let store = ReviewStore::new();
        store.reviews.set(reviews(11));

        store.prev_page();
        assert_eq!(store.page.get_untracked(), 1);

        store.next_page();
        store.next_page();
        assert_eq!(store.page.get_untracked(), 3);
        store.next_page();
        assert_eq!(store.page.get_untracked(), 3);
        runtime.dispose();
    }

    #[test]
    fn selecting_a_hotel_resets_page_and_clears_state() {
        let runtime = leptos::create_runtime();
        let store = ReviewStore::new();
        store.reviews.set(reviews(11));
        store.average.set(3.0);
        store.next_page();

        store.select("h-2");
        assert_eq!(store.page.get_untracked(), 1);
        assert!(store.reviews.get_untracked().is_empty());
        assert_eq!(store.average.get_untracked(), 0.0);
        runtime.dispose();
    }

    #[test]
    fn page_reviews_follows_the_pager() {
        let runtime = leptos::create_runtime();
        let store = ReviewStore::new();
        store.reviews.set(reviews(6));

        assert_eq!(store.page_reviews().len(), 5);
        store.next_page();
        let page = store.page_reviews();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].review_id, "r-5");
        runtime.dispose();
    }
}
