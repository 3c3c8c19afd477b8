use std::collections::HashSet;

use stayfinder::like::{apply_to_set, toggle_action, LikeAction};
use stayfinder::models::review::Review;
use stayfinder::reviews::{average_rating, last_page, page_slice, PAGE_SIZE};

fn review(id: &str, rating: u8) -> Review {
    Review {
        review_id: id.into(),
        title: "Great stay".into(),
        review_text: "Loved the rooftop pool and service.".into(),
        rating,
        user: "harry".into(),
        date: "2024-05-01".into(),
        liked_by_usernames: HashSet::new(),
    }
}

// Search "Chicago", pick a hotel, read its two reviews, then submit a new
// five-star one: after the refetch the average includes the new rating.
#[test]
fn new_five_star_review_lifts_the_average_on_refetch() {
    let fetched = vec![review("r-1", 4), review("r-2", 3)];
    assert_eq!(average_rating(&fetched), 3.5);

    let refetched = vec![review("r-1", 4), review("r-2", 3), review("r-3", 5)];
    assert_eq!(average_rating(&refetched), 4.0);
    assert_eq!(last_page(refetched.len()), 1);
}

#[test]
fn eleven_reviews_paginate_into_three_pages() {
    let reviews: Vec<Review> = (0..11).map(|i| review(&format!("r-{i}"), 3)).collect();

    assert_eq!(last_page(reviews.len()), 3);
    assert_eq!(page_slice(&reviews, 1).len(), PAGE_SIZE);
    assert_eq!(page_slice(&reviews, 2).len(), PAGE_SIZE);
    let tail = page_slice(&reviews, 3);
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].review_id, "r-10");
    assert!(page_slice(&reviews, 4).is_empty());
}

#[test]
fn confirmed_toggles_round_trip_a_review_like_set() {
    let mut liked_by = HashSet::from(["sally".to_string()]);

    let action = toggle_action(liked_by.contains("harry"));
    assert_eq!(action, LikeAction::Add);
    apply_to_set(&mut liked_by, "harry", action);
    assert_eq!(liked_by.len(), 2);

    let action = toggle_action(liked_by.contains("harry"));
    assert_eq!(action, LikeAction::Remove);
    apply_to_set(&mut liked_by, "harry", action);
    assert_eq!(liked_by, HashSet::from(["sally".to_string()]));
}
