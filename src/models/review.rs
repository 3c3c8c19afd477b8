use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A review owned by a hotel. `liked_by_usernames` is the set the like
/// reconciler keeps aligned with the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: String,
    pub title: String,
    pub review_text: String,
    pub rating: u8,
    pub user: String,
    pub date: String,
    #[serde(default)]
    pub liked_by_usernames: HashSet<String>,
}

impl Review {
    pub fn liked_by(&self, username: &str) -> bool {
        self.liked_by_usernames.contains(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liked_by_usernames_defaults_to_empty() {
        let json = r#"{
            "reviewId": "r-1",
            "title": "Great stay",
            "reviewText": "Loved the rooftop pool and service.",
            "rating": 5,
            "user": "harry",
            "date": "2024-05-01"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert!(review.liked_by_usernames.is_empty());
        assert!(!review.liked_by("harry"));
    }

    #[test]
    fn membership_reflects_wire_set() {
        let json = r#"{
            "reviewId": "r-2",
            "title": "Fine",
            "reviewText": "Clean rooms, slow elevator.",
            "rating": 3,
            "user": "sally",
            "date": "2024-05-02",
            "likedByUsernames": ["harry", "ron"]
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert!(review.liked_by("harry"));
        assert!(!review.liked_by("sally"));
    }
}
