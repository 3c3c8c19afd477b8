use serde::{Deserialize, Serialize};

/// A hotel as returned by the search endpoint. Immutable once fetched;
/// keyed by `hotel_id` everywhere else in the app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub addr: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

impl Hotel {
    /// External booking page for this hotel (Expedia hotel search).
    pub fn booking_link(&self) -> String {
        format!(
            "https://www.expedia.com/Hotel-Search?destination={}",
            urlencoding::encode(&format!("{}, {}", self.name, self.city))
        )
    }
}
