/// Typed client for the backend REST service. Every endpoint the app talks
/// to goes through here: requests carry cookie credentials, and response
/// bodies are decoded into explicit shapes instead of being poked at
/// field-by-field. A 403 from any endpoint surfaces as `ApiError::Forbidden`
/// so callers can apply the uniform session-invalid policy.
use std::collections::HashSet;

use gloo_net::http::{Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::models::history::HistoryEntry;
use crate::models::hotel::Hotel;
use crate::models::review::Review;

pub const BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized: session rejected by the server")]
    Forbidden,
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    last_login_time: String,
}

#[derive(Deserialize)]
struct HotelsResponse {
    hotels: Vec<Hotel>,
}

#[derive(Deserialize)]
struct ReviewsResponse {
    reviews: Vec<Review>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikedHotelsResponse {
    hotel_ids: Vec<u64>,
}

#[derive(Deserialize)]
struct HistoriesResponse {
    histories: Vec<HistoryEntry>,
}

/// Create vs. update for `save_review`; update carries the id of the
/// review being replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewWrite {
    Create,
    Update { review_id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub title: String,
    pub text: String,
    pub rating: u8,
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    match response.status() {
        200..=299 => Ok(response),
        403 => Err(ApiError::Forbidden),
        status => Err(ApiError::Status(status)),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ApiError::Decode)
}

async fn get(url: &str) -> Result<Response, ApiError> {
    let response = Request::get(url)
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    check_status(response)
}

/// POST/PUT/DELETE with an `application/x-www-form-urlencoded` body, the
/// only body format the backend accepts.
async fn send_form(method: Method, url: &str, form: String) -> Result<Response, ApiError> {
    let response = RequestBuilder::new(url)
        .method(method)
        .credentials(RequestCredentials::Include)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form)?
        .send()
        .await?;
    check_status(response)
}

/// Bodyless request against a query-string-addressed endpoint.
async fn send_bare(method: Method, url: &str) -> Result<Response, ApiError> {
    let response = RequestBuilder::new(url)
        .method(method)
        .credentials(RequestCredentials::Include)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .build()?
        .send()
        .await?;
    check_status(response)
}

fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

// --- session ---

pub async fn login(username: &str, password: &str) -> Result<String, ApiError> {
    let body = form_encode(&[("username", username), ("password", password)]);
    let response = send_form(Method::POST, &format!("{BASE_URL}/login"), body).await?;
    let payload: LoginResponse = decode(response).await?;
    Ok(payload.last_login_time)
}

pub async fn register(username: &str, password: &str) -> Result<(), ApiError> {
    let body = form_encode(&[("username", username), ("password", password)]);
    send_form(Method::POST, &format!("{BASE_URL}/register"), body).await?;
    Ok(())
}

pub async fn logout() -> Result<(), ApiError> {
    send_bare(Method::POST, &format!("{BASE_URL}/logout")).await?;
    Ok(())
}

// --- hotels ---

pub async fn search_hotels(query: &str) -> Result<Vec<Hotel>, ApiError> {
    let url = format!("{BASE_URL}/hotels/{}", urlencoding::encode(query));
    let payload: HotelsResponse = decode(get(&url).await?).await?;
    Ok(payload.hotels)
}

// --- reviews ---

pub async fn fetch_reviews(hotel_id: &str) -> Result<Vec<Review>, ApiError> {
    let url = format!("{BASE_URL}/reviews/{}", urlencoding::encode(hotel_id));
    let payload: ReviewsResponse = decode(get(&url).await?).await?;
    Ok(payload.reviews)
}

pub async fn save_review(
    hotel_id: &str,
    write: &ReviewWrite,
    form: &ReviewForm,
) -> Result<(), ApiError> {
    let (method, review_id) = match write {
        ReviewWrite::Create => (Method::POST, ""),
        ReviewWrite::Update { review_id } => (Method::PUT, review_id.as_str()),
    };
    let rating = form.rating.to_string();
    let body = form_encode(&[
        ("title", form.title.as_str()),
        ("text", form.text.as_str()),
        ("rating", rating.as_str()),
        ("reviewId", review_id),
    ]);
    let url = format!("{BASE_URL}/reviews/{}", urlencoding::encode(hotel_id));
    send_form(method, &url, body).await?;
    Ok(())
}

pub async fn delete_review(hotel_id: &str, review_id: &str) -> Result<(), ApiError> {
    let url = format!(
        "{BASE_URL}/reviews/{}?reviewid={}",
        urlencoding::encode(hotel_id),
        urlencoding::encode(review_id)
    );
    send_bare(Method::DELETE, &url).await?;
    Ok(())
}

// --- likes ---

fn hotel_id_set(ids: Vec<u64>) -> HashSet<String> {
    ids.into_iter().map(|id| id.to_string()).collect()
}

/// The liked-hotel ids for a user, fetched once per session. The wire
/// carries numeric ids; the rest of the app keys hotels by string id.
pub async fn fetch_liked_hotels(username: &str) -> Result<HashSet<String>, ApiError> {
    let url = format!(
        "{BASE_URL}/like_hotel?username={}",
        urlencoding::encode(username)
    );
    let payload: LikedHotelsResponse = decode(get(&url).await?).await?;
    Ok(hotel_id_set(payload.hotel_ids))
}

pub async fn add_hotel_like(hotel_id: &str, username: &str) -> Result<(), ApiError> {
    send_bare(Method::POST, &hotel_like_url(hotel_id, username)).await?;
    Ok(())
}

pub async fn remove_hotel_like(hotel_id: &str, username: &str) -> Result<(), ApiError> {
    send_bare(Method::DELETE, &hotel_like_url(hotel_id, username)).await?;
    Ok(())
}

fn hotel_like_url(hotel_id: &str, username: &str) -> String {
    format!(
        "{BASE_URL}/like_hotel?hotelid={}&username={}",
        urlencoding::encode(hotel_id),
        urlencoding::encode(username)
    )
}

pub async fn add_review_like(review_id: &str, username: &str) -> Result<(), ApiError> {
    send_bare(Method::POST, &review_like_url(review_id, username)).await?;
    Ok(())
}

pub async fn remove_review_like(review_id: &str, username: &str) -> Result<(), ApiError> {
    send_bare(Method::DELETE, &review_like_url(review_id, username)).await?;
    Ok(())
}

fn review_like_url(review_id: &str, username: &str) -> String {
    format!(
        "{BASE_URL}/likes?reviewid={}&username={}",
        urlencoding::encode(review_id),
        urlencoding::encode(username)
    )
}

// --- booking-link history ---

pub async fn fetch_history(username: &str) -> Result<Vec<HistoryEntry>, ApiError> {
    let url = format!(
        "{BASE_URL}/expedia_history?username={}",
        urlencoding::encode(username)
    );
    let payload: HistoriesResponse = decode(get(&url).await?).await?;
    Ok(payload.histories)
}

pub async fn record_visit(username: &str, link: &str) -> Result<(), ApiError> {
    let body = form_encode(&[("username", username), ("link", link)]);
    send_form(Method::POST, &format!("{BASE_URL}/expedia_history"), body).await?;
    Ok(())
}

pub async fn delete_history_entry(username: &str, time: &str) -> Result<(), ApiError> {
    let url = format!(
        "{BASE_URL}/expedia_history?username={}&time={}",
        urlencoding::encode(username),
        urlencoding::encode(time)
    );
    send_bare(Method::DELETE, &url).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_encode_escapes_reserved_characters() {
        let body = form_encode(&[("username", "harry"), ("password", "*#123Abc&=x")]);
        assert_eq!(body, "username=harry&password=%2A%23123Abc%26%3Dx");
    }

    #[test]
    fn liked_hotel_ids_are_stringified() {
        let payload: LikedHotelsResponse =
            serde_json::from_str(r#"{"hotelIds": [12, 9007]}"#).unwrap();
        let set = hotel_id_set(payload.hotel_ids);
        assert!(set.contains("12"));
        assert!(set.contains("9007"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn like_urls_address_subject_and_user() {
        assert_eq!(
            hotel_like_url("77", "harry"),
            "http://localhost:8080/like_hotel?hotelid=77&username=harry"
        );
        assert_eq!(
            review_like_url("r 1", "harry"),
            "http://localhost:8080/likes?reviewid=r%201&username=harry"
        );
    }
}
