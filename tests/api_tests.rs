//! API integration tests
//!
//! These run against a live server with a fresh database:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:9090";
const SHARER_HEADER: &str = "X-Sharer-User-Id";

/// Create a user with a unique email and return its id
async fn create_user(client: &Client, name: &str) -> i32 {
    let email = format!(
        "{}-{}@example.com",
        name.to_lowercase(),
        unique_nanos()
    );
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse user");
    body["id"].as_i64().expect("No user id") as i32
}

/// Create an item owned by `owner_id` and return its id
async fn create_item(client: &Client, owner_id: i32, name: &str, available: bool) -> i32 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(SHARER_HEADER, owner_id)
        .json(&json!({
            "name": name,
            "description": "integration test item",
            "available": available
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse item");
    body["id"].as_i64().expect("No item id") as i32
}

/// Book an item and return the booking id
async fn create_booking(
    client: &Client,
    booker_id: i32,
    item_id: i32,
    start: &str,
    end: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/bookings", BASE_URL))
        .header(SHARER_HEADER, booker_id)
        .json(&json!({ "item_id": item_id, "start": start, "end": end }))
        .send()
        .await
        .expect("Failed to create booking")
}

/// Nanosecond timestamp for unique test data
fn unique_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_user_email_conflict() {
    let client = Client::new();
    let email = format!("dup-{}@example.com", unique_nanos());

    let first = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "First", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Second", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_invalid_email_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Bad", "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_item_round_trip() {
    let client = Client::new();
    let owner = create_user(&client, "Round").await;

    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(SHARER_HEADER, owner)
        .json(&json!({
            "name": "Drill",
            "description": "A cordless drill",
            "available": true
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse item");
    let item_id = created["id"].as_i64().unwrap();

    let fetched: Value = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to fetch item")
        .json()
        .await
        .expect("Failed to parse item");

    assert_eq!(fetched["name"], "Drill");
    assert_eq!(fetched["description"], "A cordless drill");
    assert_eq!(fetched["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_missing_sharer_header() {
    let client = Client::new();

    let response = client
        .get(format!("{}/items", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_update_item_by_non_owner() {
    let client = Client::new();
    let owner = create_user(&client, "Owner").await;
    let stranger = create_user(&client, "Stranger").await;
    let item_id = create_item(&client, owner, "Ladder", true).await;

    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item_id))
        .header(SHARER_HEADER, stranger)
        .json(&json!({ "name": "Stolen ladder" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_search_skips_unavailable() {
    let client = Client::new();
    let owner = create_user(&client, "Searcher").await;
    let marker = format!("zweihander-{}", unique_nanos());
    create_item(&client, owner, &format!("{} listed", marker), true).await;
    create_item(&client, owner, &format!("{} hidden", marker), false).await;

    let found: Value = client
        .get(format!("{}/items/search", BASE_URL))
        .query(&[("text", marker.as_str())])
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search");

    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("listed"));
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let owner = create_user(&client, "Anna").await;
    let booker = create_user(&client, "Boris").await;
    let item_id = create_item(&client, owner, "Tent", true).await;

    // Boris books the tent for tomorrow
    let response = create_booking(
        &client,
        booker,
        item_id,
        "2099-06-01T10:00:00Z",
        "2099-06-03T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(booking["status"], "WAITING");
    let booking_id = booking["id"].as_i64().unwrap();

    // Boris may not decide his own booking
    let response = client
        .patch(format!("{}/bookings/{}?approved=false", BASE_URL, booking_id))
        .header(SHARER_HEADER, booker)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Anna approves
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking_id))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let decided: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(decided["status"], "APPROVED");

    // A decision is terminal
    let response = client
        .patch(format!("{}/bookings/{}?approved=false", BASE_URL, booking_id))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_booking_unavailable_item() {
    let client = Client::new();
    let owner = create_user(&client, "Carl").await;
    let booker = create_user(&client, "Dora").await;
    let item_id = create_item(&client, owner, "Broken bike", false).await;

    let response = create_booking(
        &client,
        booker,
        item_id,
        "2099-06-01T10:00:00Z",
        "2099-06-02T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_booking_inverted_window() {
    let client = Client::new();
    let owner = create_user(&client, "Ed").await;
    let booker = create_user(&client, "Fay").await;
    let item_id = create_item(&client, owner, "Canoe", true).await;

    let response = create_booking(
        &client,
        booker,
        item_id,
        "2099-06-03T10:00:00Z",
        "2099-06-01T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_overlap_rejected() {
    let client = Client::new();
    let owner = create_user(&client, "Gus").await;
    let first = create_user(&client, "Hana").await;
    let second = create_user(&client, "Ivan").await;
    let item_id = create_item(&client, owner, "Projector", true).await;

    let response = create_booking(
        &client,
        first,
        item_id,
        "2099-07-01T10:00:00Z",
        "2099-07-05T10:00:00Z",
    )
    .await;
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();

    client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking_id))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to approve");

    // Overlapping window against the approved booking
    let response = create_booking(
        &client,
        second,
        item_id,
        "2099-07-03T10:00:00Z",
        "2099-07-06T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 409);

    // Disjoint window is fine
    let response = create_booking(
        &client,
        second,
        item_id,
        "2099-07-06T10:00:00Z",
        "2099-07-08T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_booking_visibility() {
    let client = Client::new();
    let owner = create_user(&client, "Jane").await;
    let booker = create_user(&client, "Karl").await;
    let stranger = create_user(&client, "Liam").await;
    let item_id = create_item(&client, owner, "Kayak", true).await;

    let response = create_booking(
        &client,
        booker,
        item_id,
        "2099-08-01T10:00:00Z",
        "2099-08-02T10:00:00Z",
    )
    .await;
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();

    for caller in [owner, booker] {
        let response = client
            .get(format!("{}/bookings/{}", BASE_URL, booking_id))
            .header(SHARER_HEADER, caller)
            .send()
            .await
            .expect("Failed to fetch booking");
        assert_eq!(response.status(), 200);
    }

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header(SHARER_HEADER, stranger)
        .send()
        .await
        .expect("Failed to fetch booking");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_booking_cancel_by_booker_only() {
    let client = Client::new();
    let owner = create_user(&client, "Mia").await;
    let booker = create_user(&client, "Noel").await;
    let item_id = create_item(&client, owner, "Grill", true).await;

    let response = create_booking(
        &client,
        booker,
        item_id,
        "2099-09-01T10:00:00Z",
        "2099-09-02T10:00:00Z",
    )
    .await;
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .delete(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header(SHARER_HEADER, booker)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_owner_cannot_book_own_item() {
    let client = Client::new();
    let owner = create_user(&client, "Tara").await;
    let item_id = create_item(&client, owner, "Mixer", true).await;

    let response = create_booking(
        &client,
        owner,
        item_id,
        "2099-09-10T10:00:00Z",
        "2099-09-11T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_approve_conflicting_waiting_bookings() {
    let client = Client::new();
    let owner = create_user(&client, "Uma").await;
    let first = create_user(&client, "Vic").await;
    let second = create_user(&client, "Wes").await;
    let item_id = create_item(&client, owner, "Trailer", true).await;

    // Two WAITING bookings over the same window are allowed
    let a: Value = create_booking(
        &client,
        first,
        item_id,
        "2099-11-01T10:00:00Z",
        "2099-11-05T10:00:00Z",
    )
    .await
    .json()
    .await
    .unwrap();
    let b: Value = create_booking(
        &client,
        second,
        item_id,
        "2099-11-02T10:00:00Z",
        "2099-11-06T10:00:00Z",
    )
    .await
    .json()
    .await
    .unwrap();

    // Only one of them can be approved
    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL,
            a["id"].as_i64().unwrap()
        ))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(response.status(), 200);

    let response = client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL,
            b["id"].as_i64().unwrap()
        ))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(response.status(), 409);

    // The losing booking is still WAITING and may be rejected
    let detail: Value = client
        .get(format!(
            "{}/bookings/{}",
            BASE_URL,
            b["id"].as_i64().unwrap()
        ))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["status"], "WAITING");
}

#[tokio::test]
#[ignore]
async fn test_comment_after_ended_booking() {
    let client = Client::new();
    let owner = create_user(&client, "Xena").await;
    let booker = create_user(&client, "Yuri").await;
    let item_id = create_item(&client, owner, "Chainsaw", true).await;

    // A rental that already ended
    let response = create_booking(
        &client,
        booker,
        item_id,
        "2020-01-01T10:00:00Z",
        "2020-01-02T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.unwrap();
    client
        .patch(format!(
            "{}/bookings/{}?approved=true",
            BASE_URL,
            booking["id"].as_i64().unwrap()
        ))
        .header(SHARER_HEADER, owner)
        .send()
        .await
        .expect("Failed to approve");

    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item_id))
        .header(SHARER_HEADER, booker)
        .json(&json!({ "text": "Cut like a dream" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let comment: Value = response.json().await.unwrap();
    assert_eq!(comment["text"], "Cut like a dream");
    assert_eq!(comment["author_name"], "Yuri");

    // The comment shows up on the item
    let item: Value = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .header(SHARER_HEADER, booker)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let comments = item["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "Cut like a dream");
}

#[tokio::test]
#[ignore]
async fn test_comment_requires_ended_booking() {
    let client = Client::new();
    let owner = create_user(&client, "Olga").await;
    let booker = create_user(&client, "Pete").await;
    let stranger = create_user(&client, "Quinn").await;
    let item_id = create_item(&client, owner, "Sander", true).await;

    // Future booking only: commenting is premature
    create_booking(
        &client,
        booker,
        item_id,
        "2099-10-01T10:00:00Z",
        "2099-10-02T10:00:00Z",
    )
    .await;

    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item_id))
        .header(SHARER_HEADER, booker)
        .json(&json!({ "text": "Great sander!" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // No booking at all: not found
    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item_id))
        .header(SHARER_HEADER, stranger)
        .json(&json!({ "text": "Never rented this" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_request_board() {
    let client = Client::new();
    let requester = create_user(&client, "Rita").await;
    let other = create_user(&client, "Sven").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header(SHARER_HEADER, requester)
        .json(&json!({ "description": "Need a pressure washer" }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.unwrap();
    let request_id = request["id"].as_i64().unwrap();

    // Sven answers with an item
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(SHARER_HEADER, other)
        .json(&json!({
            "name": "Pressure washer",
            "description": "2000 PSI",
            "available": true,
            "request_id": request_id
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(response.status(), 201);

    // The request detail lists the answering item
    let detail: Value = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header(SHARER_HEADER, requester)
        .send()
        .await
        .expect("Failed to fetch request")
        .json()
        .await
        .expect("Failed to parse request");
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Pressure washer");

    // Own vs others' listings
    let own: Value = client
        .get(format!("{}/requests", BASE_URL))
        .header(SHARER_HEADER, requester)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(own
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"].as_i64() == Some(request_id)));

    let others: Value = client
        .get(format!("{}/requests/all", BASE_URL))
        .header(SHARER_HEADER, other)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(others
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"].as_i64() == Some(request_id)));
}
