//! API integration tests

use digital_library::{api, AppConfig, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Start a server with a fresh store on an ephemeral port and return its base URL
async fn spawn_app() -> String {
    let app = api::create_router(AppState::new(AppConfig::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}", addr)
}

fn dune() -> Value {
    json!({
        "id": 1,
        "title": "Dune",
        "author": "Herbert",
        "year": 1965,
        "isbn": "0441013597"
    })
}

async fn create(client: &Client, base: &str, book: &Value) -> reqwest::Response {
    client
        .post(format!("{}/books", base))
        .json(book)
        .send()
        .await
        .expect("Failed to send request")
}

async fn list(client: &Client, base: &str) -> Vec<Value> {
    client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn test_home() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{}/", base))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Digital Library Service is running");
}

#[tokio::test]
async fn test_health_check_counts_books() {
    let base = spawn_app().await;
    let client = Client::new();
    create(&client, &base, &dune()).await;

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_book_lifecycle() {
    let base = spawn_app().await;
    let client = Client::new();

    // Create
    let response = create(&client, &base, &dune()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["book"], dune());

    // Fetch
    let response = client
        .get(format!("{}/books/1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, dune());

    // Update
    let mut updated = dune();
    updated["year"] = json!(2021);
    let response = client
        .put(format!("{}/books/1", base))
        .json(&updated)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book updated successfully");
    assert_eq!(body["book"]["year"], 2021);

    // Delete
    let response = client
        .delete(format!("{}/books/1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book deleted successfully");

    // Gone
    let response = client
        .get(format!("{}/books/1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Book not found");
}

#[tokio::test]
async fn test_duplicate_id_rejected() {
    let base = spawn_app().await;
    let client = Client::new();
    create(&client, &base, &dune()).await;

    let mut other = dune();
    other["title"] = json!("Dune Messiah");
    let response = create(&client, &base, &other).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Book with this ID already exists");
    assert_eq!(list(&client, &base).await, vec![dune()]);
}

#[tokio::test]
async fn test_unknown_id_not_found() {
    let base = spawn_app().await;
    let client = Client::new();
    create(&client, &base, &dune()).await;

    let mut other = dune();
    other["id"] = json!(99);
    let requests = [
        client.get(format!("{}/books/99", base)),
        client.put(format!("{}/books/99", base)).json(&other),
        client.delete(format!("{}/books/99", base)),
    ];

    for request in requests {
        let response = request.send().await.expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["detail"], "Book not found");
    }

    assert_eq!(list(&client, &base).await, vec![dune()]);
}

#[tokio::test]
async fn test_year_out_of_range_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let mut book = dune();
    book["year"] = json!(3000);
    let response = create(&client, &base, &book).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "year"]));
    assert_eq!(body["detail"][0]["type"], "range");
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_short_isbn_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let mut book = dune();
    book["isbn"] = json!("123");
    let response = create(&client, &base, &book).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "isbn"]));
    assert_eq!(body["detail"][0]["type"], "length");
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_invalid_update_keeps_record() {
    let base = spawn_app().await;
    let client = Client::new();
    create(&client, &base, &dune()).await;

    let mut book = dune();
    book["title"] = json!("");
    let response = client
        .put(format!("{}/books/1", base))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(list(&client, &base).await, vec![dune()]);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    assert_eq!(body["detail"][0]["type"], "json_invalid");
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_missing_fields_each_reported() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = create(
        &client,
        &base,
        &json!({ "id": 1, "title": "Dune", "year": 1965 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["detail"],
        json!([
            { "loc": ["body", "author"], "msg": "Field required", "type": "missing" },
            { "loc": ["body", "isbn"], "msg": "Field required", "type": "missing" }
        ])
    );
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_mistyped_year_names_field() {
    let base = spawn_app().await;
    let client = Client::new();

    for year in [json!(99999999999i64), json!("1965")] {
        let mut book = dune();
        book["year"] = year;
        let response = create(&client, &base, &book).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["detail"][0]["loc"], json!(["body", "year"]));
    }

    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_non_integer_id_rejected() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{}/books/abc", base))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
}

#[tokio::test]
async fn test_update_stores_body_under_path_id() {
    let base = spawn_app().await;
    let client = Client::new();
    create(&client, &base, &dune()).await;

    let mut moved = dune();
    moved["id"] = json!(2);
    let response = client
        .put(format!("{}/books/1", base))
        .json(&moved)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{}/books/1", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["id"], 2);

    let response = client
        .get(format!("{}/books/2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let base = spawn_app().await;
    let client = Client::new();

    for id in [3, 1, 2] {
        let mut book = dune();
        book["id"] = json!(id);
        create(&client, &base, &book).await;
    }

    let ids: Vec<i64> = list(&client, &base)
        .await
        .iter()
        .map(|book| book["id"].as_i64().expect("No book ID"))
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{}/openapi.json", base))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["paths"]["/books/{id}"].is_object());
}
