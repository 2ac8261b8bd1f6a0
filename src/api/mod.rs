//! API handlers and router for the Digital Library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::{
    openapi::{RefOr, Schema},
    ToSchema,
};

use crate::{
    error::{AppError, ErrorDetail},
    AppState,
};

/// JSON body extractor whose rejections answer 422 like validation failures.
///
/// Every required field absent from the body is reported; type errors are
/// reported at the path where deserialization stopped.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + for<'s> ToSchema<'s> + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        let missing = missing_fields::<T>(&value);
        if !missing.is_empty() {
            return Err(AppError::Unprocessable(missing));
        }

        let body = serde_path_to_error::deserialize(value)?;
        Ok(AppJson(body))
    }
}

/// Required properties of `T`'s schema that the JSON object does not carry
fn missing_fields<T>(value: &Value) -> Vec<ErrorDetail>
where
    T: for<'s> ToSchema<'s>,
{
    let (Value::Object(object), (_, RefOr::T(Schema::Object(schema)))) = (value, <T as ToSchema>::schema()) else {
        return Vec::new();
    };

    schema
        .required
        .iter()
        .filter(|field| !object.contains_key(field.as_str()))
        .map(|field| ErrorDetail::new(&["body", field.as_str()], "Field required", "missing"))
        .collect()
}

/// Path extractor whose rejections answer 422
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Access log: method and path on the span, status and elapsed time on completion
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path()
            )
        })
        .on_request(())
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::info!(
                status = response.status().as_u16(),
                elapsed_ms = latency.as_secs_f64() * 1000.0,
                "request completed"
            );
        });

    let api = Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(trace)
        .layer(cors)
}
