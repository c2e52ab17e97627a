//! Drives the real router against a seeded in-memory database.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use crate::db::test_support::seeded_db;
use crate::web::create_axum_router;

pub struct TestApp {
    pub db: DatabaseConnection,
    router: Router,
}

pub fn encode_path(segment: &str) -> String {
    segment.replace(' ', "%20")
}

impl TestApp {
    pub async fn seeded() -> Self {
        let db = seeded_db().await;
        let router = create_axum_router(db.clone());
        Self { db, router }
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.call(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let (status, text) = self.get_text(path).await;
        (status, serde_json::from_str(&text).unwrap())
    }

    /// Sends `body` as JSON, or no body and no content type when `None`.
    pub async fn send(&self, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let (status, text) = self.call(request).await;
        (status, serde_json::from_str(&text).unwrap())
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn send_raw(&self, method: &str, path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, text) = self.call(request).await;
        (status, serde_json::from_str(&text).unwrap())
    }
}
