//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use stellaris_api::{parse_allowed_origins, router, AppState, USER_ID_HEADER, USER_NAME_HEADER};
use stellaris_core::mock::{InMemoryStarNoteRepository, InMemoryStarRepository, MockStarCatalog};

pub struct TestApp {
    pub router: Router,
    pub stars: InMemoryStarRepository,
    pub notes: InMemoryStarNoteRepository,
    pub catalog: MockStarCatalog,
}

impl TestApp {
    pub fn new(catalog: MockStarCatalog) -> Self {
        Self::with_state(catalog, |state| state)
    }

    pub fn with_state(catalog: MockStarCatalog, customize: impl FnOnce(AppState) -> AppState) -> Self {
        let stars = InMemoryStarRepository::new();
        let notes = InMemoryStarNoteRepository::new();
        let state = customize(AppState::new(
            Arc::new(stars.clone()),
            Arc::new(notes.clone()),
            Arc::new(catalog.clone()),
        ));
        Self {
            router: router(state, parse_allowed_origins("")),
            stars,
            notes,
            catalog,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub name: String,
}

impl TestUser {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    pub fn get(&self, uri: &str) -> Request<Body> {
        self.request(Method::GET, uri, Body::empty())
    }

    pub fn delete(&self, uri: &str) -> Request<Body> {
        self.request(Method::DELETE, uri, Body::empty())
    }

    pub fn post_json(&self, uri: &str, body: serde_json::Value) -> Request<Body> {
        self.request(Method::POST, uri, Body::from(body.to_string()))
    }

    fn request(&self, method: Method, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, self.id.to_string())
            .header(USER_NAME_HEADER, &self.name)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sirius_catalog() -> MockStarCatalog {
    MockStarCatalog::new().with_star("Sirius", "Sirius A, B", 8.6, "A1V", "Canis Major")
}
