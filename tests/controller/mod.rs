//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with an in-memory database and session, verifying status
//! codes, response bodies and the records left behind for every API endpoint.

mod auth;
mod clone;
mod device;
mod ownership;
mod user;

use axum::{body::to_bytes, response::Response};
use portal::server::model::session::user::SessionUserId;
use portal_test_utils::TestSetup;
use serde_json::Value;

/// Stores the user ID in the test session as a successful login would
async fn login_as(test: &TestSetup, user_id: i32) {
    SessionUserId::insert(&test.session, user_id).await.unwrap();
}

async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
