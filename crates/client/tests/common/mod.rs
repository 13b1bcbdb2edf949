#![allow(dead_code)]

use greedible_auth::{Role, Session, StaffProfile};
use greedible_client::{ApiClient, ClientConfig};
use greedible_core::StaffId;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

/// A mock backend serving both the main and the staff API.
pub async fn backend() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(ClientConfig::single(server.uri())).unwrap();
    (server, client)
}

pub fn profile(id: i64, role: Role) -> StaffProfile {
    StaffProfile {
        id: Some(StaffId::new(id)),
        staff_id: None,
        name: Some("Lan".to_string()),
        staff_name: None,
        email: Some("lan@example.com".to_string()),
        role,
    }
}

pub fn session(id: i64, role: Role) -> Session {
    Session::new(TOKEN, Some(profile(id, role)))
}
