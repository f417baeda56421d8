#![allow(dead_code)]

use std::time::Duration;

use itrack::{Credential, TrackingClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GPS_TIME: i64 = 1_700_000_000;

pub fn client(server: &MockServer) -> TrackingClient {
    client_with(server, 1, Duration::from_secs(2))
}

pub fn client_with(server: &MockServer, concurrency: usize, timeout: Duration) -> TrackingClient {
    TrackingClient::builder(Credential::new("fleet", "secret"))
        .base_url(format!("{}/api", server.uri()))
        .timeout(timeout)
        .concurrency(concurrency)
        .build()
}

/// Accepts any signed authorization request and hands out `tok-1`.
pub async fn mount_auth(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .and(query_param("account", "fleet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "record": {"access_token": "tok-1", "expires_in": 7200}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn track_record(imei: &str, battery: i64) -> serde_json::Value {
    json!({
        "imei": imei,
        "gpstime": GPS_TIME,
        "servertime": GPS_TIME + 3,
        "longitude": 113.943,
        "latitude": 22.54,
        "speed": 42,
        "course": 180,
        "battery": battery,
        "accstatus": 1,
        "doorstatus": 0,
        "defencestatus": -1
    })
}

pub async fn mount_track_ok(server: &MockServer, imei: &str, battery: i64) {
    Mock::given(method("GET"))
        .and(path("/api/track"))
        .and(query_param("access_token", "tok-1"))
        .and(query_param("imeis", imei))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "record": [track_record(imei, battery)]
        })))
        .mount(server)
        .await;
}

pub async fn mount_track_error(server: &MockServer, imei: &str, message: &str) {
    Mock::given(method("GET"))
        .and(path("/api/track"))
        .and(query_param("imeis", imei))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 10004,
            "message": message
        })))
        .mount(server)
        .await;
}
