//! HTTP integration tests using a mock Axum server
//!
//! The client is blocking, so the server runs on a background thread with
//! its own current-thread runtime; tests drive the client from plain
//! `#[test]` functions. Request bodies are captured into shared state so
//! the wire format (token injection, `apiArgs` placement) can be asserted.

use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde_json::json;
use xmltree::Element;

use awasu_core::ApiArgs;
use awasu_http::{ApiRequest, AwasuClient, AwasuError};

type Captured = Arc<Mutex<Option<String>>>;

async fn build_info_handler(State(captured): State<Captured>, body: String) -> impl IntoResponse {
    *captured.lock().unwrap() = Some(body);
    Json(json!({ "buildInfo": { "version": "3.12", "build": "5840" } }))
}

async fn channels_list_handler(
    State(captured): State<Captured>,
    body: String,
) -> impl IntoResponse {
    *captured.lock().unwrap() = Some(body);
    Json(json!({ "channels": [ { "id": "1", "name": "News" } ] }))
}

async fn channels_delete_handler() -> impl IntoResponse {
    Json(json!({
        "channels": [
            { "id": "1", "name": "A", "status": "OK" },
            { "id": "2", "name": "B", "status": "Channel is locked" },
            { "id": "3", "name": "C", "status": "Also broken" },
        ]
    }))
}

async fn channels_get_handler() -> impl IntoResponse {
    r#"<html><table><td class="error-msg value"> Channel not found </td></table></html>"#
        .to_string()
}

async fn workpads_get_handler(body: String) -> impl IntoResponse {
    let args = Element::parse(body.as_bytes()).unwrap();
    if args.attributes.get("id").map(String::as_str) == Some("@") {
        Json(json!({ "status": { "errorMsg": "No workpads were selected." } }))
    } else {
        Json(json!({ "workpad": { "name": "Clippings", "workpadItems": [] } }))
    }
}

async fn workpads_feed_handler(body: String) -> impl IntoResponse {
    let args = Element::parse(body.as_bytes()).unwrap();
    if args.attributes.get("id").map(String::as_str) == Some("bad") {
        "<response><errorMsg>No such workpad.</errorMsg></response>".to_string()
    } else {
        "<rss><channel><title>Clippings</title></channel></rss>".to_string()
    }
}

async fn workpads_create_handler(
    State(captured): State<Captured>,
    body: String,
) -> impl IntoResponse {
    *captured.lock().unwrap() = Some(body);
    Json(json!({ "status": { "id": "77" } }))
}

async fn workpads_add_item_handler() -> impl IntoResponse {
    Json(json!({ "workpads": [ { "id": "7", "name": "Clippings", "status": "OK" } ] }))
}

async fn bad_token_handler() -> impl IntoResponse {
    Json(json!({ "status": { "errorMsg": "Bad token" } }))
}

async fn error_500_handler() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "oops")
}

async fn json_500_handler() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": { "errorMsg": "boom" } })),
    )
}

async fn deflate_handler() -> impl IntoResponse {
    // Raw deflate stream, matching the server's Content-Encoding.
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"<response><ok>yes</ok></response>")
        .unwrap();
    let compressed = encoder.finish().unwrap();
    ([(header::CONTENT_ENCODING, "deflate")], compressed)
}

/// Start the mock server on a random port and return its address plus the
/// captured-request-body cell.
fn start_test_server() -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route("/buildInfo", post(build_info_handler))
        .route("/channels/list", post(channels_list_handler))
        .route("/channels/delete", post(channels_delete_handler))
        .route("/channels/get", post(channels_get_handler))
        .route("/workpads/get", post(workpads_get_handler))
        .route("/workpads/feed", post(workpads_feed_handler))
        .route("/workpads/create", post(workpads_create_handler))
        .route("/workpads/addItem", post(workpads_add_item_handler))
        .route("/badToken", post(bad_token_handler))
        .route("/error500", post(error_500_handler))
        .route("/json500", post(json_500_handler))
        .route("/deflate", post(deflate_handler))
        .with_state(captured.clone());

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    (addr, captured)
}

fn client_for(addr: SocketAddr) -> AwasuClient {
    AwasuClient::new(format!("http://{addr}"))
}

#[test]
fn test_build_info_unwraps_named_field() {
    let (addr, _) = start_test_server();
    let info = client_for(addr).build_info().unwrap();
    assert_eq!(info["version"], "3.12");
}

#[test]
fn test_token_travels_in_the_post_body() {
    let (addr, captured) = start_test_server();
    let client = client_for(addr).with_token("secret");
    client.build_info().unwrap();

    let body = captured.lock().unwrap().take().unwrap();
    let args = Element::parse(body.as_bytes()).unwrap();
    assert_eq!(args.name, "apiArgs");
    assert_eq!(args.attributes.get("token").map(String::as_str), Some("secret"));
    assert_eq!(args.attributes.get("format").map(String::as_str), Some("json"));
    assert_eq!(args.attributes.get("quiet").map(String::as_str), Some("false"));
}

#[test]
fn test_supplied_body_gets_api_args_first() {
    let (addr, captured) = start_test_server();
    let id = client_for(addr).create_workpad("Read later", Some("links & notes")).unwrap();
    assert_eq!(id, "77");

    let body = captured.lock().unwrap().take().unwrap();
    let root = Element::parse(body.as_bytes()).unwrap();
    assert_eq!(root.name, "workpad");
    let first_child = root
        .children
        .iter()
        .filter_map(|n| n.as_element())
        .next()
        .unwrap();
    assert_eq!(first_child.name, "apiArgs");
    // The generated body escaped the description on the way through.
    assert_eq!(
        root.get_child("description").unwrap().get_text().unwrap(),
        "links & notes"
    );
}

#[test]
fn test_http_500_raises_with_full_status_line() {
    let (addr, _) = start_test_server();
    let client = client_for(addr);
    let err = client
        .call_and_check(ApiRequest::new("error500"))
        .unwrap_err();
    assert!(
        matches!(&err, AwasuError::Api(msg) if msg == "HTTP/1.1 500 Internal Server Error"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_call_parses_failure_bodies_per_declared_format() {
    // Raw mode is the only parse bypass; an error status doesn't change how
    // `call` decodes the body.
    let (addr, _) = start_test_server();
    let mut args = ApiArgs::new();
    args.set("format", "json");
    let body = client_for(addr)
        .call(ApiRequest::new("json500").args(args))
        .unwrap();
    let json = body.into_json().unwrap();
    assert_eq!(json["status"]["errorMsg"], "boom");
}

#[test]
fn test_check_reports_error_status_before_embedded_error() {
    let (addr, _) = start_test_server();
    let mut args = ApiArgs::new();
    args.set("format", "json");
    let err = client_for(addr)
        .call_and_check(ApiRequest::new("json500").args(args))
        .unwrap_err();
    assert!(
        matches!(&err, AwasuError::Api(msg) if msg == "HTTP/1.1 500 Internal Server Error")
    );
}

#[test]
fn test_json_error_msg_raises() {
    let (addr, _) = start_test_server();
    let mut args = ApiArgs::new();
    args.set("format", "json");
    let err = client_for(addr)
        .call_and_check(ApiRequest::new("badToken").args(args))
        .unwrap_err();
    assert!(matches!(&err, AwasuError::Api(msg) if msg == "Bad token"));
}

#[test]
fn test_deflate_response_is_inflated() {
    let (addr, _) = start_test_server();
    let body = client_for(addr).call(ApiRequest::new("deflate")).unwrap();
    let xml = body.into_xml().unwrap();
    assert_eq!(xml.name, "response");
    assert_eq!(xml.get_child("ok").unwrap().get_text().unwrap(), "yes");
}

#[test]
fn test_raw_mode_skips_parsing() {
    let (addr, _) = start_test_server();
    let mut args = ApiArgs::new();
    args.set("format", "json");
    let body = client_for(addr)
        .call(ApiRequest::new("badToken").args(args).raw())
        .unwrap();
    let text = body.into_raw().unwrap();
    assert!(text.contains("errorMsg"));
}

#[test]
fn test_headers_are_returned_on_request() {
    let (addr, _) = start_test_server();
    let (headers, _) = client_for(addr)
        .call_with_headers(ApiRequest::new("deflate"))
        .unwrap();
    assert_eq!(headers.status_line(), Some("HTTP/1.1 200 OK"));
    assert_eq!(headers.get("content-encoding"), Some("deflate"));
}

#[test]
fn test_channel_summary_html_error() {
    let (addr, _) = start_test_server();
    let err = client_for(addr).channel_summary("42").unwrap_err();
    assert!(matches!(&err, AwasuError::Api(msg) if msg == "Channel not found"));
}

#[test]
fn test_single_get_rejects_multiple_ids_before_any_network_call() {
    // Port 1 refuses connections; an InvalidInput error proves the request
    // never left the client.
    let client = AwasuClient::new("http://127.0.0.1:1");
    let err = client.channel_summary(vec!["1", "2"]).unwrap_err();
    assert!(matches!(err, AwasuError::InvalidInput(_)));

    let err = client.workpad(vec!["1", "2"]).unwrap_err();
    assert!(
        matches!(&err, AwasuError::InvalidInput(msg) if msg == "Can't get multiple workpads.")
    );
}

#[test]
fn test_workpad_returns_named_field() {
    let (addr, _) = start_test_server();
    let workpad = client_for(addr).workpad("7").unwrap();
    assert_eq!(workpad["name"], "Clippings");
}

#[test]
fn test_default_workpad_maps_no_selection_to_none() {
    let (addr, _) = start_test_server();
    let workpad = client_for(addr).default_workpad().unwrap();
    assert!(workpad.is_none());
}

#[test]
fn test_workpad_feed_returns_xml_text() {
    let (addr, _) = start_test_server();
    let feed = client_for(addr).workpad_feed("7").unwrap();
    let root = Element::parse(feed.as_bytes()).unwrap();
    assert_eq!(root.name, "rss");
}

#[test]
fn test_workpad_feed_error_msg_raises() {
    let (addr, _) = start_test_server();
    let err = client_for(addr).workpad_feed("bad").unwrap_err();
    assert!(matches!(&err, AwasuError::Api(msg) if msg == "No such workpad."));
}

#[test]
fn test_add_workpad_item_all_ok() {
    let (addr, _) = start_test_server();
    client_for(addr)
        .add_workpad_item("7", "http://example.com", Some("Example"), &[])
        .unwrap();
}

#[test]
fn test_delete_channels_reports_first_failure() {
    let (addr, _) = start_test_server();
    let err = client_for(addr).delete_channels(vec!["1", "2", "3"]).unwrap_err();
    assert!(matches!(
        &err,
        AwasuError::Api(msg) if msg == "Can't delete channel \"B\" (2): Channel is locked"
    ));
}

#[test]
fn test_connection_refused_is_a_connection_error() {
    let client = AwasuClient::new("http://127.0.0.1:1");
    let err = client.call(ApiRequest::new("buildInfo")).unwrap_err();
    assert!(matches!(err, AwasuError::Connection(_)));
}
