//! Proxy handler behaviour, with the provider mocked.
#![cfg(feature = "server")]

use actix_web::{
    http::{header, Method, StatusCode},
    test, web, App,
};
use rtryon::server::{configure, ProxyState, ALLOWED_HEADERS, ALLOWED_METHODS};
use rtryon::{UpstreamClient, UpstreamConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVER_KEY: &str = "server-held-key";

fn state_for(base_url: &str) -> web::Data<ProxyState> {
    let config = UpstreamConfig::new()
        .with_api_key(SERVER_KEY)
        .with_base_url(base_url);
    web::Data::new(ProxyState::new(UpstreamClient::new(&config).unwrap()))
}

fn assert_cors(headers: &header::HeaderMap) {
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        ALLOWED_METHODS
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        ALLOWED_HEADERS
    );
}

#[actix_web::test]
async fn preflight_gets_empty_ok_with_cors() {
    let app = test::init_service(
        App::new()
            .app_data(state_for("http://127.0.0.1:1"))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/seedream")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(resp.headers());
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn other_methods_are_not_allowed() {
    let app = test::init_service(
        App::new()
            .app_data(state_for("http://127.0.0.1:1"))
            .configure(configure),
    )
    .await;

    for m in [Method::GET, Method::PUT, Method::DELETE] {
        let req = test::TestRequest::default()
            .method(m.clone())
            .uri("/api/seedream")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{m}");
        assert_cors(resp.headers());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "only POST requests are supported");
    }
}

#[actix_web::test]
async fn post_is_forwarded_verbatim_with_server_key() {
    let upstream = MockServer::start().await;
    let caller_body = json!({
        "model": "doubao-seedream-4-0-250828",
        "prompt": "swap the outfit",
        "image": ["data:image/png;base64,AAAA", "data:image/png;base64,BBBB"],
        "size": "2K",
        "response_format": "b64_json",
        "watermark": false,
        "stream": false
    });
    let provider_reply = json!({
        "model": "doubao-seedream-4-0-250828",
        "created": 1757321139,
        "data": [{ "b64_json": "AAAA", "size": "2048x2048" }]
    });

    Mock::given(method("POST"))
        .and(path("/api/v3/images/generations"))
        .and(header_matcher("authorization", "Bearer server-held-key"))
        .and(header_matcher("content-type", "application/json"))
        .and(body_json(caller_body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_reply.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&upstream.uri()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/seedream")
        .insert_header((header::AUTHORIZATION, "Bearer caller-supplied"))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(caller_body.to_string())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(resp.headers());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, provider_reply);
}

#[actix_web::test]
async fn upstream_failure_status_becomes_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/images/generations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "AuthenticationError", "message": "bad key" }
        })))
        .mount(&upstream)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&upstream.uri()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/seedream")
        .set_payload(r#"{"prompt":"x"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(resp.headers());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "upstream request failed: 401");
}

#[actix_web::test]
async fn transport_failure_becomes_500_with_message() {
    // nothing listens on port 1
    let app = test::init_service(
        App::new()
            .app_data(state_for("http://127.0.0.1:1"))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/seedream")
        .set_payload(r#"{"prompt":"x"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}
