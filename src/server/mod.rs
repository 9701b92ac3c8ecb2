//! HTTP boundary: the key-injecting proxy in front of the provider.
//!
//! CORS is wide open so any browser origin can call the endpoint. There is no
//! request size limit and no rate limiting.

use crate::{
    config::Config,
    error::{Result, TryOnError},
    seedream::{UpstreamClient, PROXY_PATH},
};
use actix_web::{
    http::{header, Method},
    web, App, HttpRequest, HttpResponse, HttpResponseBuilder, HttpServer,
};
use serde::Serialize;
use uuid::Uuid;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[derive(Clone)]
pub struct ProxyState {
    upstream: UpstreamClient,
}

impl ProxyState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(UpstreamClient::new(&config.upstream)?))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn with_cors(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS));
    builder
}

fn error_response(builder: HttpResponseBuilder, message: impl Into<String>) -> HttpResponse {
    with_cors(builder).json(ErrorBody {
        error: message.into(),
    })
}

/// `/api/seedream` for every method; only `POST` reaches the provider.
pub async fn seedream_proxy(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<ProxyState>,
) -> HttpResponse {
    let method = req.method();

    if method == Method::OPTIONS {
        return with_cors(HttpResponse::Ok()).finish();
    }

    if method != Method::POST {
        log::warn!("Rejected {} {}", method, req.path());
        return error_response(
            HttpResponse::MethodNotAllowed(),
            "only POST requests are supported",
        );
    }

    let request_id = Uuid::new_v4();
    let timer = crate::logger::timer(&format!("proxy request {}", request_id));
    log::info!("[req:{}] Forwarding {} bytes upstream", request_id, body.len());

    let result = state.upstream.forward(body.to_vec()).await;
    drop(timer);

    match result {
        Ok(data) => with_cors(HttpResponse::Ok()).json(data),
        Err(e) => {
            log::error!("[req:{}] Proxy request failed: {}", request_id, e);
            error_response(HttpResponse::InternalServerError(), proxy_error_message(&e))
        }
    }
}

fn proxy_error_message(err: &TryOnError) -> String {
    match err {
        TryOnError::UpstreamStatus(_) => err.to_string(),
        TryOnError::RequestError(msg) | TryOnError::ResponseError(msg) => msg.clone(),
        other => other.to_string(),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // actix caps `Bytes` bodies at 256 KiB; two base64 photos are far larger
    cfg.app_data(web::PayloadConfig::new(usize::MAX))
        .route(PROXY_PATH, web::route().to(seedream_proxy));
}

/// Binds and runs the proxy until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let state = web::Data::new(ProxyState::from_config(&config)?);
    let address = config.bind_address();

    crate::logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(address.clone())
        .map_err(|e| {
            TryOnError::ConfigError(format!("Failed to bind {}:{}: {}", address.0, address.1, e))
        })?
        .run()
        .await
        .map_err(|e| TryOnError::ConfigError(format!("Server error: {}", e)))
}
