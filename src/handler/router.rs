//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, health
//! endpoints, then rule matching and meta document rendering.

use crate::config::Config;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::meta::{self, ResolvedSite};
use crate::routing;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let response = respond(&req, &config);

    if !config.site.quiet {
        let entry = access_entry(&req, peer_addr, &response);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Compute the response for a request
///
/// Synchronous and total: guards first, then rule matching, then
/// rendering. Generic over the body type so tests can use empty bodies.
fn respond<B>(req: &Request<B>, config: &Config) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method()) {
        return resp;
    }

    // 2. Check declared body size
    if let Some(resp) = check_body_size(req, config.http.max_body_size) {
        return resp;
    }

    let path = req.uri().path();

    // 3. Health check endpoints, ahead of rule matching
    if config.health.enabled
        && (path == config.health.liveness_path || path == config.health.readiness_path)
    {
        return http::build_health_response("ok");
    }

    // 4. Resolve site defaults against this request's Host value
    let request_host = req
        .headers()
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let site = ResolvedSite::new(&config.site, request_host);

    // 5. Match and render
    match routing::match_rule(path, &config.site.packages) {
        Some(rule) => {
            let html = meta::render(path, &site, rule);
            http::build_html_response(html, *req.method() == Method::HEAD)
        }
        None => http::build_404_response(),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Build the access log entry for a completed request
fn access_entry<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_token(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry
}

/// Version token as it appears in the request line ("1.1", "2", ...)
fn http_version_token(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    }
}
