//! HTTP response building module
//!
//! Builders for the handful of statuses the fixture servers answer with.

use super::body::{self, ResponseBody};
use hyper::Response;

/// Build 200 OK response; HEAD keeps the headers and drops the body
///
/// `content_length` is omitted for bodies of unknown size (pipes, devices),
/// which hyper then sends chunked.
pub fn build_ok_response(
    data: ResponseBody,
    content_length: Option<u64>,
    content_type: &str,
    server_name: &str,
    is_head: bool,
) -> Response<ResponseBody> {
    let body = if is_head { body::empty() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Server", server_name);
    if let Some(len) = content_length {
        builder = builder.header("Content-Length", len);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(body::empty())
    })
}

/// Plain-text error response with an explicit Content-Length
fn build_text_error(status: u16, text: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Content-Length", text.len())
        .body(body::full(text))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(body::full(text))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_text_error(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    let mut resp = build_text_error(405, "405 Method Not Allowed");
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static("GET, HEAD, OPTIONS"),
    );
    resp
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<ResponseBody> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(body::empty())
        })
}

/// Build 500 Internal Server Error response
///
/// The body never carries the underlying error.
pub fn build_500_response() -> Response<ResponseBody> {
    build_text_error(500, "500 Internal Server Error")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
