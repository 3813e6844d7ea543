//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, route lookup,
//! parameter extraction and dispatch to the sink handlers.

use crate::config::AppState;
use crate::handler::{command, path, Route};
use crate::http::{self, body, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::{Method, Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Handler output before it becomes a response
enum Payload {
    Text(String),
    File(path::FileBody),
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let response = respond(req.method(), req.uri(), &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = format!("{:?}", req.version())
            .trim_start_matches("HTTP/")
            .to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes(&response);
        entry.user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Bytes the body will carry: exact when buffered, the declared length when
/// streaming a regular file, 0 when the stream has no known end
fn body_bytes(response: &Response<ResponseBody>) -> usize {
    body::exact_len(response.body())
        .or_else(|| {
            response
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        })
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}

/// Build the response for one request
pub async fn respond(method: &Method, uri: &Uri, state: &AppState) -> Response<ResponseBody> {
    let is_head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        Method::OPTIONS => return http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response();
        }
    };

    let Some(route) = Route::from_path(uri.path()).filter(|r| r.fixture() == state.fixture)
    else {
        return http::build_404_response();
    };

    let value = http::get_param(uri.query(), route.param()).unwrap_or_default();
    let text_type = state.config.http.text_content_type.as_str();
    let server_name = &state.config.http.server_name;

    match dispatch(route, &value, state).await {
        Ok(Payload::Text(text)) => {
            let len = u64::try_from(text.len()).ok();
            http::build_ok_response(body::full(text), len, text_type, server_name, is_head)
        }
        Ok(Payload::File(file)) => http::build_ok_response(
            file.body,
            file.len,
            file.content_type.unwrap_or(text_type),
            server_name,
            is_head,
        ),
        Err(e) => {
            logger::log_error(&format!("{} failed: {e}", route.path()));
            http::build_500_response()
        }
    }
}

async fn dispatch(route: Route, value: &str, state: &AppState) -> std::io::Result<Payload> {
    let fixtures = &state.config.fixtures;
    let payload = match route {
        Route::Ping => Payload::Text(command::ping(value, fixtures).await?),
        Route::Backup => Payload::Text(command::backup(value, fixtures).await?),
        Route::Convert => Payload::Text(command::convert(value, fixtures).await?),
        Route::Process => Payload::Text(command::process(value, fixtures).await?),
        Route::List => Payload::Text(command::list(value, fixtures).await?),
        Route::Download => Payload::File(path::download(value, fixtures).await?),
        Route::Read => Payload::File(path::read(value).await?),
        Route::Static => Payload::File(path::serve_static(value, fixtures).await?),
        Route::Serve => Payload::File(path::serve(value).await?),
    };
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::Fixture;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn state(fixture: Fixture, dir: &TempDir) -> AppState {
        let mut config = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        let base = dir.path().join("base");
        std::fs::create_dir_all(&base).unwrap();
        config.fixtures.data_dir = format!("{}/", base.display());
        config.fixtures.static_dir = base.display().to_string();
        config.fixtures.work_dir = Some(dir.path().display().to_string());
        AppState::new(config, fixture)
    }

    async fn get(state: &AppState, uri: &str) -> (u16, String) {
        let uri: Uri = uri.parse().unwrap();
        let resp = respond(&Method::GET, &uri, state).await;
        let status = resp.status().as_u16();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_backup_route_returns_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Command, &dir);
        let (status, body) = get(&state, "/backup?file=missing%3B+exit+9").await;
        assert_eq!(status, 200);
        assert_eq!(body, "Backup created");
    }

    #[tokio::test]
    async fn test_ping_route_returns_status_text() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Command, &dir);
        let (status, body) = get(&state, "/ping?host=%3B+exit+4").await;
        assert_eq!(status, 200);
        assert_eq!(body, "4");
    }

    #[tokio::test]
    async fn test_path_routes_escape_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.txt"), "secret").unwrap();
        let state = state(Fixture::Path, &dir);

        assert_eq!(get(&state, "/download?file=../secret.txt").await, (200, "secret".to_string()));
        assert_eq!(
            get(&state, "/static?resource=..%2Fsecret.txt").await,
            (200, "secret".to_string())
        );

        let absolute = dir.path().join("secret.txt");
        let uri = format!("/read?path={}", absolute.display());
        assert_eq!(get(&state, &uri).await, (200, "secret".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_is_generic_500() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Path, &dir);
        let (status, body) = get(&state, "/download?file=absent.bin").await;
        assert_eq!(status, 500);
        assert!(!body.contains("absent.bin"));
    }

    #[tokio::test]
    async fn test_read_streams_with_text_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.bin"), "plain").unwrap();
        let state = state(Fixture::Path, &dir);
        let uri: Uri = format!("/read?path={}", dir.path().join("notes.bin").display())
            .parse()
            .unwrap();
        let resp = respond(&Method::GET, &uri, &state).await;
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(body_bytes(&resp), 5);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_endless_file_is_streamed_not_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Path, &dir);
        let uri: Uri = "/serve?path=/dev/zero".parse().unwrap();

        let resp = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            respond(&Method::GET, &uri, &state),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Content-Length").is_none());

        let mut body = resp.into_body();
        let chunk = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert!(!chunk.is_empty());
    }

    #[tokio::test]
    async fn test_error_responses_report_body_size() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Path, &dir);
        let not_found = respond(&Method::GET, &"/nope".parse().unwrap(), &state).await;
        assert_eq!(body_bytes(&not_found), "404 Not Found".len());
        let failed = respond(&Method::GET, &"/download?file=absent".parse().unwrap(), &state).await;
        assert_eq!(body_bytes(&failed), "500 Internal Server Error".len());
        let not_allowed = respond(&Method::DELETE, &"/read".parse().unwrap(), &state).await;
        assert_eq!(body_bytes(&not_allowed), "405 Method Not Allowed".len());
    }

    #[tokio::test]
    async fn test_other_fixture_routes_are_404() {
        let dir = tempfile::tempdir().unwrap();
        let command = state(Fixture::Command, &dir);
        let path = state(Fixture::Path, &dir);
        assert_eq!(get(&command, "/read?path=/etc/hostname").await.0, 404);
        assert_eq!(get(&path, "/ping?host=localhost").await.0, 404);
        assert_eq!(get(&path, "/process?file=-help").await.0, 404);
        assert_eq!(get(&path, "/").await.0, 404);
    }

    #[tokio::test]
    async fn test_methods() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(Fixture::Command, &dir);
        let uri: Uri = "/backup?file=x".parse().unwrap();

        assert_eq!(respond(&Method::POST, &uri, &state).await.status(), 405);
        assert_eq!(respond(&Method::OPTIONS, &uri, &state).await.status(), 204);

        let head = respond(&Method::HEAD, &uri, &state).await;
        assert_eq!(head.status(), 200);
        let body = head.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
