//! Path-access handlers
//!
//! Paths are built from the raw parameter with no normalization and no
//! containment check against the base directory. Files are opened here and
//! streamed by the response body.

use crate::config::FixtureConfig;
use crate::http::{body, mime, ResponseBody};
use crate::logger;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// An opened file ready to be streamed
pub struct FileBody {
    pub body: ResponseBody,
    /// Known only for regular files
    pub len: Option<u64>,
    /// `None` means the configured text content type
    pub content_type: Option<&'static str>,
}

/// `<data_dir><file>` as plain string concatenation
pub fn download_path(data_dir: &str, file: &str) -> String {
    format!("{data_dir}{file}")
}

/// `static_dir` joined with `resource`; an absolute resource replaces the base
pub fn static_path(static_dir: &str, resource: &str) -> PathBuf {
    Path::new(static_dir).join(resource)
}

/// Open `path` for streaming. Directories are rejected up front since
/// reading one only fails once the response has started.
async fn open(route: &str, path: &Path) -> io::Result<(ResponseBody, Option<u64>)> {
    logger::log_sink(route, &path.to_string_lossy());
    let file = File::open(path).await?;
    let meta = file.metadata().await?;
    if meta.is_dir() {
        return Err(io::Error::other(format!("{} is a directory", path.display())));
    }
    let len = meta.is_file().then(|| meta.len());
    Ok((body::file(file), len))
}

async fn send_file(route: &str, path: &Path) -> io::Result<FileBody> {
    let (body, len) = open(route, path).await?;
    Ok(FileBody {
        body,
        len,
        content_type: Some(mime::content_type_for(path)),
    })
}

pub async fn download(file: &str, cfg: &FixtureConfig) -> io::Result<FileBody> {
    let path = download_path(&cfg.data_dir, file);
    send_file("download", Path::new(&path)).await
}

/// Stream `path` as text
pub async fn read(path: &str) -> io::Result<FileBody> {
    let (body, len) = open("read", Path::new(path)).await?;
    Ok(FileBody {
        body,
        len,
        content_type: None,
    })
}

pub async fn serve_static(resource: &str, cfg: &FixtureConfig) -> io::Result<FileBody> {
    let path = static_path(&cfg.static_dir, resource);
    send_file("static", &path).await
}

/// Send the file at `path` with no base directory at all
pub async fn serve(path: &str) -> io::Result<FileBody> {
    send_file("serve", Path::new(path)).await
}
