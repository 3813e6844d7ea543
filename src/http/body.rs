//! Response body types
//!
//! Handler text goes out as a single buffered frame; files are read and sent
//! chunk by chunk so their size never has to fit in memory.

use futures_util::stream;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Body, Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size for file bodies
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Body shared by every response the servers build
pub type ResponseBody = http_body_util::combinators::UnsyncBoxBody<Bytes, io::Error>;

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Stream `file` from its current position until EOF
pub fn file(file: File) -> ResponseBody {
    let frames = stream::try_unfold(file, |mut file| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let n = file.read(&mut buf).await?;
        if n == 0 {
            return Ok::<_, io::Error>(None);
        }
        buf.truncate(n);
        Ok(Some((Frame::data(Bytes::from(buf)), file)))
    });
    StreamBody::new(frames).boxed_unsync()
}

/// Exact body length when the body knows it up front
pub fn exact_len(body: &ResponseBody) -> Option<u64> {
    body.size_hint().exact()
}
