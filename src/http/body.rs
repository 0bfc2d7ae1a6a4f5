//! Response body construction.
//!
//! Error pages are small and buffered; file payloads are streamed in chunks
//! so a large download never sits in memory and the read side pauses
//! whenever the socket is not ready for more.

use futures_util::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

/// Body type shared by every response the server produces.
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

/// An empty body (HEAD responses, bodiless status codes).
pub fn empty() -> ResponseBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

/// A fully buffered body for small fixed payloads.
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Stream exactly `length` bytes from `file`'s current position.
///
/// The caller positions the file (start of file, or seeked to a range
/// start). Read errors mid-stream abort the connection and are logged by
/// the connection layer, never escalated past it.
pub fn file_stream(file: File, length: u64) -> ResponseBody {
    let reader = ReaderStream::new(file.take(length));
    StreamBody::new(reader.map_ok(Frame::data)).boxed()
}
