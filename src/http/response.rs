//! HTTP response building.
//!
//! One builder per status code, decoupled from the resolution logic. Every
//! builder falls back to a bare response if header assembly fails rather
//! than propagating an error into the connection.

use hyper::Response;

use super::body::{self, ResponseBody};
use super::range::ByteRange;
use crate::logger;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>404 - File not found</title></head>
<body>
<h1>404 - File not found</h1>
<p>The requested file could not be found.</p>
</body>
</html>"#;

const NOT_FOUND_TEXT: &str = "Not found";

/// Build 404 Not Found, as a structured HTML page or plain text per
/// configuration. Safety rejections reuse this response unchanged so a
/// blocked path is indistinguishable from a missing one.
pub fn build_404_response(plain: bool, is_head: bool) -> Response<ResponseBody> {
    let (content_type, page) = if plain {
        ("text/plain; charset=utf-8", NOT_FOUND_TEXT)
    } else {
        ("text/html; charset=utf-8", NOT_FOUND_PAGE)
    };
    let body = if is_head {
        body::empty()
    } else {
        body::full(page)
    };

    Response::builder()
        .status(404)
        .header("Content-Type", content_type)
        .header("Content-Length", page.len())
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(body::empty())
        })
}

/// Build 405 Method Not Allowed listing the permitted methods.
pub fn build_405_response() -> Response<ResponseBody> {
    Response::builder()
        .status(405)
        .header("Allow", "GET, HEAD")
        .header("Content-Length", 0)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(body::empty())
        })
}

/// Build 416 Range Not Satisfiable carrying the total resource size.
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(416)
        .header("Content-Range", format!("bytes */{file_size}"))
        .header("Content-Length", 0)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(body::empty())
        })
}

/// Build 500 Internal Server Error with a generic message; details stay in
/// the server log.
pub fn build_500_response() -> Response<ResponseBody> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(body::full("Internal error"))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(body::empty())
        })
}

/// Build 200 OK for a whole file. `body` is the streamed file for GET or
/// empty for HEAD; headers are identical either way.
pub fn build_file_response(
    body: ResponseBody,
    content_type: &str,
    file_size: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", file_size)
        .header("Accept-Ranges", "bytes")
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build 206 Partial Content for a validated byte range.
pub fn build_partial_response(
    body: ResponseBody,
    content_type: &str,
    range: ByteRange,
    file_size: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.length())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{file_size}", range.start, range.end),
        )
        .header("Accept-Ranges", "bytes")
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(body::empty())
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
