//! Static file serving.
//!
//! Composes the resolver, the symlink-safety check, and the range parser
//! into one response per request. Every "absent" condition (unresolved
//! segment, failed SPA fallback, safety rejection, missing directory
//! index) produces the same 404, so a blocked path leaks nothing about
//! what exists on disk.

use std::io::{self, SeekFrom};
use std::path::Path;

use hyper::Response;
use tokio::fs::{self, File};
use tokio::io::AsyncSeekExt;

use crate::config::AppState;
use crate::http::{self, body, parse_range, ResponseBody};
use crate::logger;
use crate::resolve::{real_path_within, resolve_nocase, Resolution};

use super::router::RequestContext;

/// Serve one request against the document root.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<ResponseBody> {
    let response = match try_serve(ctx, state).await {
        Ok(response) => response,
        Err(err) => {
            logger::log_error(&format!("Unexpected error serving {}: {err}", ctx.path));
            http::build_500_response()
        }
    };

    if state.config.logging.access_log {
        let bytes = response
            .headers()
            .get("Content-Length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        logger::log_response(response.status().as_u16(), bytes);
    }
    response
}

/// The fallible serving path; any error escaping here becomes a 500.
async fn try_serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> io::Result<Response<ResponseBody>> {
    let segments: Vec<&str> = ctx.path.split('/').filter(|s| !s.is_empty()).collect();
    let index_file = state.config.serving.index_file.as_str();

    let mut candidate = match resolve_nocase(&state.root, &segments, &state.cache).await {
        Resolution::Found(path) => Some(path),
        Resolution::NotFound => None,
    };

    // SPA fallback: unresolved paths get the root index document instead.
    if candidate.is_none() && state.config.serving.spa_fallback {
        candidate = match resolve_nocase(&state.root, &[index_file], &state.cache).await {
            Resolution::Found(path) => Some(path),
            Resolution::NotFound => None,
        };
    }
    let Some(candidate) = candidate else {
        return Ok(not_found(ctx, state));
    };

    // Segment resolution allows symlinked entries; the real-path check
    // decides whether the final target stays inside the root.
    let Some(mut file_path) = real_path_within(&state.root, &candidate).await else {
        return Ok(not_found(ctx, state));
    };

    let Some(mut metadata) = stat(&file_path).await? else {
        return Ok(not_found(ctx, state));
    };

    // Directory request: resolve its index document case-insensitively.
    if metadata.is_dir() {
        match resolve_nocase(&file_path, &[index_file], &state.cache).await {
            Resolution::Found(index_path) => {
                file_path = index_path;
                match stat(&file_path).await? {
                    Some(m) => metadata = m,
                    None => return Ok(not_found(ctx, state)),
                }
            }
            Resolution::NotFound => return Ok(not_found(ctx, state)),
        }
    }

    let file_size = metadata.len();
    let mime = mime_guess::from_path(&file_path).first_or_octet_stream();

    if let Some(header) = ctx.range_header.as_deref() {
        return match parse_range(header, file_size) {
            Some(range) => {
                let payload = if ctx.is_head {
                    body::empty()
                } else {
                    let Some(mut file) = open(&file_path).await? else {
                        return Ok(not_found(ctx, state));
                    };
                    file.seek(SeekFrom::Start(range.start)).await?;
                    body::file_stream(file, range.length())
                };
                Ok(http::build_partial_response(
                    payload,
                    mime.as_ref(),
                    range,
                    file_size,
                ))
            }
            None => Ok(http::build_416_response(file_size)),
        };
    }

    let payload = if ctx.is_head {
        body::empty()
    } else {
        let Some(file) = open(&file_path).await? else {
            return Ok(not_found(ctx, state));
        };
        body::file_stream(file, file_size)
    };
    Ok(http::build_file_response(payload, mime.as_ref(), file_size))
}

fn not_found(ctx: &RequestContext<'_>, state: &AppState) -> Response<ResponseBody> {
    http::build_404_response(state.config.serving.plain_404, ctx.is_head)
}

/// Stat that distinguishes "vanished between resolution and stat" (a 404,
/// the file can legitimately disappear in that window) from real I/O errors.
async fn stat(path: &Path) -> io::Result<Option<std::fs::Metadata>> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Open with the same vanished-file handling as [`stat`].
async fn open(path: &Path) -> io::Result<Option<File>> {
    match File::open(path).await {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
