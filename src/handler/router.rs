//! Request entry point.
//!
//! Method validation and header extraction; everything path-related is
//! delegated to [`static_files`](super::static_files).

use std::convert::Infallible;
use std::sync::Arc;

use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger;

/// Request context encapsulating what the serving path needs
pub struct RequestContext<'a> {
    /// Percent-decoded request path
    pub path: &'a str,
    pub is_head: bool,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    if state.config.logging.access_log {
        logger::log_request(method, uri, req.version());
    }

    // Only GET and HEAD are served; everything else stops here.
    if !matches!(*method, Method::GET | Method::HEAD) {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return Ok(http::build_405_response());
    }

    // The path arrives percent-encoded; resolution works on the decoded
    // form. A sequence that does not decode to UTF-8 is unexpected input
    // and takes the internal-error path.
    let decoded = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => path,
        Err(e) => {
            logger::log_error(&format!("Undecodable request path {:?}: {e}", uri.path()));
            return Ok(http::build_500_response());
        }
    };

    let ctx = RequestContext {
        path: &decoded,
        is_head,
        range_header: req
            .headers()
            .get("range")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    Ok(static_files::serve(&ctx, &state).await)
}
