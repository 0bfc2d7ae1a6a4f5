//! HTTP protocol layer.
//!
//! Range parsing, body construction, and response builders, decoupled from
//! path resolution so they can be exercised in isolation.

pub mod body;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use range::{parse_range, ByteRange};
pub use response::{
    build_404_response, build_405_response, build_416_response, build_500_response,
    build_file_response, build_partial_response,
};
