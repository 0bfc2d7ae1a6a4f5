//! Safe case-insensitive path resolution.
//!
//! The resolution pipeline is the security boundary of the server: segment
//! walking with traversal rejection ([`nocase`]), a bounded shared cache of
//! resolved segments ([`cache`]), and the post-resolution symlink-escape
//! check ([`safety`]).

pub mod cache;
pub mod nocase;
pub mod safety;

// Re-export the types the handler composes
pub use cache::{CacheStats, ResolveCache};
pub use nocase::{resolve_nocase, Resolution};
pub use safety::real_path_within;
