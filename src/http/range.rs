//! HTTP Range header parsing.
//!
//! Single-range `bytes=` parsing against a known resource size. Multi-range
//! headers are rejected as a whole rather than partially honored, so length
//! accounting can never be silently wrong.

/// A concrete byte interval within a resource of known size.
///
/// Invariant: `start <= end < file_size` for the size it was parsed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered, `end - start + 1`.
    #[inline]
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a Range header value against `file_size`.
///
/// Supported forms:
/// - `bytes=start-end`: bounded range
/// - `bytes=start-`: from `start` to the end of the file
/// - `bytes=-suffix`: the last `suffix` bytes
///
/// Returns `None` for anything malformed or unsatisfiable: a missing
/// `bytes=` prefix, non-numeric offsets, comma-separated multi-ranges,
/// `end >= file_size`, or `start > end`.
///
/// # Examples
/// ```
/// use nocase_server::http::range::parse_range;
///
/// let range = parse_range("bytes=0-99", 1000).unwrap();
/// assert_eq!((range.start, range.end, range.length()), (0, 99, 100));
///
/// let suffix = parse_range("bytes=-100", 1000).unwrap();
/// assert_eq!((suffix.start, suffix.end), (900, 999));
///
/// assert_eq!(parse_range("bytes=9999999-", 1000), None);
/// ```
pub fn parse_range(header: &str, file_size: u64) -> Option<ByteRange> {
    let value = header.strip_prefix("bytes=")?.trim();
    if value.is_empty() || value.contains(',') {
        return None;
    }
    // No byte of an empty file is addressable.
    if file_size == 0 {
        return None;
    }

    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let (start_str, end_str) = (parts[0].trim(), parts[1].trim());

    let (start, end) = if start_str.is_empty() {
        // Suffix form: the last N bytes, clamped to the start of the file.
        let suffix = end_str.parse::<u64>().ok()?;
        (file_size.saturating_sub(suffix), file_size - 1)
    } else {
        let start = start_str.parse::<u64>().ok()?;
        let end = if end_str.is_empty() {
            file_size - 1
        } else {
            end_str.parse::<u64>().ok()?
        };
        (start, end)
    };

    if end >= file_size || start > end {
        return None;
    }
    Some(ByteRange { start, end })
}
