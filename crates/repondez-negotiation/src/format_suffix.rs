//! Format suffix extraction utilities
//!
//! Extracts the trailing file extension of a URL path, such as `json` in
//! `/api/users.json`. Only the final path segment is considered.
//!
//! # Examples
//!
//! ```
//! use repondez_negotiation::format_suffix::{extract_format_suffix, path_extension};
//!
//! let (path, format) = extract_format_suffix("/api/users.json");
//! assert_eq!(path, "/api/users");
//! assert_eq!(format, Some("json"));
//!
//! assert_eq!(path_extension("/Files/REPORT.CSV"), Some("csv".to_string()));
//! assert_eq!(path_extension("/v1.2/users"), None);
//! ```

/// Extracts format suffix from a URL path
///
/// Returns a tuple of (path_without_suffix, suffix). Any suffix counts,
/// recognized or not; deciding what it maps to is the negotiator's job.
///
/// # Examples
///
/// ```
/// use repondez_negotiation::format_suffix::extract_format_suffix;
///
/// assert_eq!(extract_format_suffix("/posts.rss.xml"), ("/posts.rss", Some("xml")));
/// assert_eq!(extract_format_suffix("/message.blah"), ("/message", Some("blah")));
/// assert_eq!(extract_format_suffix("/api/users"), ("/api/users", None));
/// assert_eq!(extract_format_suffix("/trailing."), ("/trailing.", None));
/// ```
pub fn extract_format_suffix(path: &str) -> (&str, Option<&str>) {
	let segment_start = path.rfind('/').map_or(0, |slash| slash + 1);
	if let Some(dot) = path[segment_start..].rfind('.') {
		let dot_index = segment_start + dot;
		let suffix = &path[dot_index + 1..];
		if !suffix.is_empty() {
			return (&path[..dot_index], Some(suffix));
		}
	}

	(path, None)
}

/// The lowercase extension of a path, if any
pub fn path_extension(path: &str) -> Option<String> {
	extract_format_suffix(path)
		.1
		.map(str::to_ascii_lowercase)
}
