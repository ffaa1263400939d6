//! `Accept` parsing and offer selection.
//!
//! # Examples
//!
//! ```
//! use repondez::negotiation::AcceptHeader;
//!
//! let accept = AcceptHeader::parse("*/*;q=0.8, text/html");
//! assert_eq!(accept.media_types().collect::<Vec<_>>(), ["text/html", "*/*"]);
//! ```

pub use repondez_negotiation::*;
