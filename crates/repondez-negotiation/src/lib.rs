//! # Repondez Negotiation
//!
//! Server-driven content negotiation primitives:
//!
//! - [`AcceptHeader`]: parses an `Accept` header into proposals ordered by
//!   weight and specificity, silently dropping malformed elements.
//! - [`ContentNegotiator`]: picks exactly one offered media type from the
//!   proposals, honoring a URL path extension when one is given.
//! - [`media_type`]: the always-present media types and the match rule.
//! - [`format_suffix`]: path extension extraction.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use repondez_negotiation::{AcceptHeader, ContentNegotiator, Negotiation};
//!
//! let extensions = HashMap::new();
//! let negotiator = ContentNegotiator::new(&extensions);
//! let accept = AcceptHeader::parse("text/html;q=0.5, application/*");
//! let offers = vec!["text/plain".to_string(), "application/json".to_string()];
//!
//! let chosen = negotiator.negotiate(None, &accept, &offers);
//! assert_eq!(chosen, Negotiation::Matched("application/json"));
//! ```

pub mod accept;
pub mod error;
pub mod format_suffix;
pub mod media_type;
pub mod negotiator;
pub mod proposal;

pub use accept::AcceptHeader;
pub use error::{ProposalError, Result};
pub use format_suffix::extract_format_suffix;
pub use media_type::media_types_match;
pub use negotiator::{ContentNegotiator, Negotiation};
pub use proposal::Proposal;
