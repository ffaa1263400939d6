//! Picks one offered media type for a request.

use std::collections::HashMap;

use crate::accept::AcceptHeader;
use crate::media_type::media_types_match;

/// Outcome of a negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Negotiation<'a> {
	/// The offer to render
	Matched(&'a str),
	/// No offer satisfies any proposal
	NotAcceptable,
	/// A path extension was given but is unknown or not offered
	UnmatchedExtension(String),
}

impl<'a> Negotiation<'a> {
	pub fn media_type(&self) -> Option<&'a str> {
		match self {
			Self::Matched(media_type) => Some(*media_type),
			_ => None,
		}
	}
}

/// Matches proposals against offers, letting a path extension override the
/// `Accept` header.
///
/// Offers are tried in order for each proposal, so the server's ordering
/// breaks ties inside whatever the client considers equivalent.
#[derive(Debug, Clone, Copy)]
pub struct ContentNegotiator<'r> {
	extensions: &'r HashMap<String, String>,
}

impl<'r> ContentNegotiator<'r> {
	/// Creates a negotiator over an extension → media type map
	pub fn new(extensions: &'r HashMap<String, String>) -> Self {
		Self { extensions }
	}

	/// Chooses a media type.
	///
	/// With an extension the `Accept` header is ignored: the extension's
	/// media type must be offered, otherwise the result is
	/// [`Negotiation::UnmatchedExtension`].
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use repondez_negotiation::{AcceptHeader, ContentNegotiator, Negotiation};
	///
	/// let extensions = HashMap::from([("json".to_string(), "application/json".to_string())]);
	/// let negotiator = ContentNegotiator::new(&extensions);
	/// let offers = ["text/plain", "application/json"];
	/// let accept = AcceptHeader::parse("text/html");
	///
	/// assert_eq!(negotiator.negotiate(Some("json"), &accept, &offers), Negotiation::Matched("application/json"));
	/// assert_eq!(negotiator.negotiate(None, &accept, &offers), Negotiation::NotAcceptable);
	/// assert_eq!(
	///     negotiator.negotiate(Some("blah"), &accept, &offers),
	///     Negotiation::UnmatchedExtension("blah".to_string())
	/// );
	/// ```
	pub fn negotiate<'a, S: AsRef<str>>(
		&self,
		extension: Option<&str>,
		accept: &AcceptHeader,
		offers: &'a [S],
	) -> Negotiation<'a> {
		if let Some(extension) = extension.filter(|ext| !ext.is_empty()) {
			return self.negotiate_extension(extension, offers);
		}

		match accept.find_best_match(offers) {
			Some(media_type) => Negotiation::Matched(media_type),
			None => Negotiation::NotAcceptable,
		}
	}

	fn negotiate_extension<'a, S: AsRef<str>>(
		&self,
		extension: &str,
		offers: &'a [S],
	) -> Negotiation<'a> {
		let matched = self.extensions.get(extension).and_then(|target| {
			offers
				.iter()
				.map(AsRef::as_ref)
				.find(|offer| media_types_match(offer, target))
		});

		match matched {
			Some(media_type) => Negotiation::Matched(media_type),
			None => {
				tracing::debug!(extension, "path extension does not map to any offer");
				Negotiation::UnmatchedExtension(extension.to_string())
			}
		}
	}
}
