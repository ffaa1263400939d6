//! Accept header parsing

use crate::proposal::Proposal;

/// Represents an Accept header as proposals in negotiation order
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptHeader {
	proposals: Vec<Proposal>,
}

impl AcceptHeader {
	/// Parses an Accept header string into proposals, highest precedence first
	///
	/// Malformed elements are dropped; the rest of the header still counts.
	/// An empty header stands for `*/*`.
	///
	/// # Examples
	///
	/// ```
	/// use repondez_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("*/*;q=0.8, application/xml;q=0.9, text/html");
	/// let order: Vec<String> = accept.media_types().collect();
	/// assert_eq!(order, ["text/html", "application/xml", "*/*"]);
	///
	/// let empty = AcceptHeader::parse("");
	/// assert_eq!(empty.media_types().collect::<Vec<_>>(), ["*/*"]);
	///
	/// let hostile = AcceptHeader::parse("text/plain;q=1000000, */html");
	/// assert!(hostile.is_empty());
	/// ```
	pub fn parse(header: &str) -> Self {
		if header.trim().is_empty() {
			return Self::any();
		}

		let mut proposals: Vec<Proposal> = header
			.split(',')
			.map(str::trim)
			.filter_map(|element| match Proposal::parse(element) {
				Ok(proposal) => Some(proposal),
				Err(error) => {
					tracing::debug!(element, %error, "dropping malformed Accept proposal");
					None
				}
			})
			.collect();

		// Stable, so equal proposals keep header order
		proposals.sort_by(Proposal::precedence);

		Self { proposals }
	}

	/// The header a client without preferences implies: `*/*`
	pub fn any() -> Self {
		Self {
			proposals: vec![Proposal::any()],
		}
	}

	pub fn proposals(&self) -> &[Proposal] {
		&self.proposals
	}

	/// Lazily yields each proposal's `supertype/subtype`
	pub fn media_types(&self) -> impl Iterator<Item = String> + '_ {
		self.proposals.iter().map(Proposal::media_type)
	}

	/// True when every element was malformed
	pub fn is_empty(&self) -> bool {
		self.proposals.is_empty()
	}

	/// Finds the first offer matching the highest-precedence proposal that
	/// matches anything.
	///
	/// # Examples
	///
	/// ```
	/// use repondez_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("application/json, text/html");
	/// let offers = ["text/html", "application/xml"];
	/// assert_eq!(accept.find_best_match(&offers), Some("text/html"));
	///
	/// let no_match = AcceptHeader::parse("application/json");
	/// assert_eq!(no_match.find_best_match(&offers), None);
	/// ```
	pub fn find_best_match<'a, S: AsRef<str>>(&self, offers: &'a [S]) -> Option<&'a str> {
		self.proposals.iter().find_map(|proposal| {
			offers
				.iter()
				.map(AsRef::as_ref)
				.find(|offer| proposal.matches(offer))
		})
	}
}

impl Default for AcceptHeader {
	fn default() -> Self {
		Self::any()
	}
}
