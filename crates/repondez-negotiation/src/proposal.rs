//! A single client preference from an `Accept` header.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ProposalError, Result};
use crate::media_type;

/// Longest `q` value accepted, e.g. `0.125`
const MAX_WEIGHT_LEN: usize = 4;

/// A `supertype/subtype` pair with its weight and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
	supertype: String,
	subtype: String,
	weight: f32,
	params: HashMap<String, Vec<String>>,
}

impl Proposal {
	/// Parses one comma-separated element of an `Accept` header.
	///
	/// # Examples
	///
	/// ```
	/// use repondez_negotiation::{Proposal, ProposalError};
	///
	/// let proposal = Proposal::parse("text/plain; q=0.5; format=flowed").unwrap();
	/// assert_eq!(proposal.media_type(), "text/plain");
	/// assert_eq!(proposal.weight(), 0.5);
	/// assert_eq!(proposal.param("format"), Some("flowed"));
	///
	/// assert_eq!(Proposal::parse("*/html"), Err(ProposalError::WildSupertype("html".into())));
	/// assert_eq!(Proposal::parse("text/*;q=0.12345"), Err(ProposalError::BadWeight("0.12345".into())));
	/// ```
	pub fn parse(element: &str) -> Result<Self> {
		let mut tokens = element.split(';');
		let media_type = tokens.next().unwrap_or_default().trim();
		if media_type.is_empty() {
			return Err(ProposalError::Empty);
		}

		let (supertype, subtype) = media_type::split(media_type);
		if supertype.is_empty() {
			return Err(ProposalError::EmptySupertype);
		}
		if subtype.is_empty() {
			return Err(ProposalError::EmptySubtype);
		}
		if supertype == "*" && subtype != "*" {
			return Err(ProposalError::WildSupertype(subtype.to_string()));
		}

		let mut params: HashMap<String, Vec<String>> = HashMap::new();
		for token in tokens.map(str::trim).filter(|t| !t.is_empty()) {
			let (key, value) = token
				.split_once('=')
				.map(|(k, v)| (k.trim(), v.trim()))
				.unwrap_or((token, ""));
			params
				.entry(key.to_ascii_lowercase())
				.or_default()
				.push(value.to_string());
		}

		let weight = match params.get("q").and_then(|values| values.first()) {
			Some(raw) => parse_weight(raw)?,
			None => 1.0,
		};

		Ok(Self {
			supertype: supertype.to_string(),
			subtype: subtype.to_string(),
			weight,
			params,
		})
	}

	/// The `*/*` proposal implied by an absent `Accept` header
	pub fn any() -> Self {
		Self {
			supertype: "*".to_string(),
			subtype: "*".to_string(),
			weight: 1.0,
			params: HashMap::new(),
		}
	}

	pub fn supertype(&self) -> &str {
		&self.supertype
	}

	pub fn subtype(&self) -> &str {
		&self.subtype
	}

	/// `supertype/subtype`, parameters stripped
	pub fn media_type(&self) -> String {
		format!("{}/{}", self.supertype, self.subtype)
	}

	/// The `q` value clamped to `[0, 1]`
	pub fn weight(&self) -> f32 {
		self.weight
	}

	/// All parameters, `q` included, keyed by lowercase name
	pub fn params(&self) -> &HashMap<String, Vec<String>> {
		&self.params
	}

	/// First value of a parameter
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params
			.get(&key.to_ascii_lowercase())
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// Whether `offer` satisfies this proposal.
	pub fn matches(&self, offer: &str) -> bool {
		media_type::halves_match(offer, &self.supertype, &self.subtype)
	}

	fn specificity(&self) -> u8 {
		if self.supertype == "*" {
			0
		} else if self.subtype == "*" {
			1
		} else {
			2
		}
	}

	/// Negotiation precedence: `Less` means `self` is tried first.
	///
	/// Heavier proposals come first; among equal weights concrete types
	/// precede `type/*`, which precedes `*/*`.
	pub fn precedence(&self, other: &Self) -> Ordering {
		other
			.weight
			.total_cmp(&self.weight)
			.then_with(|| other.specificity().cmp(&self.specificity()))
	}
}

fn parse_weight(raw: &str) -> Result<f32> {
	if raw.len() > MAX_WEIGHT_LEN {
		return Err(ProposalError::BadWeight(raw.to_string()));
	}
	let weight: f32 = raw
		.parse()
		.map_err(|_| ProposalError::BadWeight(raw.to_string()))?;
	if weight.is_nan() {
		return Err(ProposalError::BadWeight(raw.to_string()));
	}
	Ok(weight.clamp(0.0, 1.0))
}

impl FromStr for Proposal {
	type Err = ProposalError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for Proposal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.supertype, self.subtype)
	}
}
