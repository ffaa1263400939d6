//! Errors raised while parsing a single `Accept` proposal.

use thiserror::Error;

/// Reasons a proposal is rejected.
///
/// The header parser never fails as a whole: it drops the offending
/// proposal and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProposalError {
	/// The element carried no media type at all
	#[error("empty media type")]
	Empty,
	/// Nothing before the `/`
	#[error("empty media supertype")]
	EmptySupertype,
	/// Nothing after the `/`
	#[error("empty media subtype")]
	EmptySubtype,
	/// `*/x` where `x` is not `*`
	#[error("wildcard supertype `*` requires a wildcard subtype, got `*/{0}`")]
	WildSupertype(String),
	/// The `q` parameter is too long or not a number
	#[error("bad weight `{0}`")]
	BadWeight(String),
}

/// Result type for proposal parsing
pub type Result<T> = std::result::Result<T, ProposalError>;
