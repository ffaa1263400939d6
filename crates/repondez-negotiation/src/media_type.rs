//! Media types every registry knows about, and the proposal/offer match rule.

/// `text/plain`
pub const TEXT_PLAIN: &str = "text/plain";
/// `text/html`
pub const TEXT_HTML: &str = "text/html";
/// `text/csv`
pub const TEXT_CSV: &str = "text/csv";
/// `application/octet-stream`
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `application/xml`
pub const APPLICATION_XML: &str = "application/xml";
/// Go's gob encoding, the binary fallback representation
pub const APPLICATION_GOB: &str = "application/vnd.golang.gob";

/// Splits `super/sub` into its trimmed halves.
///
/// Anything past a second `/` is ignored. A missing half is returned as an
/// empty string.
///
/// # Examples
///
/// ```
/// use repondez_negotiation::media_type::split;
///
/// assert_eq!(split("text/html"), ("text", "html"));
/// assert_eq!(split(" text / html "), ("text", "html"));
/// assert_eq!(split("text"), ("text", ""));
/// ```
pub fn split(media_type: &str) -> (&str, &str) {
	let mut halves = media_type.split('/');
	let supertype = halves.next().unwrap_or_default().trim();
	let subtype = halves.next().unwrap_or_default().trim();
	(supertype, subtype)
}

/// Returns the media type of a `Content-Type` value, without parameters.
///
/// # Examples
///
/// ```
/// use repondez_negotiation::media_type::essence;
///
/// assert_eq!(essence("text/plain; charset=utf-8"), "text/plain");
/// assert_eq!(essence(" application/json "), "application/json");
/// ```
pub fn essence(content_type: &str) -> &str {
	content_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
}

/// Checks whether an offered media type satisfies a proposed one.
///
/// A `*` proposal supertype matches anything. Otherwise the supertypes must
/// agree and the proposal subtype must be `*` or equal to the offer's.
/// Comparison ignores ASCII case.
///
/// # Examples
///
/// ```
/// use repondez_negotiation::media_types_match;
///
/// assert!(media_types_match("application/json", "*/*"));
/// assert!(media_types_match("application/json", "application/*"));
/// assert!(media_types_match("application/json", "application/json"));
/// assert!(!media_types_match("application/json", "text/*"));
/// assert!(!media_types_match("application/json", "application/xml"));
/// ```
pub fn media_types_match(offer: &str, proposal: &str) -> bool {
	let (proposed_super, proposed_sub) = split(proposal);
	halves_match(offer, proposed_super, proposed_sub)
}

pub(crate) fn halves_match(offer: &str, proposed_super: &str, proposed_sub: &str) -> bool {
	if proposed_super == "*" {
		return true;
	}
	let (offered_super, offered_sub) = split(offer);
	proposed_super.eq_ignore_ascii_case(offered_super)
		&& (proposed_sub == "*" || proposed_sub.eq_ignore_ascii_case(offered_sub))
}
