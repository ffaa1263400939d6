//! Renderer configuration shared by every request.

use std::sync::Arc;

use tera::Tera;

/// Template sets and encoder indentation. Immutable once built.
///
/// # Examples
///
/// ```
/// use repondez_core::Config;
/// use tera::Tera;
///
/// let mut html = Tera::default();
/// html.add_raw_template("tm", "<div>{{ data }}</div>").unwrap();
///
/// let config = Config::builder()
///     .html_templates(html)
///     .json_indent("", "  ")
///     .build();
///
/// assert!(config.html_templates().is_some());
/// assert!(config.text_templates().is_none());
/// assert_eq!(config.json_indent(), "  ");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
	html_templates: Option<Arc<Tera>>,
	text_templates: Option<Arc<Tera>>,
	json_prefix: String,
	json_indent: String,
	xml_prefix: String,
	xml_indent: String,
}

impl Config {
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::default()
	}

	/// Templates rendered for `text/html`; output is always escaped
	pub fn html_templates(&self) -> Option<&Tera> {
		self.html_templates.as_deref()
	}

	/// Templates rendered for `text/plain`; output is never escaped
	pub fn text_templates(&self) -> Option<&Tera> {
		self.text_templates.as_deref()
	}

	pub fn json_prefix(&self) -> &str {
		&self.json_prefix
	}

	pub fn json_indent(&self) -> &str {
		&self.json_indent
	}

	pub fn xml_prefix(&self) -> &str {
		&self.xml_prefix
	}

	pub fn xml_indent(&self) -> &str {
		&self.xml_indent
	}
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
	config: Config,
}

impl ConfigBuilder {
	/// Sets the HTML template set, escaping every template it holds
	pub fn html_templates(mut self, mut templates: Tera) -> Self {
		templates.autoescape_on(vec![""]);
		templates.set_escape_fn(escape_html);
		self.config.html_templates = Some(Arc::new(templates));
		self
	}

	/// Sets the text template set, escaping nothing
	pub fn text_templates(mut self, mut templates: Tera) -> Self {
		templates.autoescape_on(vec![]);
		self.config.text_templates = Some(Arc::new(templates));
		self
	}

	/// Loads the HTML template set from a glob such as `templates/**/*.html`
	pub fn html_templates_from_glob(self, glob: &str) -> tera::Result<Self> {
		Ok(self.html_templates(Tera::new(glob)?))
	}

	/// Loads the text template set from a glob such as `templates/**/*.txt`
	pub fn text_templates_from_glob(self, glob: &str) -> tera::Result<Self> {
		Ok(self.text_templates(Tera::new(glob)?))
	}

	/// Line prefix and per-level indent for JSON output
	pub fn json_indent(mut self, prefix: impl Into<String>, indent: impl Into<String>) -> Self {
		self.config.json_prefix = prefix.into();
		self.config.json_indent = indent.into();
		self
	}

	/// Line prefix and per-level indent for XML output
	pub fn xml_indent(mut self, prefix: impl Into<String>, indent: impl Into<String>) -> Self {
		self.config.xml_prefix = prefix.into();
		self.config.xml_indent = indent.into();
		self
	}

	pub fn build(self) -> Config {
		self.config
	}
}

/// HTML text escaping with the entity set of Go's `html/template`; `/` is kept
fn escape_html(input: &str) -> String {
	let mut escaped = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'\0' => escaped.push('\u{FFFD}'),
			'"' => escaped.push_str("&#34;"),
			'&' => escaped.push_str("&amp;"),
			'\'' => escaped.push_str("&#39;"),
			'+' => escaped.push_str("&#43;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c),
		}
	}
	escaped
}
