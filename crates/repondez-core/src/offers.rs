//! Media types a body can be rendered as, in server preference order.

use repondez_negotiation::media_type::{
	APPLICATION_GOB, APPLICATION_JSON, APPLICATION_OCTET_STREAM, APPLICATION_XML, TEXT_CSV,
	TEXT_HTML, TEXT_PLAIN,
};

use crate::body::Body;
use crate::config::Config;
use crate::data::Data;
use crate::registry::MediaTypeRegistry;

impl Body {
	/// Lists the media types this body can be rendered as.
	///
	/// A predetermined media type is offered alone. Otherwise the payload
	/// variant opens the list, followed by the structural encodings (HTML
	/// and byte payloads skip these), extension media types and finally
	/// the template-driven types when a template name is set.
	///
	/// # Examples
	///
	/// ```
	/// use repondez_core::{Body, Config, MediaTypeRegistry};
	///
	/// let offers = Body::new("Hello").media_types(&Config::default(), &MediaTypeRegistry::default());
	/// assert_eq!(
	///     offers,
	///     ["text/plain", "application/json", "application/xml", "application/vnd.golang.gob"]
	/// );
	/// ```
	pub fn media_types(&self, config: &Config, registry: &MediaTypeRegistry) -> Vec<String> {
		if let Some(media_type) = self.predetermined_media_type() {
			tracing::debug!(media_type, "offering predetermined media type only");
			return vec![media_type.to_string()];
		}

		let mut offers: Vec<&str> = Vec::with_capacity(8);
		let structural = match &self.data {
			Data::Html(_) => {
				offers.push(TEXT_HTML);
				false
			}
			Data::Text(_) => {
				offers.push(TEXT_PLAIN);
				true
			}
			Data::Bytes(_) => {
				offers.push(APPLICATION_OCTET_STREAM);
				false
			}
			Data::Null | Data::Csv(_) | Data::Value(_) => true,
		};

		if structural {
			offers.extend([APPLICATION_JSON, APPLICATION_XML]);
			if matches!(self.data, Data::Csv(_)) {
				offers.push(TEXT_CSV);
			}
			offers.push(APPLICATION_GOB);
		}

		offers.extend(registry.extended_media_types().iter().map(String::as_str));

		if !self.template_name.is_empty() {
			if config.html_templates().is_some() {
				offers.push(TEXT_HTML);
			}
			if config.text_templates().is_some() {
				offers.push(TEXT_PLAIN);
			}
		}

		offers.into_iter().map(str::to_string).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{CsvWriter, Html, MarshalCsv};
	use crate::registry::ExtensionRenderer;
	use rstest::{fixture, rstest};
	use serde::Serialize;
	use serde_json::json;
	use tera::Tera;

	#[derive(Serialize)]
	struct Rows;

	impl MarshalCsv for Rows {
		fn marshal_csv(&self, _writer: &mut CsvWriter<'_>) -> csv::Result<()> {
			Ok(())
		}
	}

	struct Msgpack;

	impl ExtensionRenderer for Msgpack {
		fn media_type(&self) -> &str {
			"application/vnd.msgpack"
		}

		fn render(&self, _body: &Body, _sink: &mut dyn std::io::Write) -> crate::Result<()> {
			Ok(())
		}
	}

	#[fixture]
	fn templated() -> Config {
		Config::builder()
			.html_templates(Tera::default())
			.text_templates(Tera::default())
			.build()
	}

	fn offers(body: &Body, config: &Config) -> Vec<String> {
		body.media_types(config, &MediaTypeRegistry::default())
	}

	#[rstest]
	#[case(Body::new(()), &[APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB])]
	#[case(Body::new("text"), &[TEXT_PLAIN, APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB])]
	#[case(Body::new(Html::from("<p>")), &[TEXT_HTML])]
	#[case(Body::new(vec![1u8, 2]), &[APPLICATION_OCTET_STREAM])]
	#[case(
		Body::new(json!({"a": 1})),
		&[APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB]
	)]
	#[case(
		Body::new(Data::csv(Rows).unwrap()),
		&[APPLICATION_JSON, APPLICATION_XML, TEXT_CSV, APPLICATION_GOB]
	)]
	fn test_offers_follow_payload_shape(#[case] body: Body, #[case] expected: &[&str]) {
		assert_eq!(offers(&body, &Config::default()), expected);
	}

	#[rstest]
	fn test_templates_come_last_html_first(templated: Config) {
		let body = Body::new("Hello").with_template("tm");
		assert_eq!(
			offers(&body, &templated),
			[TEXT_PLAIN, APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB, TEXT_HTML, TEXT_PLAIN]
		);
	}

	#[rstest]
	fn test_template_sets_need_a_template_name(templated: Config) {
		let body = Body::new(json!([1, 2]));
		assert_eq!(
			offers(&body, &templated),
			[APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB]
		);
	}

	#[test]
	fn test_only_configured_template_sets_are_offered() {
		let config = Config::builder().text_templates(Tera::default()).build();
		let body = Body::new(()).with_template("tm");
		assert_eq!(
			offers(&body, &config),
			[APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB, TEXT_PLAIN]
		);
	}

	#[rstest]
	fn test_predetermined_media_type_is_offered_alone(templated: Config) {
		let mut body = Body::new("Hello").with_template("tm");
		body.predetermine(APPLICATION_JSON);
		assert_eq!(offers(&body, &templated), [APPLICATION_JSON]);
	}

	#[test]
	fn test_extension_media_types_follow_structural_ones() {
		let registry = MediaTypeRegistry::builder().register(Msgpack).build();
		let body = Body::new(json!(2));
		let offered = body.media_types(&Config::default(), &registry);
		assert_eq!(
			offered,
			[APPLICATION_JSON, APPLICATION_XML, APPLICATION_GOB, "application/vnd.msgpack"]
		);
		assert!(offered.iter().all(|media_type| registry.is_registered(media_type)));
	}
}
