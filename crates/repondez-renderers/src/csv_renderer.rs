use std::io;

use repondez_core::{Body, Data, RenderError, Result};
use repondez_negotiation::media_type::TEXT_CSV;

use crate::renderer::Renderer;

/// CSV renderer for payloads implementing [`MarshalCsv`](repondez_core::MarshalCsv)
#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
	/// CSV delimiter (default: ',')
	pub delimiter: u8,
}

impl Default for CsvRenderer {
	fn default() -> Self {
		Self { delimiter: b',' }
	}
}

impl CsvRenderer {
	/// Creates a new CSV renderer
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the delimiter character
	///
	/// # Examples
	///
	/// ```
	/// use repondez_renderers::CsvRenderer;
	///
	/// let renderer = CsvRenderer::new().delimiter(b';');
	/// assert_eq!(renderer.delimiter, b';');
	/// ```
	pub fn delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}
}

impl Renderer for CsvRenderer {
	fn media_type(&self) -> &'static str {
		TEXT_CSV
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		let Data::Csv(rows) = &body.data else {
			return Err(RenderError::NotCsv);
		};

		let mut writer = csv::WriterBuilder::new()
			.delimiter(self.delimiter)
			.from_writer(sink);
		rows.marshal_csv(&mut writer).map_err(csv_error)?;
		writer.flush()?;
		Ok(())
	}
}

fn csv_error(error: csv::Error) -> RenderError {
	if error.is_io_error() {
		RenderError::Sink(error.into())
	} else {
		RenderError::encode(TEXT_CSV, error)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use repondez_core::{CsvWriter, MarshalCsv};
	use serde::Serialize;

	#[derive(Serialize)]
	struct Resource {
		status: String,
		number: i32,
	}

	impl MarshalCsv for Resource {
		fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()> {
			writer.write_record(["status", "number"])?;
			writer.write_record([self.status.clone(), self.number.to_string()])
		}
	}

	#[derive(Serialize)]
	struct Ragged;

	impl MarshalCsv for Ragged {
		fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()> {
			writer.write_record(["a", "b"])?;
			writer.write_record(["only one"])
		}
	}

	fn resource() -> Body {
		Body::new(
			Data::csv(Resource {
				status: "OK".to_string(),
				number: 3,
			})
			.unwrap(),
		)
	}

	#[test]
	fn test_marshal_rows() {
		let mut out = Vec::new();
		CsvRenderer::new().render(&resource(), &mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "status,number\nOK,3\n");
	}

	#[test]
	fn test_custom_delimiter() {
		let mut out = Vec::new();
		CsvRenderer::new().delimiter(b';').render(&resource(), &mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "status;number\nOK;3\n");
	}

	#[test]
	fn test_marshal_errors_propagate() {
		let mut out = Vec::new();
		let err = CsvRenderer::new()
			.render(&Body::new(Data::csv(Ragged).unwrap()), &mut out)
			.unwrap_err();
		assert!(matches!(err, RenderError::Encode { .. }));
	}

	#[test]
	fn test_payload_without_rows() {
		let mut out = Vec::new();
		let err = CsvRenderer::new().render(&Body::new("a,b"), &mut out).unwrap_err();
		assert!(matches!(err, RenderError::NotCsv));
	}
}
