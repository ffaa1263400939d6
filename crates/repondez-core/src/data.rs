//! Payload variants a handler can return.
//!
//! The variant decides which representations are offered: text offers
//! `text/plain`, HTML-marked text offers `text/html`, bytes offer
//! `application/octet-stream`, CSV rows add `text/csv`, and every variant can
//! be handed to the structured encoders (JSON, XML, gob).

use std::fmt;
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// A string to be sent as raw, unescaped HTML.
///
/// Without the marker a string negotiates to `text/plain`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html(String);

impl Html {
	pub fn new(markup: impl Into<String>) -> Self {
		Self(markup.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<String> for Html {
	fn from(markup: String) -> Self {
		Self(markup)
	}
}

impl From<&str> for Html {
	fn from(markup: &str) -> Self {
		Self(markup.to_string())
	}
}

/// CSV writer handed to [`MarshalCsv`] implementations
pub type CsvWriter<'w> = csv::Writer<&'w mut dyn io::Write>;

/// Payloads that can be written as CSV rows.
///
/// # Examples
///
/// ```
/// use repondez_core::{CsvWriter, MarshalCsv};
///
/// struct Tally {
///     status: String,
///     number: u32,
/// }
///
/// impl MarshalCsv for Tally {
///     fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()> {
///         writer.write_record(["status", "number"])?;
///         writer.write_record([self.status.clone(), self.number.to_string()])
///     }
/// }
/// ```
pub trait MarshalCsv: Send + Sync {
	fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()>;
}

/// CSV rows together with their structured form.
///
/// CSV-capable payloads stay renderable as JSON, XML and gob, so both
/// views are captured when the payload is built.
#[derive(Clone)]
pub struct CsvData {
	rows: Arc<dyn MarshalCsv>,
	value: Value,
}

impl CsvData {
	pub fn new<T>(rows: T) -> serde_json::Result<Self>
	where
		T: MarshalCsv + Serialize + 'static,
	{
		let value = serde_json::to_value(&rows)?;
		Ok(Self {
			rows: Arc::new(rows),
			value,
		})
	}

	pub fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()> {
		self.rows.marshal_csv(writer)
	}

	pub fn value(&self) -> &Value {
		&self.value
	}
}

impl fmt::Debug for CsvData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CsvData")
			.field("value", &self.value)
			.finish_non_exhaustive()
	}
}

/// The payload of a [`Body`](crate::Body).
#[derive(Debug, Clone, Default)]
pub enum Data {
	/// No payload; serialized as `null` unless the body is blank
	#[default]
	Null,
	Text(String),
	Html(Html),
	Bytes(Bytes),
	Csv(CsvData),
	/// Any other serializable value
	Value(Value),
}

impl Data {
	/// Captures a serializable value.
	///
	/// Strings and `null` land in their dedicated variants so that they
	/// negotiate the same way as [`Data::Text`] and [`Data::Null`].
	///
	/// # Examples
	///
	/// ```
	/// use repondez_core::Data;
	///
	/// let data = Data::structured(&vec!["hello", "world"]).unwrap();
	/// assert!(matches!(data, Data::Value(_)));
	///
	/// let data = Data::structured("plain").unwrap();
	/// assert_eq!(data.as_text(), Some("plain"));
	/// ```
	pub fn structured<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
		serde_json::to_value(value).map(Self::from)
	}

	/// Captures a CSV-capable value
	pub fn csv<T>(rows: T) -> serde_json::Result<Self>
	where
		T: MarshalCsv + Serialize + 'static,
	{
		CsvData::new(rows).map(Self::Csv)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// The structured value behind [`Data::Value`] and [`Data::Csv`]
	pub fn as_value(&self) -> Option<&Value> {
		match self {
			Self::Value(value) => Some(value),
			Self::Csv(csv) => Some(csv.value()),
			_ => None,
		}
	}
}

impl From<()> for Data {
	fn from(_: ()) -> Self {
		Self::Null
	}
}

impl From<Value> for Data {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::String(text) => Self::Text(text),
			other => Self::Value(other),
		}
	}
}

impl From<String> for Data {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for Data {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<Html> for Data {
	fn from(markup: Html) -> Self {
		Self::Html(markup)
	}
}

impl From<Bytes> for Data {
	fn from(bytes: Bytes) -> Self {
		Self::Bytes(bytes)
	}
}

impl From<Vec<u8>> for Data {
	fn from(bytes: Vec<u8>) -> Self {
		Self::Bytes(Bytes::from(bytes))
	}
}

impl From<CsvData> for Data {
	fn from(csv: CsvData) -> Self {
		Self::Csv(csv)
	}
}
