//! Go's gob encoding of payloads, so Go clients can decode responses with
//! `encoding/gob`.
//!
//! Rust payloads carry no Go type, so one is inferred from the value:
//!
//! | Value | Go type |
//! |---|---|
//! | string, HTML marker | `string` |
//! | bytes | `[]uint8` |
//! | bool | `bool` |
//! | integer | `int` (`uint` above `i64::MAX`) |
//! | float | `float64` |
//! | array | `[]T`, element types unified (mixed numbers widen to `float64`) |
//! | object with one value type | `map[string]T` |
//! | object with mixed value types | anonymous struct with exported field names |
//!
//! Empty arrays and objects default their element type to `string`.

use std::collections::HashMap;
use std::io;

use repondez_core::{Body, Data, RenderError, Result};
use repondez_negotiation::media_type::APPLICATION_GOB;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::renderer::Renderer;

/// First id handed out to user-defined types
const FIRST_USER_TYPE_ID: i64 = 64;

/// Gob encoding failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GobError {
	/// Top-level `null` has no Go type to send
	#[error("gob: cannot encode nil value")]
	NilValue,
	/// An array mixes element types that cannot share one Go type
	#[error("gob: cannot mix {0} and {1} in one slice")]
	MixedElements(String, String),
	/// Writing to the sink failed
	#[error(transparent)]
	Io(#[from] io::Error),
}

type GobResult<T> = std::result::Result<T, GobError>;

/// Renders payloads as a gob stream: type definitions followed by one value.
///
/// # Examples
///
/// ```
/// use repondez_core::Body;
/// use repondez_renderers::{GobRenderer, Renderer};
///
/// let mut out = Vec::new();
/// GobRenderer.render(&Body::new(serde_json::json!(2)), &mut out).unwrap();
/// assert_eq!(out, [0x03, 0x04, 0x00, 0x04]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GobRenderer;

impl GobRenderer {
	pub fn encode(&self, data: &Data, sink: &mut dyn io::Write) -> GobResult<()> {
		let (root, value) = match data {
			Data::Null => return Err(GobError::NilValue),
			Data::Text(text) => (GoType::String, Payload::Str(text)),
			Data::Html(markup) => (GoType::String, Payload::Str(markup.as_str())),
			Data::Bytes(bytes) => (GoType::Bytes, Payload::Bytes(bytes)),
			Data::Csv(csv) => (infer_root(csv.value())?, Payload::Value(csv.value())),
			Data::Value(value) => (infer_root(value)?, Payload::Value(value)),
		};

		let mut table = TypeTable::default();
		let root_id = table.id_of(&root, String::new());

		let mut stream = Vec::new();
		table.send_definitions(&root, &mut stream);

		let mut message = Vec::new();
		put_int(&mut message, root_id);
		match (&root, value) {
			(GoType::Struct(fields), Payload::Value(Value::Object(object))) => {
				encode_struct(&mut message, fields, object);
			}
			(_, payload) => {
				// Non-struct values travel as a singleton field
				put_uint(&mut message, 0);
				match payload {
					Payload::Str(text) => put_bytes(&mut message, text.as_bytes()),
					Payload::Bytes(bytes) => put_bytes(&mut message, bytes),
					Payload::Value(value) => encode_value(&mut message, &root, value),
				}
			}
		}
		put_message(&mut stream, &message);

		sink.write_all(&stream)?;
		Ok(())
	}
}

impl Renderer for GobRenderer {
	fn media_type(&self) -> &'static str {
		APPLICATION_GOB
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		self.encode(&body.data, sink).map_err(|error| match error {
			GobError::Io(io) => RenderError::Sink(io),
			other => RenderError::encode(APPLICATION_GOB, other),
		})
	}
}

enum Payload<'a> {
	Str(&'a str),
	Bytes(&'a [u8]),
	Value(&'a Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GoType {
	/// Only `null` seen so far
	Unknown,
	Bool,
	Int,
	Uint,
	Float,
	Bytes,
	String,
	Slice(Box<GoType>),
	Map(Box<GoType>),
	Struct(Vec<(String, GoType)>),
}

impl GoType {
	/// Go's `reflect.Type.String()`
	fn go_name(&self) -> String {
		match self {
			Self::Bool => "bool".to_string(),
			Self::Int => "int".to_string(),
			Self::Uint => "uint".to_string(),
			Self::Float => "float64".to_string(),
			Self::Bytes => "[]uint8".to_string(),
			Self::String | Self::Unknown => "string".to_string(),
			Self::Slice(elem) => format!("[]{}", elem.go_name()),
			Self::Map(elem) => format!("map[string]{}", elem.go_name()),
			Self::Struct(fields) if fields.is_empty() => "struct {}".to_string(),
			Self::Struct(fields) => {
				let fields: Vec<String> = fields
					.iter()
					.map(|(name, ty)| format!("{name} {}", ty.go_name()))
					.collect();
				format!("struct {{ {} }}", fields.join("; "))
			}
		}
	}

	/// Replaces types only `null` was seen for with `string`
	fn settle(self) -> Self {
		match self {
			Self::Unknown => Self::String,
			Self::Slice(elem) => Self::Slice(Box::new(elem.settle())),
			Self::Map(elem) => Self::Map(Box::new(elem.settle())),
			Self::Struct(fields) => Self::Struct(
				fields
					.into_iter()
					.map(|(name, ty)| (name, ty.settle()))
					.collect(),
			),
			other => other,
		}
	}
}

fn infer_root(value: &Value) -> GobResult<GoType> {
	if value.is_null() {
		return Err(GobError::NilValue);
	}
	Ok(infer(value)?.settle())
}

fn infer(value: &Value) -> GobResult<GoType> {
	Ok(match value {
		Value::Null => GoType::Unknown,
		Value::Bool(_) => GoType::Bool,
		Value::Number(number) if number.is_i64() => GoType::Int,
		Value::Number(number) if number.is_u64() => GoType::Uint,
		Value::Number(_) => GoType::Float,
		Value::String(_) => GoType::String,
		Value::Array(items) => {
			let mut elem = GoType::Unknown;
			for item in items {
				let ty = infer(item)?;
				elem = unify(elem.clone(), ty.clone())
					.ok_or_else(|| GobError::MixedElements(elem.go_name(), ty.go_name()))?;
			}
			GoType::Slice(Box::new(elem))
		}
		Value::Object(object) => {
			let fields = object
				.iter()
				.map(|(key, field)| Ok((exported(key), infer(field)?)))
				.collect::<GobResult<Vec<_>>>()?;
			let shared = fields
				.iter()
				.try_fold(GoType::Unknown, |acc, (_, ty)| unify(acc, ty.clone()));
			match shared {
				Some(elem) => GoType::Map(Box::new(elem)),
				None => GoType::Struct(fields),
			}
		}
	})
}

fn unify(a: GoType, b: GoType) -> Option<GoType> {
	use GoType::*;

	match (a, b) {
		(Unknown, ty) | (ty, Unknown) => Some(ty),
		(a, b) if a == b => Some(a),
		(Int | Uint | Float, Int | Uint | Float) => Some(Float),
		(Slice(a), Slice(b)) => Some(Slice(Box::new(unify(*a, *b)?))),
		(Map(a), Map(b)) => Some(Map(Box::new(unify(*a, *b)?))),
		(Struct(a), Struct(b)) if a.len() == b.len() => {
			let fields = a
				.into_iter()
				.zip(b)
				.map(|((name_a, ty_a), (name_b, ty_b))| {
					(name_a == name_b).then_some(())?;
					Some((name_a, unify(ty_a, ty_b)?))
				})
				.collect::<Option<Vec<_>>>()?;
			Some(Struct(fields))
		}
		_ => None,
	}
}

/// Go only sends exported (capitalized) struct fields
fn exported(key: &str) -> String {
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Wire description of a user-defined type
#[derive(Debug, Clone)]
enum WireType {
	Slice { name: String, elem: i64 },
	Map { name: String, key: i64, elem: i64 },
	Struct { name: String, fields: Vec<(String, i64)> },
}

/// Type ids in the order Go assigns them: slices and maps after their
/// element types, structs before their fields.
#[derive(Debug, Default)]
struct TypeTable {
	ids: HashMap<GoType, i64>,
	wire: HashMap<i64, WireType>,
	next: i64,
}

impl TypeTable {
	fn allocate(&mut self) -> i64 {
		let id = FIRST_USER_TYPE_ID + self.next;
		self.next += 1;
		id
	}

	fn id_of(&mut self, ty: &GoType, name: String) -> i64 {
		if let Some(id) = self.ids.get(ty) {
			return *id;
		}

		let (id, wire) = match ty {
			GoType::Bool => return 1,
			GoType::Int => return 2,
			GoType::Uint => return 3,
			GoType::Float => return 4,
			GoType::Bytes => return 5,
			GoType::String | GoType::Unknown => return 6,
			GoType::Slice(elem) => {
				let elem = self.id_of(elem, String::new());
				(self.allocate(), WireType::Slice { name, elem })
			}
			GoType::Map(elem) => {
				let key = self.id_of(&GoType::String, String::new());
				let elem = self.id_of(elem, String::new());
				(self.allocate(), WireType::Map { name, key, elem })
			}
			GoType::Struct(fields) => {
				let id = self.allocate();
				self.ids.insert(ty.clone(), id);
				let fields = fields
					.iter()
					.map(|(field, field_ty)| (field.clone(), self.id_of(field_ty, field_ty.go_name())))
					.collect();
				(id, WireType::Struct { name, fields })
			}
		};
		self.ids.insert(ty.clone(), id);
		self.wire.insert(id, wire);
		id
	}

	/// Emits one definition message per user type, outermost first
	fn send_definitions(&self, ty: &GoType, stream: &mut Vec<u8>) {
		let mut sent = Vec::new();
		self.send(ty, stream, &mut sent);
	}

	fn send(&self, ty: &GoType, stream: &mut Vec<u8>, sent: &mut Vec<i64>) {
		let Some(id) = self.ids.get(ty).copied() else {
			return;
		};
		if sent.contains(&id) {
			return;
		}
		let Some(wire) = self.wire.get(&id) else {
			return;
		};

		let mut message = Vec::new();
		put_int(&mut message, -id);
		encode_wire_type(&mut message, id, wire);
		put_message(stream, &message);
		sent.push(id);

		match ty {
			GoType::Slice(elem) | GoType::Map(elem) => self.send(elem, stream, sent),
			GoType::Struct(fields) => {
				for (_, field_ty) in fields {
					self.send(field_ty, stream, sent);
				}
			}
			_ => {}
		}
	}
}

/// `wireType{ArrayT, SliceT, StructT, MapT, ...}` with exactly one field set
fn encode_wire_type(buf: &mut Vec<u8>, id: i64, wire: &WireType) {
	match wire {
		WireType::Slice { name, elem } => {
			put_uint(buf, 2);
			put_uint(buf, 1);
			encode_common_type(buf, name, id);
			put_uint(buf, 1);
			put_int(buf, *elem);
			put_uint(buf, 0);
		}
		WireType::Struct { name, fields } => {
			put_uint(buf, 3);
			put_uint(buf, 1);
			encode_common_type(buf, name, id);
			if !fields.is_empty() {
				put_uint(buf, 1);
				put_uint(buf, fields.len() as u64);
				for (field, field_id) in fields {
					put_uint(buf, 1);
					put_bytes(buf, field.as_bytes());
					put_uint(buf, 1);
					put_int(buf, *field_id);
					put_uint(buf, 0);
				}
			}
			put_uint(buf, 0);
		}
		WireType::Map { name, key, elem } => {
			put_uint(buf, 4);
			put_uint(buf, 1);
			encode_common_type(buf, name, id);
			put_uint(buf, 1);
			put_int(buf, *key);
			put_uint(buf, 1);
			put_int(buf, *elem);
			put_uint(buf, 0);
		}
	}
	put_uint(buf, 0);
}

/// `CommonType{Name, Id}`
fn encode_common_type(buf: &mut Vec<u8>, name: &str, id: i64) {
	if name.is_empty() {
		put_uint(buf, 2);
	} else {
		put_uint(buf, 1);
		put_bytes(buf, name.as_bytes());
		put_uint(buf, 1);
	}
	put_int(buf, id);
	put_uint(buf, 0);
}

/// Struct fields as deltas; zero-valued fields other than structs are skipped
fn encode_struct(buf: &mut Vec<u8>, fields: &[(String, GoType)], object: &Map<String, Value>) {
	let mut previous: i64 = -1;
	for (index, ((_, ty), field)) in fields.iter().zip(object.values()).enumerate() {
		let index = index as i64;
		if !matches!(ty, GoType::Struct(_)) && is_zero(field) {
			continue;
		}
		put_uint(buf, (index - previous) as u64);
		previous = index;
		encode_value(buf, ty, field);
	}
	put_uint(buf, 0);
}

fn is_zero(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64() == Some(0.0),
		Value::String(text) => text.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(object) => object.is_empty(),
	}
}

/// A value of type `ty`; `null` encodes as the type's zero value
fn encode_value(buf: &mut Vec<u8>, ty: &GoType, value: &Value) {
	match ty {
		GoType::Bool => put_uint(buf, u64::from(value.as_bool().unwrap_or(false))),
		GoType::Int => put_int(buf, value.as_i64().unwrap_or(0)),
		GoType::Uint => put_uint(buf, value.as_u64().unwrap_or(0)),
		GoType::Float => put_float(buf, value.as_f64().unwrap_or(0.0)),
		GoType::Bytes | GoType::String | GoType::Unknown => {
			put_bytes(buf, value.as_str().unwrap_or_default().as_bytes());
		}
		GoType::Slice(elem) => {
			let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
			put_uint(buf, items.len() as u64);
			for item in items {
				encode_value(buf, elem, item);
			}
		}
		GoType::Map(elem) => match value.as_object() {
			Some(object) => {
				put_uint(buf, object.len() as u64);
				for (key, item) in object {
					put_bytes(buf, key.as_bytes());
					encode_value(buf, elem, item);
				}
			}
			None => put_uint(buf, 0),
		},
		GoType::Struct(fields) => match value.as_object() {
			Some(object) => encode_struct(buf, fields, object),
			None => put_uint(buf, 0),
		},
	}
}

fn put_message(stream: &mut Vec<u8>, message: &[u8]) {
	put_uint(stream, message.len() as u64);
	stream.extend_from_slice(message);
}

/// Small values in one byte, otherwise the negated byte count followed by
/// the big-endian bytes
fn put_uint(buf: &mut Vec<u8>, value: u64) {
	if value < 0x80 {
		buf.push(value as u8);
		return;
	}
	let bytes = value.to_be_bytes();
	let skip = bytes.iter().take_while(|byte| **byte == 0).count();
	buf.push(((bytes.len() - skip) as u8).wrapping_neg());
	buf.extend_from_slice(&bytes[skip..]);
}

fn put_int(buf: &mut Vec<u8>, value: i64) {
	let folded = if value < 0 {
		(!(value as u64) << 1) | 1
	} else {
		(value as u64) << 1
	};
	put_uint(buf, folded);
}

/// Floats are sent byte-reversed so small exponents compress
fn put_float(buf: &mut Vec<u8>, value: f64) {
	put_uint(buf, value.to_bits().swap_bytes());
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
	put_uint(buf, bytes.len() as u64);
	buf.extend_from_slice(bytes);
}
