//! Generic graph node wrapper and read-side value coercion.
//!
//! [`Base`] wraps a store handle plus one subject and turns raw triples into
//! typed values on every read, consulting the reasoner for the property's
//! characteristics. Nothing is cached: a mutation followed by a read always
//! observes the new triples.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::langval::LanguageValue;
use crate::object::{wrap_object, Typed};
use crate::reasoner::Reasoner;
use crate::store::{is_local, StoreRef, Term};
use crate::vocab::{self, rdf};
use crate::Env;

/// A read-only lens over `(store, subject)`. Cheap to clone; carries its
/// store explicitly rather than relying on any ambient state.
#[derive(Clone)]
pub struct Base {
	pub(crate) env: Env,
	pub(crate) store: StoreRef,
	pub(crate) subject: String,
}

/// One coerced triple object.
#[derive(Debug, Clone)]
pub enum Value {
	String(String),
	Number(f64),
	Boolean(bool),
	Date(DateTime<Utc>),
	/// Identifier value of a non-literal on a datatype property.
	Id(String),
	/// Nested projection of a non-literal on an object property.
	Node(Typed),
}

impl Value {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) | Value::Id(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_date(&self) -> Option<DateTime<Utc>> {
		match self {
			Value::Date(d) => Some(*d),
			_ => None,
		}
	}

	pub fn node(&self) -> Option<&Typed> {
		match self {
			Value::Node(n) => Some(n),
			_ => None,
		}
	}

	/// Identifier of the value: the id itself, or the nested node's subject.
	pub fn id(&self) -> Option<&str> {
		match self {
			Value::Id(s) => Some(s),
			Value::Node(n) => Some(n.subject()),
			_ => None,
		}
	}
}

/// What `get` found for a property: nothing, a language map, a single value
/// (functional property) or an array in store order.
#[derive(Debug, Clone)]
pub enum Slot {
	Empty,
	Lang(LanguageValue),
	One(Value),
	Many(Vec<Value>),
}

impl Slot {
	/// The single value, or the first of many.
	pub fn one(&self) -> Option<&Value> {
		match self {
			Slot::One(v) => Some(v),
			Slot::Many(vs) => vs.first(),
			_ => None,
		}
	}

	pub fn values(self) -> Vec<Value> {
		match self {
			Slot::One(v) => vec![v],
			Slot::Many(vs) => vs,
			_ => Vec::new(),
		}
	}

	pub fn lang(self) -> LanguageValue {
		match self {
			Slot::Lang(v) => v,
			_ => LanguageValue::default(),
		}
	}

	pub fn as_str(&self) -> Option<String> {
		self.one()?.as_str().map(str::to_string)
	}

	pub fn as_f64(&self) -> Option<f64> {
		self.one()?.as_f64()
	}

	pub fn as_u64(&self) -> Option<u64> {
		let n = self.one()?.as_f64()?;
		(n >= 0.0).then_some(n as u64)
	}

	pub fn as_bool(&self) -> Option<bool> {
		self.one()?.as_bool()
	}

	pub fn as_date(&self) -> Option<DateTime<Utc>> {
		self.one()?.as_date()
	}

	pub fn node(&self) -> Option<Typed> {
		self.one()?.node().cloned()
	}

	pub fn nodes(self) -> Vec<Typed> {
		self.values()
			.into_iter()
			.filter_map(|v| match v {
				Value::Node(n) => Some(n),
				_ => None,
			})
			.collect()
	}

	/// Identifiers of every value that has one.
	pub fn ids(self) -> Vec<String> {
		self.values()
			.into_iter()
			.filter_map(|v| v.id().map(str::to_string))
			.collect()
	}

	pub fn len(&self) -> usize {
		match self {
			Slot::Empty => 0,
			Slot::Lang(v) => v.len(),
			Slot::One(_) => 1,
			Slot::Many(vs) => vs.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Base {
	pub(crate) fn new(env: Env, store: StoreRef, subject: impl Into<String>) -> Self {
		Base { env, store, subject: subject.into() }
	}

	pub fn subject(&self) -> &str {
		&self.subject
	}

	/// The node's identifier, when the subject is externally dereferenceable.
	pub fn id(&self) -> Option<&str> {
		(!is_local(&self.subject)).then_some(self.subject.as_str())
	}

	pub fn env(&self) -> &Env {
		&self.env
	}

	pub(crate) fn store(&self) -> &StoreRef {
		&self.store
	}

	/// Declared `rdf:type` IRIs in store order, recomputed on every call.
	pub fn types(&self) -> Vec<String> {
		self.store
			.borrow()
			.find(Some(&self.subject), Some(rdf::TYPE), None)
			.filter_map(|t| t.object.id().map(str::to_string))
			.collect()
	}

	/// Read a property, coercing values according to the ontology. Accepts
	/// Activity Streams short names or full IRIs.
	pub fn get(&self, key: &str) -> Slot {
		let key = vocab::resolve(key);
		let terms: Vec<Term> = self
			.store
			.borrow()
			.find(Some(&self.subject), Some(&key), None)
			.map(|t| t.object.clone())
			.collect();
		let reasoner = self.env.reasoner();
		if reasoner.is_language_property(&key) {
			let mut out = LanguageValue::new(self.env.language().map(str::to_string));
			for term in &terms {
				if let Term::Literal { value, lang, .. } = term {
					out.insert(lang.as_deref(), value);
				}
			}
			return Slot::Lang(out);
		}
		let is_object = reasoner.is_object_property(&key);
		let values: Vec<Value> = terms
			.iter()
			.map(|term| self.coerce(&reasoner, term, is_object))
			.collect();
		if reasoner.is_functional(&key) {
			if values.len() > 1 {
				tracing::warn!(subject = %self.subject, property = %key,
					"functional property holds multiple values");
			}
			match values.into_iter().next() {
				Some(v) => Slot::One(v),
				None => Slot::Empty,
			}
		} else {
			Slot::Many(values)
		}
	}

	fn coerce(&self, reasoner: &Reasoner, term: &Term, is_object: bool) -> Value {
		match term {
			Term::Literal { value, datatype: Some(dt), .. } => {
				if reasoner.is_number(dt) {
					match value.parse::<f64>() {
						Ok(n) => Value::Number(n),
						Err(_) => {
							tracing::warn!(literal = %value, datatype = %dt, "unparseable number literal");
							Value::String(value.clone())
						}
					}
				} else if reasoner.is_date(dt) {
					match parse_date(value) {
						Some(d) => Value::Date(d),
						None => {
							tracing::warn!(literal = %value, datatype = %dt, "unparseable date literal");
							Value::String(value.clone())
						}
					}
				} else if reasoner.is_boolean(dt) {
					Value::Boolean(value == "true" || value == "1")
				} else {
					Value::String(value.clone())
				}
			}
			Term::Literal { value, .. } => Value::String(value.clone()),
			Term::Iri(id) | Term::Blank(id) => {
				if is_object {
					Value::Node(wrap_object(&self.env, &self.store, id))
				} else {
					Value::Id(id.clone())
				}
			}
		}
	}

	/// Export the node's reachable subgraph as a compact JSON tree.
	pub fn export(&self) -> Result<serde_json::Value> {
		crate::jsonld::export(self)
	}

	/// Compact serialization of [`Base::export`].
	pub fn write(&self) -> Result<String> {
		Ok(self.export()?.to_string())
	}

	/// Indented serialization of [`Base::export`].
	pub fn pretty_write(&self) -> Result<String> {
		let doc = self.export()?;
		serde_json::to_string_pretty(&doc)
			.map_err(|e| crate::error::Error::Import(e.to_string()))
	}
}

impl std::fmt::Debug for Base {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Base").field("subject", &self.subject).finish()
	}
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
	if let Ok(d) = DateTime::parse_from_rfc3339(value) {
		return Some(d.with_timezone(&Utc));
	}
	// bare xsd:date
	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.ok()?
		.and_hms_opt(0, 0, 0)
		.map(|dt| dt.and_utc())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::store::Triple;
	use crate::vocab::{as2, xsd};

	fn base_with(triples: Vec<Triple>) -> Base {
		let env = Env::new();
		let store = crate::store::Store::new_ref();
		store.borrow_mut().add_all(triples);
		Base::new(env, store, "urn:x:thing")
	}

	#[test]
	fn typed_literals_coerce_by_marker_class() {
		let base = base_with(vec![
			Triple::new("urn:x:thing", as2::RATING, Term::literal_typed("4.5", xsd::FLOAT)),
			Triple::new("urn:x:thing", as2::PUBLISHED,
				Term::literal_typed("2015-12-18T12:00:00Z", xsd::DATE_TIME)),
			Triple::new("urn:x:thing", as2::OPTIONAL, Term::literal_typed("true", xsd::BOOLEAN)),
		]);
		assert_eq!(base.get("rating").as_f64(), Some(4.5));
		assert!(base.get("published").as_date().is_some());
		assert_eq!(base.get("optional").as_bool(), Some(true));
	}

	#[test]
	fn untyped_literals_stay_strings() {
		let base = base_with(vec![
			Triple::new("urn:x:thing", as2::MEDIA_TYPE, Term::literal("text/html")),
		]);
		assert_eq!(base.get("mediaType").as_str().as_deref(), Some("text/html"));
	}

	#[test]
	fn language_properties_fold_into_a_language_value() {
		let base = base_with(vec![
			Triple::new("urn:x:thing", as2::CONTENT_PROP, Term::literal_lang("hallo", "de")),
			Triple::new("urn:x:thing", as2::CONTENT_PROP, Term::literal("plain")),
		]);
		let content = base.get("content").lang();
		assert_eq!(content.get("de"), Some("hallo"));
		assert_eq!(content.default_value(), Some("plain"));
	}

	#[test]
	fn object_properties_project_nested_nodes_and_datatype_properties_do_not() {
		let base = base_with(vec![
			Triple::new("urn:x:thing", as2::ACTOR_PROP, Term::node("acct:joe@example.org")),
			Triple::new("urn:x:thing", as2::REL, Term::node("urn:x:rel")),
		]);
		let actors = base.get("actor").values();
		assert_eq!(actors.len(), 1);
		assert!(matches!(actors[0], Value::Node(_)));
		assert_eq!(actors[0].id(), Some("acct:joe@example.org"));
		let rels = base.get("rel").values();
		assert!(matches!(rels[0], Value::Id(_)));
	}

	#[test]
	fn functional_properties_read_back_as_a_single_value() {
		let base = base_with(vec![
			Triple::new("urn:x:thing", as2::MEDIA_TYPE, Term::literal("text/html")),
		]);
		assert!(matches!(base.get("mediaType"), Slot::One(_)));
		assert!(matches!(base.get("height"), Slot::Empty));
		assert!(matches!(base.get("tag"), Slot::Many(_)));
	}

	#[test]
	fn local_subjects_have_no_public_id() {
		let env = Env::new();
		let store = crate::store::Store::new_ref();
		let anon = Base::new(env.clone(), store.clone(), "urn:id:123");
		assert_eq!(anon.id(), None);
		let named = Base::new(env, store, "https://example.org/note/1");
		assert_eq!(named.id(), Some("https://example.org/note/1"));
	}
}
