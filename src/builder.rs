//! Write side: builders accumulate triples under one subject.
//!
//! A [`Builder`] owns a fresh store per construction; nesting one builder
//! (or a projected node from another store) into a property merges the whole
//! subgraph, renaming every local identifier so merged graphs never collide.
//! Mutators are move-style and chain; only operations that can actually fail
//! return `Result`.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::base::Base;
use crate::error::{Error, Result};
use crate::macros::setter;
use crate::object::{wrap_object, Typed};
use crate::store::{anonymous_subject, Store, StoreRef, Term, Triple};
use crate::vocab::{self, as2, rdf, xsd};
use crate::Env;

/// Anything a property can be set to.
#[derive(Debug)]
pub enum Input {
	Str(String),
	Num(f64),
	Bool(bool),
	Date(DateTime<Utc>),
	Node(Typed),
	Builder(Builder),
	Json(serde_json::Value),
	Many(Vec<Input>),
}

impl From<&str> for Input {
	fn from(v: &str) -> Self {
		Input::Str(v.to_string())
	}
}

impl From<String> for Input {
	fn from(v: String) -> Self {
		Input::Str(v)
	}
}

impl From<f64> for Input {
	fn from(v: f64) -> Self {
		Input::Num(v)
	}
}

impl From<i64> for Input {
	fn from(v: i64) -> Self {
		Input::Num(v as f64)
	}
}

impl From<u64> for Input {
	fn from(v: u64) -> Self {
		Input::Num(v as f64)
	}
}

impl From<bool> for Input {
	fn from(v: bool) -> Self {
		Input::Bool(v)
	}
}

impl From<DateTime<Utc>> for Input {
	fn from(v: DateTime<Utc>) -> Self {
		Input::Date(v)
	}
}

impl From<Typed> for Input {
	fn from(v: Typed) -> Self {
		Input::Node(v)
	}
}

impl From<Builder> for Input {
	fn from(v: Builder) -> Self {
		Input::Builder(v)
	}
}

impl From<serde_json::Value> for Input {
	fn from(v: serde_json::Value) -> Self {
		Input::Json(v)
	}
}

impl<T: Into<Input>> From<Vec<T>> for Input {
	fn from(v: Vec<T>) -> Self {
		Input::Many(v.into_iter().map(Into::into).collect())
	}
}

/// Literal annotations for a single `set` call.
#[derive(Debug, Clone, Default)]
pub struct SetOpts {
	pub lang: Option<String>,
	pub datatype: Option<String>,
}

impl SetOpts {
	pub fn lang(tag: &str) -> Self {
		SetOpts { lang: Some(tag.to_string()), datatype: None }
	}

	pub fn datatype(iri: &str) -> Self {
		SetOpts { lang: None, datatype: Some(iri.to_string()) }
	}
}

/// Combine a factory's base class with explicitly requested types: the base
/// class is kept only when none of the extras already subsumes it, and goes
/// last so an extra type decides the projection.
pub(crate) fn merge_types(env: &Env, base_class: &str, extras: &[&str]) -> Vec<String> {
	let resolved: Vec<String> = extras.iter().map(|t| vocab::resolve(t)).collect();
	let reasoner = env.reasoner();
	let mut types = resolved.clone();
	if !resolved.iter().any(|t| reasoner.is_subclass_of(t, base_class)) {
		types.push(base_class.to_string());
	}
	types
}

#[derive(Debug)]
pub struct Builder {
	pub(crate) base: Base,
}

impl Builder {
	/// Fresh anonymous node in a fresh store, typed with `classes`.
	pub(crate) fn with_types(env: Env, classes: &[&str]) -> Self {
		let store = Store::new_ref();
		let subject = anonymous_subject();
		{
			let mut s = store.borrow_mut();
			for class in classes {
				s.add(Triple::new(&subject, rdf::TYPE, Term::node(&vocab::resolve(class))));
			}
		}
		Builder { base: Base::new(env, store, subject) }
	}

	pub(crate) fn with_types_ext(env: Env, base_class: &str, extras: &[&str]) -> Self {
		let types = merge_types(&env, base_class, extras);
		let refs: Vec<&str> = types.iter().map(String::as_str).collect();
		Self::with_types(env, &refs)
	}

	pub(crate) fn subject(&self) -> &str {
		&self.base.subject
	}

	pub(crate) fn store(&self) -> &StoreRef {
		&self.base.store
	}

	/// Project the node built so far. The builder stays usable.
	pub fn get(&self) -> Typed {
		wrap_object(&self.base.env, &self.base.store, &self.base.subject)
	}

	/// Give the node a public identifier, rewriting every reference to its
	/// current subject.
	pub(crate) fn set_id(&mut self, id: &str) -> Result<()> {
		if !id.contains(':') {
			return Err(Error::InvalidValue(format!("not an absolute identifier: {id}")));
		}
		let old = self.base.subject.clone();
		self.base.store.borrow_mut().rename(&old, id);
		self.base.subject = id.to_string();
		Ok(())
	}

	pub(crate) fn add_type(&mut self, class: &str) {
		let triple = Triple::new(
			&self.base.subject,
			rdf::TYPE,
			Term::node(&vocab::resolve(class)),
		);
		self.base.store.borrow_mut().add(triple);
	}

	pub(crate) fn set_in_place(&mut self, key: &str, val: Input, opts: SetOpts) -> Result<()> {
		let subject = self.base.subject.clone();
		self.set_on(&subject, key, val, &opts)
	}

	/// Workhorse shared by the mutator traits and the ordered-collection
	/// builder, which targets cons cells rather than its own subject.
	pub(crate) fn set_on(&mut self, subject: &str, key: &str, val: Input, opts: &SetOpts) -> Result<()> {
		let key = vocab::resolve(key);
		let (is_object, functional, deprecated, is_lang) = {
			let r = self.base.env.reasoner();
			(
				r.is_object_property(&key),
				r.is_functional(&key),
				r.is_deprecated(&key),
				r.is_language_property(&key),
			)
		};
		if deprecated {
			tracing::warn!(property = %key, "setting a deprecated property");
		}
		match val {
			Input::Many(vals) => {
				if functional {
					return Err(Error::InvalidType("array value on a functional property"));
				}
				for v in vals {
					self.set_on(subject, &key, v, opts)?;
				}
				Ok(())
			}
			Input::Json(json) => self.set_json(subject, &key, json, opts),
			Input::Node(node) => {
				let id = self.adopt(&node.base);
				self.insert(subject, &key, Term::node(&id), functional);
				Ok(())
			}
			Input::Builder(nested) => {
				let id = self.adopt(&nested.base);
				self.insert(subject, &key, Term::node(&id), functional);
				Ok(())
			}
			Input::Str(s) => {
				let term = if is_object {
					Term::node(&s)
				} else if let Some(tag) = &opts.lang {
					Term::literal_lang(s, tag.clone())
				} else if let Some(dt) = opts
					.datatype
					.clone()
					.or_else(|| vocab::datatype_hint(&key).map(str::to_string))
				{
					Term::literal_typed(s, dt)
				} else {
					Term::literal(s)
				};
				if is_lang {
					// replace only the same language variant
					let tag = match &term {
						Term::Literal { lang, .. } => lang.clone(),
						_ => None,
					};
					self.replace_lang_variant(subject, &key, tag.as_deref());
					self.base.store.borrow_mut().add(Triple::new(subject, &key, term));
				} else {
					self.insert(subject, &key, term, functional);
				}
				Ok(())
			}
			Input::Num(n) => {
				if is_object {
					return Err(Error::InvalidType("literal value on an object property"));
				}
				if !n.is_finite() {
					tracing::warn!(property = %key, "ignoring non-finite number");
					return Ok(());
				}
				let dt = opts
					.datatype
					.clone()
					.or_else(|| vocab::datatype_hint(&key).map(str::to_string))
					.unwrap_or_else(|| xsd::DOUBLE.to_string());
				let repr = if dt == xsd::NON_NEGATIVE_INTEGER {
					format!("{}", n.floor().max(0.0) as u64)
				} else {
					format_float(n)
				};
				self.insert(subject, &key, Term::literal_typed(repr, dt), functional);
				Ok(())
			}
			Input::Bool(b) => {
				if is_object {
					return Err(Error::InvalidType("literal value on an object property"));
				}
				self.insert(subject, &key, Term::literal_typed(b.to_string(), xsd::BOOLEAN), functional);
				Ok(())
			}
			Input::Date(d) => {
				if is_object {
					return Err(Error::InvalidType("literal value on an object property"));
				}
				let repr = d.to_rfc3339_opts(SecondsFormat::Secs, true);
				self.insert(subject, &key, Term::literal_typed(repr, xsd::DATE_TIME), functional);
				Ok(())
			}
		}
	}

	fn set_json(&mut self, subject: &str, key: &str, json: serde_json::Value, opts: &SetOpts) -> Result<()> {
		use serde_json::Value as J;
		match json {
			J::Null => Ok(()),
			J::String(s) => self.set_on(subject, key, Input::Str(s), opts),
			J::Bool(b) => self.set_on(subject, key, Input::Bool(b), opts),
			J::Number(n) => {
				let n = n
					.as_f64()
					.ok_or(Error::InvalidType("number out of range"))?;
				self.set_on(subject, key, Input::Num(n), opts)
			}
			J::Array(items) => {
				self.set_on(subject, key, Input::Many(items.into_iter().map(Input::Json).collect()), opts)
			}
			J::Object(map) => {
				if let Some(inner) = map.get("@value") {
					let opts = SetOpts {
						lang: map.get("@language").and_then(|v| v.as_str()).map(str::to_string),
						datatype: map.get("@type").and_then(|v| v.as_str()).map(str::to_string),
					};
					return self.set_json(subject, key, inner.clone(), &opts);
				}
				let is_lang = self.base.env.reasoner().is_language_property(key);
				if is_lang && map.values().all(|v| v.is_string()) {
					for (tag, value) in &map {
						let value = value.as_str().unwrap_or_default();
						let tag = (tag != "@none").then_some(tag.as_str());
						self.put_lang_on(subject, key, value, tag);
					}
					return Ok(());
				}
				let id = crate::jsonld::import_node(&self.base.env, &self.base.store, &map)?;
				let functional = self.base.env.reasoner().is_functional(key);
				self.insert(subject, key, Term::node(&id), functional);
				Ok(())
			}
		}
	}

	fn insert(&mut self, subject: &str, key: &str, term: Term, functional: bool) {
		let mut store = self.base.store.borrow_mut();
		if functional {
			store.remove_matching(Some(subject), Some(key), None);
		}
		store.add(Triple::new(subject, key, term));
	}

	/// Copy a node's graph into this builder's store, renaming every local
	/// identifier, and return the (possibly renamed) subject to link to.
	/// Linking within the same store is a no-op beyond returning the subject.
	fn adopt(&mut self, other: &Base) -> String {
		if Rc::ptr_eq(&self.base.store, &other.store) {
			return other.subject.clone();
		}
		let src = other.store.borrow();
		let mut renames: HashMap<String, String> = HashMap::new();
		let rename = |id: &str, renames: &mut HashMap<String, String>| {
			if crate::store::is_local(id) && !renames.contains_key(id) {
				renames.insert(id.to_string(), anonymous_subject());
			}
		};
		for t in src.triples() {
			rename(&t.subject, &mut renames);
			if let Some(id) = t.object.id() {
				rename(id, &mut renames);
			}
		}
		let mut dst = self.base.store.borrow_mut();
		for t in src.triples() {
			let s = renames.get(&t.subject).cloned().unwrap_or_else(|| t.subject.clone());
			let o = match t.object.id().and_then(|id| renames.get(id)) {
				Some(new) => Term::node(new),
				None => t.object.clone(),
			};
			dst.add(Triple::new(s, &t.predicate, o));
		}
		renames
			.get(&other.subject)
			.cloned()
			.unwrap_or_else(|| other.subject.clone())
	}

	fn replace_lang_variant(&mut self, subject: &str, key: &str, tag: Option<&str>) {
		let stale: Vec<Term> = self
			.base
			.store
			.borrow()
			.find(Some(subject), Some(key), None)
			.filter(|t| match &t.object {
				Term::Literal { lang, datatype: None, .. } => {
					match (lang, tag) {
						(Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
						(None, None) => true,
						_ => false,
					}
				}
				_ => false,
			})
			.map(|t| t.object.clone())
			.collect();
		let mut store = self.base.store.borrow_mut();
		for term in stale {
			store.remove_matching(Some(subject), Some(key), Some(&term));
		}
	}

	// infallible literal paths used by the generated setters

	pub(crate) fn put_lang(&mut self, key: &str, val: &str, lang: Option<&str>) {
		let subject = self.base.subject.clone();
		self.put_lang_on(&subject, &vocab::resolve(key), val, lang);
	}

	fn put_lang_on(&mut self, subject: &str, key: &str, val: &str, lang: Option<&str>) {
		self.replace_lang_variant(subject, key, lang);
		let term = match lang {
			Some(tag) => Term::literal_lang(val, tag),
			None => Term::literal(val),
		};
		self.base.store.borrow_mut().add(Triple::new(subject, key, term));
	}

	pub(crate) fn put_date(&mut self, key: &str, val: DateTime<Utc>) {
		let key = vocab::resolve(key);
		let repr = val.to_rfc3339_opts(SecondsFormat::Secs, true);
		let subject = self.base.subject.clone();
		self.insert(&subject, &key, Term::literal_typed(repr, xsd::DATE_TIME), true);
	}

	pub(crate) fn put_non_negative_int(&mut self, key: &str, val: i64) {
		let key = vocab::resolve(key);
		let subject = self.base.subject.clone();
		let term = Term::literal_typed(val.max(0).to_string(), xsd::NON_NEGATIVE_INTEGER);
		self.insert(&subject, &key, term, true);
	}

	pub(crate) fn put_ranged(&mut self, key: &str, val: f64, min: f64, max: f64) {
		if !val.is_finite() {
			tracing::warn!(property = %key, "ignoring non-finite number");
			return;
		}
		self.put_float(key, val.clamp(min, max));
	}

	pub(crate) fn put_float(&mut self, key: &str, val: f64) {
		if !val.is_finite() {
			tracing::warn!(property = %key, "ignoring non-finite number");
			return;
		}
		let key = vocab::resolve(key);
		let subject = self.base.subject.clone();
		self.insert(&subject, &key, Term::literal_typed(format_float(val), xsd::FLOAT), true);
	}

	pub(crate) fn put_plain(&mut self, key: &str, val: &str) {
		let key = vocab::resolve(key);
		let subject = self.base.subject.clone();
		self.insert(&subject, &key, Term::literal(val), true);
	}
}

/// Integer-valued floats print without a trailing `.0` so they survive a
/// round trip through JSON unchanged.
fn format_float(n: f64) -> String {
	if n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{}", n as i64)
	} else {
		n.to_string()
	}
}

/// Chainable mutators shared by every builder.
pub trait BaseMut: Sized {
	fn builder_mut(&mut self) -> &mut Builder;
	fn builder_ref(&self) -> &Builder;

	/// Name the node. Fails unless the identifier is absolute.
	fn id(mut self, id: &str) -> crate::Result<Self> {
		self.builder_mut().set_id(id)?;
		Ok(self)
	}

	/// Declare an additional type.
	fn typ(mut self, class: &str) -> Self {
		self.builder_mut().add_type(class);
		self
	}

	/// Set an arbitrary property by short name or IRI.
	fn set(mut self, key: &str, val: impl Into<Input>) -> crate::Result<Self> {
		self.builder_mut().set_in_place(key, val.into(), SetOpts::default())?;
		Ok(self)
	}

	/// Like [`BaseMut::set`] with explicit literal annotations.
	fn set_with(mut self, key: &str, val: impl Into<Input>, opts: SetOpts) -> crate::Result<Self> {
		self.builder_mut().set_in_place(key, val.into(), opts)?;
		Ok(self)
	}

	/// Project the node built so far.
	fn get(&self) -> Typed {
		self.builder_ref().get()
	}
}

impl BaseMut for Builder {
	fn builder_mut(&mut self) -> &mut Builder {
		self
	}

	fn builder_ref(&self) -> &Builder {
		self
	}
}

pub trait ObjectMut: BaseMut {
	setter! { alias(as2::ALIAS) -> str }
	setter! { attached_to(as2::ATTACHED_TO) -> set }
	setter! { attachment(as2::ATTACHMENT) -> set }
	setter! { attributed_to(as2::ATTRIBUTED_TO) -> set }
	setter! { attributed_with(as2::ATTRIBUTED_WITH) -> set }
	setter! { content(as2::CONTENT_PROP) -> lang }
	setter! { context(as2::CONTEXT) -> set }
	setter! { context_of(as2::CONTEXT_OF) -> set }
	setter! { display_name(as2::DISPLAY_NAME) -> lang }
	setter! { end_time(as2::END_TIME) -> date }
	setter! { generator(as2::GENERATOR) -> set }
	setter! { generator_of(as2::GENERATOR_OF) -> set }
	setter! { icon(as2::ICON) -> set }
	setter! { image(as2::IMAGE_PROP) -> set }
	setter! { in_reply_to(as2::IN_REPLY_TO) -> set }
	setter! { location(as2::LOCATION) -> set }
	setter! { location_of(as2::LOCATION_OF) -> set }
	setter! { media_type(as2::MEDIA_TYPE) -> str }
	setter! { member_of(as2::MEMBER_OF) -> set }
	setter! { object_of(as2::OBJECT_OF) -> set }
	setter! { origin_of(as2::ORIGIN_OF) -> set }
	setter! { preview(as2::PREVIEW) -> set }
	setter! { preview_of(as2::PREVIEW_OF) -> set }
	setter! { provider(as2::PROVIDER) -> set }
	setter! { provider_of(as2::PROVIDER_OF) -> set }
	setter! { published(as2::PUBLISHED) -> date }
	setter! { rating(as2::RATING) -> ranged(0.0, 5.0) }
	setter! { replies(as2::REPLIES) -> set }
	setter! { result_of(as2::RESULT_OF) -> set }
	setter! { scope(as2::SCOPE) -> set }
	setter! { scope_of(as2::SCOPE_OF) -> set }
	setter! { start_time(as2::START_TIME) -> date }
	setter! { summary(as2::SUMMARY) -> lang }
	setter! { tag(as2::TAG) -> set }
	setter! { tag_of(as2::TAG_OF) -> set }
	setter! { target_of(as2::TARGET_OF) -> set }
	setter! { title(as2::TITLE) -> lang }
	setter! { updated(as2::UPDATED) -> date }
	setter! { url(as2::URL) -> set }
}

pub trait ActivityMut: ObjectMut {
	setter! { actor(as2::ACTOR_PROP) -> set }
	setter! { object(as2::OBJECT_PROP) -> set }
	setter! { target(as2::TARGET) -> set }
	setter! { result(as2::RESULT) -> set }
	setter! { origin(as2::ORIGIN) -> set }
	setter! { priority(as2::PRIORITY) -> ranged(0.0, 1.0) }
	setter! { to(as2::TO) -> set }
	setter! { bto(as2::BTO) -> set }
	setter! { cc(as2::CC) -> set }
	setter! { bcc(as2::BCC) -> set }
}

pub trait ActorMut: ObjectMut {
	setter! { actor_of(as2::ACTOR_OF) -> set }
}

pub trait ContentMut: ObjectMut {
	setter! { height(as2::HEIGHT) -> nonneg }
	setter! { width(as2::WIDTH) -> nonneg }
	setter! { duration(as2::DURATION) -> duration }
}

pub trait PlaceMut: ObjectMut {
	setter! { accuracy(as2::ACCURACY) -> ranged(0.0, 100.0) }
	setter! { altitude(as2::ALTITUDE) -> float }
	setter! { latitude(as2::LATITUDE) -> ranged(-90.0, 90.0) }
	setter! { longitude(as2::LONGITUDE) -> ranged(-180.0, 180.0) }
	setter! { radius(as2::RADIUS) -> ranged(0.0, f64::MAX) }
	setter! { units(as2::UNITS) -> str }
}

pub trait QuestionMut: ActivityMut {
	setter! { one_of(as2::ONE_OF) -> set }
	setter! { any_of(as2::ANY_OF) -> set }
}

pub trait PossibleAnswerMut: ContentMut {
	setter! { shape(as2::SHAPE) -> set }
}

pub trait LinkMut: BaseMut {
	setter! { href(as2::HREF) -> str }
	setter! { hreflang(as2::HREFLANG) -> str }
	setter! { rel(as2::REL) -> set }
	setter! { href_template(as2::HREF_TEMPLATE) -> str }
}

impl ObjectMut for Builder {}
impl ActivityMut for Builder {}
impl ActorMut for Builder {}
impl ContentMut for Builder {}
impl PlaceMut for Builder {}
impl QuestionMut for Builder {}
impl PossibleAnswerMut for Builder {}
impl LinkMut for Builder {}

#[cfg(test)]
mod test {
	use super::*;
	use crate::object::{Activity, Kind, Object};

	fn env() -> Env {
		Env::with_language("en")
	}

	#[test]
	fn setting_a_functional_property_replaces_the_previous_value() {
		let note = env()
			.note()
			.media_type("text/plain")
			.media_type("text/html")
			.get();
		assert_eq!(note.media_type().as_deref(), Some("text/html"));
	}

	#[test]
	fn array_values_on_a_functional_property_are_rejected() {
		let err = env()
			.note()
			.set("mediaType", vec!["text/plain", "text/html"])
			.unwrap_err();
		assert!(matches!(err, Error::InvalidType(_)));
		// a one-element array is still an array
		let err = env().note().set("mediaType", vec!["text/plain"]).unwrap_err();
		assert!(matches!(err, Error::InvalidType(_)));
	}

	#[test]
	fn non_functional_properties_accumulate_in_order() {
		let note = env()
			.note()
			.set("tag", "urn:x:a")
			.unwrap()
			.set("tag", "urn:x:b")
			.unwrap()
			.get();
		let tags: Vec<_> = note.get("tag").ids();
		assert_eq!(tags, vec!["urn:x:a", "urn:x:b"]);
	}

	#[test]
	fn range_clamps_apply_on_write() {
		let review = env().review().rating(7.5).get();
		assert_eq!(review.rating(), Some(5.0));
		let place = env().place().latitude(-123.0).longitude(500.0).get();
		use crate::object::Place;
		assert_eq!(place.latitude(), Some(-90.0));
		assert_eq!(place.longitude(), Some(180.0));
	}

	#[test]
	fn non_finite_numbers_are_silently_dropped() {
		let review = env().review().rating(f64::NAN).get();
		assert_eq!(review.rating(), None);
	}

	#[test]
	fn non_negative_integers_floor_at_zero() {
		use crate::object::Content;
		let img = env().image().height(-3).width(640).get();
		assert_eq!(img.height(), Some(0));
		assert_eq!(img.width(), Some(640));
	}

	#[test]
	fn language_variants_replace_per_tag() {
		let note = env()
			.note()
			.content("hello", Some("en"))
			.content("bonjour", Some("fr"))
			.content("hi", Some("en"))
			.get();
		let content = note.content();
		assert_eq!(content.get("en"), Some("hi"));
		assert_eq!(content.get("fr"), Some("bonjour"));
		assert_eq!(content.len(), 2);
	}

	#[test]
	fn nesting_a_builder_merges_its_graph_and_renames_local_nodes() {
		let e = env();
		let inner_note = e.note().content("inner", None);
		let inner_subject = inner_note.subject().to_string();
		let post = e.post().object(inner_note).unwrap();
		let objects = post.get().object();
		assert_eq!(objects.len(), 1);
		assert_eq!(objects[0].kind(), Kind::Content);
		assert_eq!(objects[0].content().get("*"), Some("inner"));
		// merged under a fresh local identifier
		assert_ne!(objects[0].subject(), inner_subject);
	}

	#[test]
	fn iri_strings_on_object_properties_become_references() {
		let e = env();
		let post = e.post().actor("acct:joe@example.org").unwrap().get();
		let actors = post.actor();
		assert_eq!(actors.len(), 1);
		assert_eq!(actors[0].subject(), "acct:joe@example.org");
	}

	#[test]
	fn naming_a_node_rewrites_every_reference() {
		let e = env();
		let note = e
			.note()
			.content("x", None)
			.id("https://example.org/note/1")
			.unwrap();
		let typed = note.get();
		assert_eq!(typed.id(), Some("https://example.org/note/1"));
		assert!(typed.content().get("*").is_some());
	}

	#[test]
	fn relative_identifiers_are_rejected() {
		let err = env().note().id("not-absolute").unwrap_err();
		assert!(matches!(err, Error::InvalidValue(_)));
	}

	#[test]
	fn plain_json_maps_become_anonymous_nested_nodes() {
		let e = env();
		let post = e
			.post()
			.object(serde_json::json!({
				"type": "Note",
				"content": "from json",
				"rating": 3.5,
			}))
			.unwrap()
			.get();
		let obj = &post.object()[0];
		assert_eq!(obj.kind(), Kind::Content);
		assert_eq!(obj.rating(), Some(3.5));
		assert_eq!(obj.id(), None);
	}

	#[test]
	fn inverse_properties_mirror_their_forward_setters() {
		let e = env();
		let svc = e
			.service()
			.provider_of("urn:x:feed")
			.unwrap()
			.provider("urn:x:org")
			.unwrap()
			.get();
		assert_eq!(svc.provider_of()[0].subject(), "urn:x:feed");
		assert_eq!(svc.provider()[0].subject(), "urn:x:org");
		let place = e.place().location_of("urn:x:meetup").unwrap().get();
		assert_eq!(place.location_of()[0].subject(), "urn:x:meetup");
	}

	#[test]
	fn factory_extra_types_subsume_the_base_class() {
		let e = env();
		let plain = e.activity_ext(&["Like"]).get();
		assert_eq!(plain.types(), vec![vocab::resolve("Like")]);
		let kept = e.activity_ext(&["ext:Custom"]).get();
		assert_eq!(
			kept.types(),
			vec!["ext:Custom".to_string(), as2::ACTIVITY.to_string()]
		);
	}
}
