//! The JSON boundary.
//!
//! Documents cross in and out as compact JSON trees against the fixed
//! Activity Streams context: short property names, native numbers and
//! booleans, language maps for language properties, `orderedItems` arrays
//! for item chains. Everything in between lives as triples; none of the
//! JSON shapes survive internally.

use std::collections::HashSet;

use serde_json::{Map, Value as Json};

use crate::base::Base;
use crate::builder::{Builder, Input, SetOpts};
use crate::error::{Error, Result};
use crate::object::{wrap_object, Typed};
use crate::store::{anonymous_subject, is_local, Store, StoreRef, Term, Triple};
use crate::vocab::{self, rdf};
use crate::vocab::as2;
use crate::Env;

const CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Parse a JSON document into a fresh graph and project its root.
pub(crate) fn import(env: &Env, doc: &Json) -> Result<Typed> {
	let map = doc
		.as_object()
		.ok_or_else(|| Error::Import("document root must be a JSON object".to_string()))?;
	let store = Store::new_ref();
	let subject = import_node(env, &store, map)?;
	Ok(wrap_object(env, &store, &subject))
}

/// Import one JSON object into `store`, returning its subject. Nested
/// objects recurse through the builder's set path so every coercion rule
/// applies on the way in.
pub(crate) fn import_node(env: &Env, store: &StoreRef, map: &Map<String, Json>) -> Result<String> {
	let subject = map
		.get("id")
		.or_else(|| map.get("@id"))
		.and_then(Json::as_str)
		.map(str::to_string)
		.unwrap_or_else(anonymous_subject);
	let mut shim = Builder { base: Base::new(env.clone(), store.clone(), subject.clone()) };
	for (key, value) in map {
		match key.as_str() {
			"@context" | "id" | "@id" => {}
			"type" | "@type" => {
				for ty in strings_of(value) {
					store.borrow_mut().add(Triple::new(
						&subject,
						rdf::TYPE,
						Term::node(&vocab::resolve(ty)),
					));
				}
			}
			"orderedItems" => import_chain(&mut shim, &subject, value)?,
			_ => shim.set_on(&subject, key, Input::Json(value.clone()), &SetOpts::default())?,
		}
	}
	Ok(subject)
}

fn strings_of(value: &Json) -> Vec<&str> {
	match value {
		Json::String(s) => vec![s],
		Json::Array(items) => items.iter().filter_map(Json::as_str).collect(),
		_ => Vec::new(),
	}
}

fn import_chain(shim: &mut Builder, subject: &str, value: &Json) -> Result<()> {
	let items = value
		.as_array()
		.ok_or_else(|| Error::Import("orderedItems must be an array".to_string()))?;
	let mut tail: Option<String> = None;
	for item in items {
		let cell = {
			let mut store = shim.store().borrow_mut();
			let cell = store.next_blank();
			match &tail {
				Some(tail) => {
					store.remove_matching(Some(tail), Some(rdf::REST), None);
					store.add(Triple::new(tail, rdf::REST, Term::node(&cell)));
				}
				None => {
					store.add(Triple::new(subject, as2::ITEMS, Term::node(&cell)));
				}
			}
			store.add(Triple::new(&cell, rdf::REST, Term::node(rdf::NIL)));
			cell
		};
		shim.set_on(&cell, rdf::FIRST, Input::Json(item.clone()), &SetOpts::default())?;
		tail = Some(cell);
	}
	Ok(())
}

/// Serialize the subgraph reachable from `base` as one compact document.
pub(crate) fn export(base: &Base) -> Result<Json> {
	let mut visited = HashSet::new();
	let mut doc = export_node(base.env(), base.store(), base.subject(), &mut visited, true);
	if let Json::Object(map) = &mut doc {
		map.insert("@context".to_string(), Json::String(CONTEXT.to_string()));
	}
	Ok(doc)
}

/// Export one node. Non-root nodes already visited, and nodes with no
/// triples of their own, compact down to their bare identifier.
fn export_node(
	env: &Env,
	store: &StoreRef,
	subject: &str,
	visited: &mut HashSet<String>,
	root: bool,
) -> Json {
	if !root && (visited.contains(subject) || store.borrow().count_subject(subject) == 0) {
		return Json::String(subject.to_string());
	}
	visited.insert(subject.to_string());

	let mut map = Map::new();
	if !is_local(subject) {
		map.insert("id".to_string(), Json::String(subject.to_string()));
	}

	let mut types: Vec<Json> = Vec::new();
	let mut grouped: Vec<(String, Vec<Term>)> = Vec::new();
	{
		let s = store.borrow();
		for t in s.find(Some(subject), None, None) {
			if t.predicate == rdf::TYPE {
				if let Some(ty) = t.object.id() {
					let short = vocab::compact(ty).unwrap_or(ty);
					types.push(Json::String(short.to_string()));
				}
				continue;
			}
			match grouped.iter_mut().find(|(p, _)| *p == t.predicate) {
				Some((_, terms)) => terms.push(t.object.clone()),
				None => grouped.push((t.predicate.clone(), vec![t.object.clone()])),
			}
		}
	}
	if !types.is_empty() {
		map.insert("type".to_string(), collapse(types));
	}

	for (pred, terms) in grouped {
		let key = vocab::compact(&pred).unwrap_or(&pred).to_string();
		if env.reasoner().is_language_property(&pred) {
			map.insert(key, language_map(&terms));
			continue;
		}
		if pred == as2::ITEMS {
			if let Some(chain) = chain_ids(store, &terms) {
				let items: Vec<Json> = chain
					.iter()
					.map(|id| export_node(env, store, id, visited, false))
					.collect();
				map.insert("orderedItems".to_string(), Json::Array(items));
				continue;
			}
		}
		let values: Vec<Json> = terms
			.iter()
			.map(|term| term_to_json(env, store, term, visited))
			.collect();
		map.insert(key, collapse(values));
	}
	Json::Object(map)
}

fn collapse(mut values: Vec<Json>) -> Json {
	if values.len() == 1 {
		values.remove(0)
	} else {
		Json::Array(values)
	}
}

/// Fold a language property's literals into a language map, or a plain
/// string when only the untagged default is present.
fn language_map(terms: &[Term]) -> Json {
	let mut map = Map::new();
	let mut default: Option<&str> = None;
	for term in terms {
		if let Term::Literal { value, lang, .. } = term {
			match lang {
				Some(tag) => {
					map.insert(tag.clone(), Json::String(value.clone()));
				}
				None => default = Some(value),
			}
		}
	}
	match (map.is_empty(), default) {
		(true, Some(value)) => Json::String(value.to_string()),
		(_, maybe) => {
			if let Some(value) = maybe {
				map.insert("@none".to_string(), Json::String(value.to_string()));
			}
			Json::Object(map)
		}
	}
}

/// When the single `items` value heads a chain, the ids of its cells'
/// members in chain order.
fn chain_ids(store: &StoreRef, terms: &[Term]) -> Option<Vec<String>> {
	let head = match terms {
		[single] => single.id()?.to_string(),
		_ => return None,
	};
	let s = store.borrow();
	s.find(Some(&head), Some(rdf::FIRST), None).next()?;
	let mut out = Vec::new();
	let mut seen = HashSet::new();
	let mut cell = head;
	while cell != rdf::NIL && seen.insert(cell.clone()) {
		if let Some(id) = s
			.find(Some(&cell), Some(rdf::FIRST), None)
			.next()
			.and_then(|t| t.object.id())
		{
			out.push(id.to_string());
		}
		let rest = s
			.find(Some(&cell), Some(rdf::REST), None)
			.next()
			.and_then(|t| t.object.id().map(str::to_string));
		match rest {
			Some(next) => cell = next,
			None => break,
		}
	}
	Some(out)
}

fn term_to_json(env: &Env, store: &StoreRef, term: &Term, visited: &mut HashSet<String>) -> Json {
	match term {
		Term::Literal { value, lang: Some(tag), .. } => serde_json::json!({
			"@value": value,
			"@language": tag,
		}),
		Term::Literal { value, datatype: Some(dt), .. } => {
			let r = env.reasoner();
			if r.is_number(dt) {
				match number_json(value) {
					Some(n) => n,
					None => Json::String(value.clone()),
				}
			} else if r.is_boolean(dt) {
				Json::Bool(value == "true" || value == "1")
			} else if r.is_date(dt) {
				Json::String(value.clone())
			} else {
				serde_json::json!({ "@value": value, "@type": dt })
			}
		}
		Term::Literal { value, .. } => Json::String(value.clone()),
		Term::Iri(id) | Term::Blank(id) => export_node(env, store, id, visited, false),
	}
}

fn number_json(value: &str) -> Option<Json> {
	if let Ok(i) = value.parse::<i64>() {
		return Some(Json::Number(i.into()));
	}
	let f = value.parse::<f64>().ok()?;
	serde_json::Number::from_f64(f).map(Json::Number)
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::builder::{ActivityMut, BaseMut, ObjectMut};
	use crate::object::{Activity, Collection, Kind, Object};
	use crate::Env;

	fn env() -> Env {
		Env::with_language("en")
	}

	#[test]
	fn documents_round_trip_through_the_boundary() {
		let e = env();
		let post = e
			.post()
			.id("https://example.org/post/1")
			.unwrap()
			.actor("acct:joe@example.org")
			.unwrap()
			.object(
				e.note()
					.content("hallo", Some("de"))
					.content("hello", Some("en")),
			)
			.unwrap()
			.get();
		let doc = post.export().unwrap();
		let back = e.import(&doc).unwrap();
		assert_eq!(back.kind(), Kind::Activity);
		assert_eq!(back.id(), Some("https://example.org/post/1"));
		assert_eq!(back.actor()[0].subject(), "acct:joe@example.org");
		let note = &back.object()[0];
		assert_eq!(note.content().get("de"), Some("hallo"));
		assert_eq!(note.content().get("en"), Some("hello"));
	}

	#[test]
	fn exported_documents_use_compact_shapes() {
		let e = env();
		let doc = e
			.review()
			.id("https://example.org/review/1")
			.unwrap()
			.rating(4.5)
			.content("nice", None)
			.get()
			.export()
			.unwrap();
		assert_eq!(doc["@context"], json!("https://www.w3.org/ns/activitystreams"));
		assert_eq!(doc["type"], json!("Review"));
		assert_eq!(doc["rating"], json!(4.5));
		// single untagged variant collapses to a plain string
		assert_eq!(doc["content"], json!("nice"));
	}

	#[test]
	fn language_maps_export_tagged_and_untagged_variants() {
		let e = env();
		let doc = e
			.note()
			.content("hello", Some("en"))
			.content("fallback", None)
			.get()
			.export()
			.unwrap();
		assert_eq!(doc["content"]["en"], json!("hello"));
		assert_eq!(doc["content"]["@none"], json!("fallback"));
	}

	#[test]
	fn anonymous_nodes_export_without_an_id() {
		let e = env();
		let doc = e.note().content("x", None).get().export().unwrap();
		assert!(doc.get("id").is_none());
	}

	#[test]
	fn ordered_items_export_as_an_array_and_import_back_as_a_chain() {
		let e = env();
		let story = e
			.story()
			.item(e.note().content("one", None))
			.unwrap()
			.item(e.note().content("two", None))
			.unwrap()
			.get();
		let doc = story.export().unwrap();
		let items = doc["orderedItems"].as_array().unwrap();
		assert_eq!(items.len(), 2);
		assert_eq!(items[0]["content"], json!("one"));

		let back = e.import(&doc).unwrap();
		assert!(back.ordered());
		let titles: Vec<_> = back
			.items()
			.iter()
			.map(|i| i.content().get("*").unwrap().to_string())
			.collect();
		assert_eq!(titles, vec!["one", "two"]);
	}

	#[test]
	fn imported_numbers_and_dates_coerce_through_the_context_hints() {
		let e = env();
		let back = e
			.import(&json!({
				"type": "Review",
				"rating": 4,
				"published": "2015-12-18T12:00:00Z",
			}))
			.unwrap();
		assert_eq!(back.rating(), Some(4.0));
		assert!(back.published().is_some());
	}

	#[test]
	fn unknown_document_roots_are_an_import_error() {
		let e = env();
		assert!(e.import(&json!("just a string")).is_err());
		assert!(e.import(&json!(["a", "b"])).is_err());
	}

	#[test]
	fn cyclic_graphs_export_with_revisits_as_bare_ids() {
		let e = env();
		let doc = e
			.import(&json!({
				"id": "https://example.org/a",
				"type": "Note",
				"context": {
					"id": "https://example.org/b",
					"type": "Note",
					"context": "https://example.org/a",
				},
			}))
			.unwrap()
			.export()
			.unwrap();
		// the mutual reference comes back as a bare id instead of recursing
		assert_eq!(doc["context"]["id"], json!("https://example.org/b"));
		assert_eq!(doc["context"]["context"], json!("https://example.org/a"));
	}

	#[test]
	fn leaf_references_export_as_bare_strings() {
		let e = env();
		let doc = e
			.post()
			.actor("acct:joe@example.org")
			.unwrap()
			.get()
			.export()
			.unwrap();
		assert_eq!(doc["actor"], json!("acct:joe@example.org"));
	}
}
