//! In-memory triple store.
//!
//! Triples are the sole persistent representation; wrappers and builders are
//! projections over a shared [`Store`] handle. The store keeps insertion
//! order and a subject index; pattern queries scan within that order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a store. The core is single-threaded and synchronous;
/// every wrapper and builder carries its own explicit reference.
pub type StoreRef = Rc<RefCell<Store>>;

/// A triple object: another node or a literal. Language tag and datatype
/// are mutually exclusive on literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
	Iri(String),
	Blank(String),
	Literal {
		value: String,
		lang: Option<String>,
		datatype: Option<String>,
	},
}

impl Term {
	pub fn literal(value: impl Into<String>) -> Self {
		Term::Literal { value: value.into(), lang: None, datatype: None }
	}

	pub fn literal_lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
		Term::Literal { value: value.into(), lang: Some(lang.into()), datatype: None }
	}

	pub fn literal_typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
		Term::Literal { value: value.into(), lang: None, datatype: Some(datatype.into()) }
	}

	/// Node reference for an id string, distinguishing blank labels.
	pub fn node(id: &str) -> Self {
		if id.starts_with("_:") {
			Term::Blank(id.to_string())
		} else {
			Term::Iri(id.to_string())
		}
	}

	/// The id of a non-literal term.
	pub fn id(&self) -> Option<&str> {
		match self {
			Term::Iri(id) | Term::Blank(id) => Some(id),
			Term::Literal { .. } => None,
		}
	}

	pub fn is_literal(&self) -> bool {
		matches!(self, Term::Literal { .. })
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
	pub subject: String,
	pub predicate: String,
	pub object: Term,
}

impl Triple {
	pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
		Triple { subject: subject.into(), predicate: predicate.into(), object }
	}
}

/// True for subjects that are not externally dereferenceable: blank labels
/// and the `urn:id:` identifiers minted for anonymous nodes.
pub fn is_local(subject: &str) -> bool {
	subject.starts_with("_:") || subject.starts_with("urn:id:")
}

/// Mint a fresh `urn:id:` subject for an anonymous node.
pub fn anonymous_subject() -> String {
	format!("urn:id:{}", uuid::Uuid::new_v4())
}

#[derive(Debug, Default)]
pub struct Store {
	triples: Vec<Triple>,
	by_subject: HashMap<String, Vec<usize>>,
	blank_counter: u64,
}

impl Store {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn new_ref() -> StoreRef {
		Rc::new(RefCell::new(Self::new()))
	}

	/// Add a triple, ignoring exact duplicates.
	pub fn add(&mut self, triple: Triple) {
		if self.find(Some(&triple.subject), Some(&triple.predicate), Some(&triple.object)).next().is_some() {
			return;
		}
		self.by_subject
			.entry(triple.subject.clone())
			.or_default()
			.push(self.triples.len());
		self.triples.push(triple);
	}

	pub fn add_all(&mut self, triples: impl IntoIterator<Item = Triple>) {
		for t in triples {
			self.add(t);
		}
	}

	/// Pattern query; `None` matches anything. Results come back in
	/// insertion order.
	pub fn find<'a>(
		&'a self,
		subject: Option<&'a str>,
		predicate: Option<&'a str>,
		object: Option<&'a Term>,
	) -> impl Iterator<Item = &'a Triple> + 'a {
		let indices: Vec<usize> = match subject {
			Some(s) => self.by_subject.get(s).cloned().unwrap_or_default(),
			None => (0..self.triples.len()).collect(),
		};
		indices.into_iter().map(move |i| &self.triples[i]).filter(move |t| {
			predicate.map_or(true, |p| t.predicate == p)
				&& object.map_or(true, |o| &t.object == o)
		})
	}

	/// Remove every triple matching the pattern, returning how many went.
	pub fn remove_matching(
		&mut self,
		subject: Option<&str>,
		predicate: Option<&str>,
		object: Option<&Term>,
	) -> usize {
		let before = self.triples.len();
		self.triples.retain(|t| {
			!(subject.map_or(true, |s| t.subject == s)
				&& predicate.map_or(true, |p| t.predicate == p)
				&& object.map_or(true, |o| &t.object == o))
		});
		self.reindex();
		before - self.triples.len()
	}

	fn reindex(&mut self) {
		self.by_subject.clear();
		for (i, t) in self.triples.iter().enumerate() {
			self.by_subject.entry(t.subject.clone()).or_default().push(i);
		}
	}

	/// Count of triples naming `subject` as subject.
	pub fn count_subject(&self, subject: &str) -> usize {
		self.by_subject.get(subject).map_or(0, |v| v.len())
	}

	pub fn triples(&self) -> &[Triple] {
		&self.triples
	}

	pub fn len(&self) -> usize {
		self.triples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triples.is_empty()
	}

	/// Rewrite every occurrence of a node id, in subject and object
	/// position alike.
	pub fn rename(&mut self, old: &str, new: &str) {
		for t in &mut self.triples {
			if t.subject == old {
				t.subject = new.to_string();
			}
			if t.object.id() == Some(old) {
				t.object = Term::node(new);
			}
		}
		self.reindex();
	}

	/// Next blank-node label, unique within this store.
	pub fn next_blank(&mut self) -> String {
		let label = format!("_:b{}", self.blank_counter);
		self.blank_counter += 1;
		label
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn sample() -> Store {
		let mut store = Store::new();
		store.add(Triple::new("urn:a", "urn:p", Term::node("urn:b")));
		store.add(Triple::new("urn:a", "urn:p", Term::literal("x")));
		store.add(Triple::new("urn:a", "urn:q", Term::literal_lang("bonjour", "fr")));
		store.add(Triple::new("urn:c", "urn:p", Term::node("urn:a")));
		store
	}

	#[test]
	fn pattern_queries_match_on_every_position() {
		let store = sample();
		assert_eq!(store.find(Some("urn:a"), None, None).count(), 3);
		assert_eq!(store.find(None, Some("urn:p"), None).count(), 3);
		assert_eq!(store.find(Some("urn:a"), Some("urn:q"), None).count(), 1);
		assert_eq!(
			store.find(None, None, Some(&Term::node("urn:a"))).count(),
			1
		);
	}

	#[test]
	fn duplicate_triples_are_kept_once() {
		let mut store = sample();
		let len = store.len();
		store.add(Triple::new("urn:a", "urn:p", Term::literal("x")));
		assert_eq!(store.len(), len);
	}

	#[test]
	fn removal_by_pattern_clears_only_matches() {
		let mut store = sample();
		assert_eq!(store.remove_matching(Some("urn:a"), Some("urn:p"), None), 2);
		assert_eq!(store.find(Some("urn:a"), None, None).count(), 1);
		assert_eq!(store.count_subject("urn:c"), 1);
	}

	#[test]
	fn insertion_order_is_preserved_for_a_subject() {
		let store = sample();
		let objects: Vec<_> = store
			.find(Some("urn:a"), Some("urn:p"), None)
			.map(|t| t.object.clone())
			.collect();
		assert_eq!(objects, vec![Term::node("urn:b"), Term::literal("x")]);
	}

	#[test]
	fn blank_labels_are_unique_and_local() {
		let mut store = Store::new();
		let a = store.next_blank();
		let b = store.next_blank();
		assert_ne!(a, b);
		assert!(is_local(&a));
		assert!(is_local("urn:id:123"));
		assert!(!is_local("https://example.org/thing"));
	}
}
