//! Collections: plain membership or an ordered item chain.
//!
//! Ordered collections keep their items as a linked chain of cells
//! (`rdf:first`/`rdf:rest` ending at `rdf:nil`), so order survives in the
//! graph itself. A collection commits to one shape the first time an item is
//! added and refuses to mix the two.

use std::collections::HashSet;

use crate::builder::{
	ActivityMut, ActorMut, BaseMut, Builder, ContentMut, Input, LinkMut, ObjectMut,
	PlaceMut, PossibleAnswerMut, QuestionMut, SetOpts,
};
use crate::error::{Error, Result};
use crate::macros::{getter, setter};
use crate::object::{wrap_object, Object, Typed};
use crate::store::{Term, Triple};
use crate::vocab::{as2, rdf};
use crate::Env;

pub trait Collection: Object {
	getter! { total_items(as2::TOTAL_ITEMS) -> u64 }
	getter! { items_per_page(as2::ITEMS_PER_PAGE) -> u64 }
	getter! { start_index(as2::START_INDEX) -> u64 }
	getter! { current(as2::CURRENT) -> node }
	getter! { first(as2::FIRST) -> node }
	getter! { last(as2::LAST) -> node }
	getter! { next(as2::NEXT) -> node }
	getter! { prev(as2::PREV) -> node }
	getter! { self_link(as2::SELF) -> node }

	/// Whether the items form an ordered chain.
	fn ordered(&self) -> bool {
		let base = self.base();
		let Some(head) = base.get(as2::ITEMS).one().and_then(|v| v.id().map(str::to_string)) else {
			return false;
		};
		let chained = base
			.store()
			.borrow()
			.find(Some(&head), Some(rdf::FIRST), None)
			.next()
			.is_some();
		chained
	}

	/// Member items in graph order, transparently following an ordered
	/// chain when one is present. Cycles in a malformed chain terminate
	/// the walk.
	fn items(&self) -> Vec<Typed> {
		let base = self.base();
		if !self.ordered() {
			return base.get(as2::ITEMS).nodes();
		}
		let head = match base.get(as2::ITEMS).one().and_then(|v| v.id().map(str::to_string)) {
			Some(h) => h,
			None => return Vec::new(),
		};
		let store = base.store();
		let mut out = Vec::new();
		let mut seen = HashSet::new();
		let mut cell = head;
		while cell != rdf::NIL && seen.insert(cell.clone()) {
			let (item, rest) = {
				let s = store.borrow();
				let item = s
					.find(Some(&cell), Some(rdf::FIRST), None)
					.next()
					.and_then(|t| t.object.id().map(str::to_string));
				let rest = s
					.find(Some(&cell), Some(rdf::REST), None)
					.next()
					.and_then(|t| t.object.id().map(str::to_string));
				(item, rest)
			};
			if let Some(id) = item {
				out.push(wrap_object(base.env(), store, &id));
			}
			match rest {
				Some(next) => cell = next,
				None => break,
			}
		}
		out
	}
}

impl Collection for Typed {}

/// Which item shape the collection has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	Unset,
	Plain,
	Ordered,
}

/// Builder for collections; everything a plain [`Builder`] does, plus item
/// management in either shape.
#[derive(Debug)]
pub struct CollectionBuilder {
	inner: Builder,
	mode: Mode,
	tail: Option<String>,
	force_ordered: bool,
}

impl CollectionBuilder {
	pub(crate) fn with_types(env: Env, base_class: &str, extras: &[&str], force_ordered: bool) -> Self {
		CollectionBuilder {
			inner: Builder::with_types_ext(env, base_class, extras),
			mode: Mode::Unset,
			tail: None,
			force_ordered,
		}
	}

	/// Add a member. On an ordered collection this appends to the chain;
	/// on a plain one it accumulates. Fails once the other shape is in use.
	pub fn item(self, val: impl Into<Input>) -> Result<Self> {
		if self.force_ordered {
			return self.ordered_item(val);
		}
		self.plain_item(val.into())
	}

	fn plain_item(mut self, val: Input) -> Result<Self> {
		if self.mode == Mode::Ordered {
			return Err(Error::StateConflict("collection already holds an ordered item chain"));
		}
		self.mode = Mode::Plain;
		self.inner.set_in_place(as2::ITEMS, val, SetOpts::default())?;
		Ok(self)
	}

	/// Append to the ordered chain, creating it on first use.
	pub fn ordered_item(mut self, val: impl Into<Input>) -> Result<Self> {
		if self.mode == Mode::Plain {
			return Err(Error::StateConflict("collection already holds plain items"));
		}
		self.mode = Mode::Ordered;
		let cell = {
			let mut store = self.inner.store().borrow_mut();
			let cell = store.next_blank();
			match &self.tail {
				Some(tail) => {
					store.remove_matching(Some(tail), Some(rdf::REST), None);
					store.add(Triple::new(tail, rdf::REST, Term::node(&cell)));
				}
				None => {
					store.add(Triple::new(self.inner.subject(), as2::ITEMS, Term::node(&cell)));
				}
			}
			store.add(Triple::new(&cell, rdf::REST, Term::node(rdf::NIL)));
			cell
		};
		self.inner.set_on(&cell, rdf::FIRST, val.into(), &SetOpts::default())?;
		self.tail = Some(cell);
		Ok(self)
	}

	pub fn items<T: Into<Input>>(self, vals: impl IntoIterator<Item = T>) -> Result<Self> {
		let mut this = self;
		for val in vals {
			this = this.item(val)?;
		}
		Ok(this)
	}
}

impl BaseMut for CollectionBuilder {
	fn builder_mut(&mut self) -> &mut Builder {
		&mut self.inner
	}

	fn builder_ref(&self) -> &Builder {
		&self.inner
	}
}

impl ObjectMut for CollectionBuilder {}
impl ActivityMut for CollectionBuilder {}
impl ActorMut for CollectionBuilder {}
impl ContentMut for CollectionBuilder {}
impl PlaceMut for CollectionBuilder {}
impl QuestionMut for CollectionBuilder {}
impl PossibleAnswerMut for CollectionBuilder {}
impl LinkMut for CollectionBuilder {}

/// Collection paging and counters, for the collection builder only.
pub trait CollectionMut: ObjectMut {
	setter! { total_items(as2::TOTAL_ITEMS) -> nonneg }
	setter! { items_per_page(as2::ITEMS_PER_PAGE) -> nonneg }
	setter! { start_index(as2::START_INDEX) -> nonneg }
	setter! { current(as2::CURRENT) -> set }
	setter! { first(as2::FIRST) -> set }
	setter! { last(as2::LAST) -> set }
	setter! { next(as2::NEXT) -> set }
	setter! { prev(as2::PREV) -> set }
	setter! { self_link(as2::SELF) -> set }
}

impl CollectionMut for CollectionBuilder {}

impl From<CollectionBuilder> for Input {
	fn from(v: CollectionBuilder) -> Self {
		Input::Builder(v.inner)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::object::Kind;

	fn env() -> Env {
		Env::with_language("en")
	}

	#[test]
	fn plain_items_accumulate_without_a_chain() {
		let coll = env()
			.collection()
			.item("urn:x:a")
			.unwrap()
			.item("urn:x:b")
			.unwrap()
			.get();
		assert!(!coll.ordered());
		let ids: Vec<_> = coll.items().iter().map(|i| i.subject().to_string()).collect();
		assert_eq!(ids, vec!["urn:x:a", "urn:x:b"]);
	}

	#[test]
	fn ordered_items_come_back_in_append_order() {
		let coll = env()
			.ordered_collection()
			.item("urn:x:1")
			.unwrap()
			.item("urn:x:2")
			.unwrap()
			.item("urn:x:3")
			.unwrap()
			.get();
		assert!(coll.ordered());
		assert_eq!(coll.kind(), Kind::OrderedCollection);
		let ids: Vec<_> = coll.items().iter().map(|i| i.subject().to_string()).collect();
		assert_eq!(ids, vec!["urn:x:1", "urn:x:2", "urn:x:3"]);
	}

	#[test]
	fn the_chain_terminates_at_nil() {
		let builder = env().ordered_collection().item("urn:x:1").unwrap();
		let typed = builder.get();
		let store = typed.store().clone();
		let nil_links = store
			.borrow()
			.find(None, Some(rdf::REST), Some(&Term::node(rdf::NIL)))
			.count();
		assert_eq!(nil_links, 1);
		// appending moves the nil link to the new tail
		let typed = builder.item("urn:x:2").unwrap().get();
		let store = typed.store().clone();
		let nil_links = store
			.borrow()
			.find(None, Some(rdf::REST), Some(&Term::node(rdf::NIL)))
			.count();
		assert_eq!(nil_links, 1);
	}

	#[test]
	fn mixing_item_shapes_is_a_state_conflict() {
		let err = env()
			.collection()
			.item("urn:x:a")
			.unwrap()
			.ordered_item("urn:x:b")
			.unwrap_err();
		assert!(matches!(err, Error::StateConflict(_)));
	}

	#[test]
	fn nested_objects_can_be_chain_items() {
		let e = env();
		let story = e
			.story()
			.item(e.note().content("first", None))
			.unwrap()
			.item(e.note().content("second", None))
			.unwrap()
			.get();
		let items = story.items();
		assert_eq!(items.len(), 2);
		assert_eq!(items[0].kind(), Kind::Content);
		assert_eq!(items[0].content().get("*"), Some("first"));
		assert_eq!(items[1].content().get("*"), Some("second"));
	}

	#[test]
	fn paging_counters_clamp_like_any_non_negative_integer() {
		let coll = env().collection().total_items(-4).items_per_page(10).get();
		assert_eq!(coll.total_items(), Some(0));
		assert_eq!(coll.items_per_page(), Some(10));
	}
}
