//! Typed views over graph nodes.
//!
//! A [`Typed`] is a [`Base`] plus the [`Kind`] the node's declared types
//! project onto. The view chooses which accessor traits are meaningful; the
//! traits themselves are implemented once, on `Typed`, so any node can be
//! read through any of them.

pub mod activity;
pub mod actor;
pub mod collection;
pub mod content;
pub mod place;
pub mod question;

pub use activity::Activity;
pub use actor::Actor;
pub use collection::{Collection, CollectionBuilder, CollectionMut};
pub use content::Content;
pub use place::Place;
pub use question::{PossibleAnswer, Question};

use crate::base::Base;
use crate::macros::getter;
use crate::store::StoreRef;
use crate::vocab::as2;
use crate::Env;

/// The view a node projects onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Object,
	Link,
	Collection,
	OrderedCollection,
	Actor,
	Activity,
	Question,
	PossibleAnswer,
	Content,
	Place,
}

impl Kind {
	/// The class anchoring this view in the ontology.
	pub fn class(&self) -> &'static str {
		match self {
			Kind::Object => as2::OBJECT,
			Kind::Link => as2::LINK,
			Kind::Collection => as2::COLLECTION,
			Kind::OrderedCollection => as2::ORDERED_COLLECTION,
			Kind::Actor => as2::ACTOR,
			Kind::Activity => as2::ACTIVITY,
			Kind::Question => as2::QUESTION,
			Kind::PossibleAnswer => as2::POSSIBLE_ANSWER,
			Kind::Content => as2::CONTENT,
			Kind::Place => as2::PLACE,
		}
	}
}

/// View candidates checked against each declared type, most specific first.
/// Every declared type is considered in store order and the last one that
/// matches any candidate decides the view, so later type declarations
/// override earlier ones.
const CANDIDATES: &[Kind] = &[
	Kind::Link,
	Kind::OrderedCollection,
	Kind::Collection,
	Kind::Actor,
	Kind::Question,
	Kind::Activity,
	Kind::PossibleAnswer,
	Kind::Content,
	Kind::Place,
];

/// Project a node onto its typed view. Pure: recomputed from the declared
/// types on every call, never memoized.
pub(crate) fn wrap_object(env: &Env, store: &StoreRef, subject: &str) -> Typed {
	let base = Base::new(env.clone(), store.clone(), subject);
	let mut kind = Kind::Object;
	let reasoner = env.reasoner();
	for ty in base.types() {
		for candidate in CANDIDATES {
			if reasoner.is_subclass_of(&ty, candidate.class()) {
				kind = *candidate;
				break;
			}
		}
	}
	drop(reasoner);
	Typed { base, kind }
}

/// A graph node viewed through the projection its types resolve to.
#[derive(Debug, Clone)]
pub struct Typed {
	pub(crate) base: Base,
	pub(crate) kind: Kind,
}

impl Typed {
	pub fn kind(&self) -> Kind {
		self.kind
	}

	/// Re-read the node through a specific view, ignoring its declared types.
	pub fn view_as(&self, kind: Kind) -> Typed {
		Typed { base: self.base.clone(), kind }
	}
}

impl std::ops::Deref for Typed {
	type Target = Base;

	fn deref(&self) -> &Base {
		&self.base
	}
}

impl Base {
	/// Project this node onto its typed view.
	pub fn kind(&self) -> Kind {
		wrap_object(&self.env, &self.store, &self.subject).kind
	}

	pub fn typed(&self) -> Typed {
		wrap_object(&self.env, &self.store, &self.subject)
	}
}

/// Anything that reads through a [`Base`].
pub trait View {
	fn base(&self) -> &Base;
}

impl View for Typed {
	fn base(&self) -> &Base {
		&self.base
	}
}

/// Properties shared by every object.
pub trait Object: View {
	getter! { alias(as2::ALIAS) -> str }
	getter! { attached_to(as2::ATTACHED_TO) -> nodes }
	getter! { attachment(as2::ATTACHMENT) -> nodes }
	getter! { attributed_to(as2::ATTRIBUTED_TO) -> nodes }
	getter! { attributed_with(as2::ATTRIBUTED_WITH) -> nodes }
	getter! { content(as2::CONTENT_PROP) -> lang }
	getter! { context(as2::CONTEXT) -> nodes }
	getter! { context_of(as2::CONTEXT_OF) -> nodes }
	getter! { display_name(as2::DISPLAY_NAME) -> lang }
	getter! { end_time(as2::END_TIME) -> date }
	getter! { generator(as2::GENERATOR) -> nodes }
	getter! { generator_of(as2::GENERATOR_OF) -> nodes }
	getter! { icon(as2::ICON) -> nodes }
	getter! { image(as2::IMAGE_PROP) -> nodes }
	getter! { in_reply_to(as2::IN_REPLY_TO) -> nodes }
	getter! { location(as2::LOCATION) -> nodes }
	getter! { location_of(as2::LOCATION_OF) -> nodes }
	getter! { media_type(as2::MEDIA_TYPE) -> str }
	getter! { member_of(as2::MEMBER_OF) -> nodes }
	getter! { object_of(as2::OBJECT_OF) -> nodes }
	getter! { origin_of(as2::ORIGIN_OF) -> nodes }
	getter! { preview(as2::PREVIEW) -> nodes }
	getter! { preview_of(as2::PREVIEW_OF) -> nodes }
	getter! { provider(as2::PROVIDER) -> nodes }
	getter! { provider_of(as2::PROVIDER_OF) -> nodes }
	getter! { published(as2::PUBLISHED) -> date }
	getter! { rating(as2::RATING) -> f64 }
	getter! { replies(as2::REPLIES) -> nodes }
	getter! { result_of(as2::RESULT_OF) -> nodes }
	getter! { scope(as2::SCOPE) -> nodes }
	getter! { scope_of(as2::SCOPE_OF) -> nodes }
	getter! { start_time(as2::START_TIME) -> date }
	getter! { summary(as2::SUMMARY) -> lang }
	getter! { tag(as2::TAG) -> nodes }
	getter! { tag_of(as2::TAG_OF) -> nodes }
	getter! { target_of(as2::TARGET_OF) -> nodes }
	getter! { title(as2::TITLE) -> lang }
	getter! { updated(as2::UPDATED) -> date }
	getter! { url(as2::URL) -> nodes }
}

impl Object for Typed {}

#[cfg(test)]
mod test {
	use super::*;
	use crate::store::{Store, Term, Triple};
	use crate::vocab::rdf;

	fn project(types: &[&str]) -> Kind {
		let env = Env::new();
		let store = Store::new_ref();
		{
			let mut s = store.borrow_mut();
			for ty in types {
				s.add(Triple::new("urn:x:it", rdf::TYPE, Term::node(&crate::vocab::resolve(ty))));
			}
		}
		wrap_object(&env, &store, "urn:x:it").kind()
	}

	#[test]
	fn untyped_nodes_project_onto_the_generic_view() {
		assert_eq!(project(&[]), Kind::Object);
		assert_eq!(project(&["Event"]), Kind::Object);
	}

	#[test]
	fn subclasses_project_onto_their_nearest_view() {
		assert_eq!(project(&["Note"]), Kind::Content);
		assert_eq!(project(&["Person"]), Kind::Actor);
		assert_eq!(project(&["Like"]), Kind::Activity);
		assert_eq!(project(&["Mention"]), Kind::Link);
		assert_eq!(project(&["Album"]), Kind::Collection);
		assert_eq!(project(&["Story"]), Kind::OrderedCollection);
	}

	#[test]
	fn question_wins_over_its_activity_and_content_ancestry() {
		assert_eq!(project(&["Question"]), Kind::Question);
	}

	#[test]
	fn the_last_declared_type_with_a_view_decides() {
		assert_eq!(project(&["Collection", "Actor"]), Kind::Actor);
		assert_eq!(project(&["Actor", "Collection"]), Kind::Collection);
		// a type with no view of its own does not reset an earlier match
		assert_eq!(project(&["Person", "Event"]), Kind::Actor);
	}

	#[test]
	fn reprojection_overrides_the_declared_view() {
		let env = Env::new();
		let store = Store::new_ref();
		store.borrow_mut().add(Triple::new(
			"urn:x:it",
			rdf::TYPE,
			Term::node(crate::vocab::as2::NOTE),
		));
		let it = wrap_object(&env, &store, "urn:x:it");
		assert_eq!(it.kind(), Kind::Content);
		assert_eq!(it.view_as(Kind::Place).kind(), Kind::Place);
	}
}
