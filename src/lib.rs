//! Activity Streams documents over an RDF triple graph.
//!
//! Documents are parsed into triples, held in an in-memory [`Store`], and
//! read back through typed views resolved against a built-in ontology.
//! Property access is ontology-driven: the reasoner decides whether a value
//! is a nested object, a number, a date, a boolean or a per-language string,
//! and whether a property holds one value or many. Builders write the same
//! triples back, clamping ranges and merging nested graphs as they go.
//!
//! ```
//! use asgraph::{ActivityMut, Env, Kind, ObjectMut};
//!
//! let env = Env::new();
//! let post = env.post()
//! 	.actor("acct:joe@example.org")?
//! 	.object(env.note().content("hello", Some("en")))?
//! 	.get();
//! let doc = post.export()?;
//! let back = env.import(&doc)?;
//! assert_eq!(back.kind(), Kind::Activity);
//! # Ok::<(), asgraph::Error>(())
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub mod base;
pub mod builder;
pub mod error;
mod jsonld;
pub mod langval;
pub mod link;
mod macros;
pub mod object;
pub mod reasoner;
pub mod store;
pub mod vocab;

pub use base::{Base, Slot, Value};
pub use builder::{
	ActivityMut, ActorMut, BaseMut, Builder, ContentMut, Input, LinkMut, ObjectMut,
	PlaceMut, PossibleAnswerMut, QuestionMut, SetOpts,
};
pub use error::{Error, Result};
pub use langval::LanguageValue;
pub use link::Link;
pub use object::{
	Activity, Actor, Collection, CollectionBuilder, CollectionMut, Content, Kind,
	Object, Place, PossibleAnswer, Question, Typed, View,
};
pub use reasoner::Reasoner;
pub use store::{Store, StoreRef, Term, Triple};

use vocab::as2;

/// Shared context for everything built from it: one reasoner instance and
/// the preferred language for `"*"` lookups. Cloning is cheap and clones
/// share the reasoner, so vocabulary extensions are visible everywhere.
#[derive(Debug, Clone)]
pub struct Env {
	reasoner: Rc<RefCell<Reasoner>>,
	language: Option<String>,
}

impl Default for Env {
	fn default() -> Self {
		Self::new()
	}
}

impl Env {
	/// Default ontology, preferred language taken from `$LANG`.
	pub fn new() -> Self {
		Env {
			reasoner: Rc::new(RefCell::new(Reasoner::new())),
			language: system_language(),
		}
	}

	pub fn with_language(lang: impl Into<String>) -> Self {
		Env {
			reasoner: Rc::new(RefCell::new(Reasoner::new())),
			language: Some(lang.into()),
		}
	}

	pub fn language(&self) -> Option<&str> {
		self.language.as_deref()
	}

	pub fn set_language(&mut self, lang: Option<&str>) {
		self.language = lang.map(str::to_string);
	}

	pub(crate) fn reasoner(&self) -> Ref<'_, Reasoner> {
		self.reasoner.borrow()
	}

	/// Mutable access for vocabulary extension. Hold the guard only while
	/// declaring axioms.
	pub fn reasoner_mut(&self) -> RefMut<'_, Reasoner> {
		self.reasoner.borrow_mut()
	}

	/// Parse a JSON document into a fresh graph and project its root node.
	pub fn import(&self, doc: &serde_json::Value) -> Result<Typed> {
		jsonld::import(self, doc)
	}

	/// Parse a serialized document.
	pub fn import_str(&self, doc: &str) -> Result<Typed> {
		let json: serde_json::Value =
			serde_json::from_str(doc).map_err(|e| Error::Import(e.to_string()))?;
		self.import(&json)
	}

	// collection factories commit to a shape up front, so they get their
	// own builder type rather than going through the macro below

	pub fn collection(&self) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::COLLECTION, &[], false)
	}

	pub fn collection_ext(&self, types: &[&str]) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::COLLECTION, types, false)
	}

	pub fn album(&self) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::ALBUM, &[], false)
	}

	pub fn album_ext(&self, types: &[&str]) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::ALBUM, types, false)
	}

	pub fn folder(&self) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::FOLDER, &[], false)
	}

	pub fn folder_ext(&self, types: &[&str]) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::FOLDER, types, false)
	}

	pub fn ordered_collection(&self) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::ORDERED_COLLECTION, &[], true)
	}

	pub fn ordered_collection_ext(&self, types: &[&str]) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::ORDERED_COLLECTION, types, true)
	}

	pub fn story(&self) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::STORY, &[], true)
	}

	pub fn story_ext(&self, types: &[&str]) -> CollectionBuilder {
		CollectionBuilder::with_types(self.clone(), as2::STORY, types, true)
	}
}

/// Preferred language from the process locale: `en_US.UTF-8` reads as
/// `en-US`; the `C` and `POSIX` locales count as unset.
fn system_language() -> Option<String> {
	let raw = std::env::var("LANG").ok()?;
	let code = raw.split('.').next().unwrap_or_default().trim();
	if code.is_empty() || code == "C" || code == "POSIX" {
		return None;
	}
	Some(code.replace('_', "-"))
}

/// One factory per vocabulary class: `env.note()` starts a builder typed
/// `Note`, `env.note_ext(&["ext:Poem"])` adds caller types, dropping the
/// base class when an extra already subsumes it.
macro_rules! factories {
	($($name:ident => $class:expr),* $(,)?) => {
		impl Env {
			$(
				pub fn $name(&self) -> Builder {
					Builder::with_types(self.clone(), &[$class])
				}

				paste::paste! {
					pub fn [<$name _ext>](&self, types: &[&str]) -> Builder {
						Builder::with_types_ext(self.clone(), $class, types)
					}
				}
			)*
		}
	};
}

factories! {
	object => as2::OBJECT,
	activity => as2::ACTIVITY,
	intransitive_activity => as2::INTRANSITIVE_ACTIVITY,
	actor => as2::ACTOR,
	content => as2::CONTENT,
	event => as2::EVENT,
	link => as2::LINK,
	mention => as2::MENTION,
	place => as2::PLACE,
	question => as2::QUESTION,
	possible_answer => as2::POSSIBLE_ANSWER,
	// activities
	accept => as2::ACCEPT,
	tentative_accept => as2::TENTATIVE_ACCEPT,
	add => as2::ADD,
	arrive => as2::ARRIVE,
	create => as2::CREATE,
	delete => as2::DELETE,
	favorite => as2::FAVORITE,
	follow => as2::FOLLOW,
	ignore => as2::IGNORE,
	join => as2::JOIN,
	leave => as2::LEAVE,
	like => as2::LIKE,
	offer => as2::OFFER,
	connect => as2::CONNECT,
	friend_request => as2::FRIEND_REQUEST,
	give => as2::GIVE,
	invite => as2::INVITE,
	post => as2::POST,
	reject => as2::REJECT,
	tentative_reject => as2::TENTATIVE_REJECT,
	remove => as2::REMOVE,
	review => as2::REVIEW,
	save => as2::SAVE,
	share => as2::SHARE,
	undo => as2::UNDO,
	update => as2::UPDATE,
	experience => as2::EXPERIENCE,
	view => as2::VIEW,
	watch => as2::WATCH,
	listen => as2::LISTEN,
	read => as2::READ,
	respond => as2::RESPOND,
	move_to => as2::MOVE,
	travel => as2::TRAVEL,
	announce => as2::ANNOUNCE,
	block => as2::BLOCK,
	flag => as2::FLAG,
	dislike => as2::DISLIKE,
	confirm => as2::CONFIRM,
	assign => as2::ASSIGN,
	complete => as2::COMPLETE,
	achieve => as2::ACHIEVE,
	reservation => as2::RESERVATION,
	// actors
	application => as2::APPLICATION,
	device => as2::DEVICE,
	group => as2::GROUP,
	organization => as2::ORGANIZATION,
	person => as2::PERSON,
	process => as2::PROCESS,
	role => as2::ROLE,
	service => as2::SERVICE,
	// content
	article => as2::ARTICLE,
	document => as2::DOCUMENT,
	audio => as2::AUDIO,
	image => as2::IMAGE,
	video => as2::VIDEO,
	note => as2::NOTE,
	page => as2::PAGE,
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn factories_type_their_builders() {
		let env = Env::with_language("en");
		assert_eq!(env.note().get().types(), vec![as2::NOTE.to_string()]);
		assert_eq!(env.person().get().kind(), Kind::Actor);
		assert_eq!(env.move_to().get().types(), vec![as2::MOVE.to_string()]);
	}

	#[test]
	fn env_clones_share_one_reasoner() {
		let env = Env::with_language("en");
		let clone = env.clone();
		env.reasoner_mut()
			.subclass("https://ns.example.org/pets#Librarian", &[as2::PERSON]);
		let who = clone.object_ext(&["https://ns.example.org/pets#Librarian"]).get();
		assert_eq!(who.kind(), Kind::Actor);
	}

	#[test]
	fn language_preference_drives_wildcard_reads() {
		let env = Env::with_language("fr");
		let note = env
			.note()
			.content("hello", Some("en"))
			.content("bonjour", Some("fr"))
			.get();
		assert_eq!(note.content().get("*"), Some("bonjour"));
	}
}
