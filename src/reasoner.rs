//! Ontology store and closure queries.
//!
//! The reasoner keeps class subsumption, property subsumption and property
//! characteristics as plain triples in its own [`Store`] and answers the
//! small set of entailment questions the wrappers and builders need. It is
//! not a general inference engine: no rule application, no materialization,
//! just transitive closure walks over the axiom graph.

use std::collections::{HashMap, HashSet};

use crate::store::{Store, Term, Triple};
use crate::vocab::{as2, asx, owl, rdf, rdfs, xsd};

#[derive(Debug)]
pub struct Reasoner {
	store: Store,
	prefixes: HashMap<String, String>,
}

impl Default for Reasoner {
	fn default() -> Self {
		Self::new()
	}
}

impl Reasoner {
	/// A reasoner preloaded with the Activity Streams ontology.
	pub fn new() -> Self {
		let mut reasoner = Reasoner { store: Store::new(), prefixes: HashMap::new() };
		reasoner.load_default_ontology();
		reasoner
	}

	/// Register a prefix usable in later axiom declarations.
	pub fn declare(&mut self, prefix: &str, ns: &str) -> &mut Self {
		self.prefixes.insert(prefix.to_string(), ns.to_string());
		self
	}

	fn expand(&self, name: &str) -> String {
		if let Some((prefix, rest)) = name.split_once(':') {
			if let Some(ns) = self.prefixes.get(prefix) {
				return format!("{ns}{rest}");
			}
		}
		name.to_string()
	}

	/// Add one axiom triple. The ontology stays open: applications may
	/// register custom vocabulary terms at any point.
	pub fn add(&mut self, subject: &str, predicate: &str, object: &str) -> &mut Self {
		assert!(
			subject.contains(':'),
			"axiom subject must be an IRI, got {subject:?}"
		);
		let (s, p, o) = (self.expand(subject), self.expand(predicate), self.expand(object));
		self.store.add(Triple::new(s, p, Term::Iri(o)));
		self
	}

	pub fn add_many<'a>(
		&mut self,
		axioms: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
	) -> &mut Self {
		for (s, p, o) in axioms {
			self.add(s, p, o);
		}
		self
	}

	/// Declare `class` a subclass of every listed parent.
	pub fn subclass(&mut self, class: &str, parents: &[&str]) -> &mut Self {
		for parent in parents {
			self.add(class, rdfs::SUB_CLASS_OF, parent);
		}
		self
	}

	/// Declare property characteristics for `property`.
	pub fn property(&mut self, property: &str, characteristics: &[&str]) -> &mut Self {
		for c in characteristics {
			self.add(property, rdf::TYPE, c);
		}
		self
	}

	// --- closure queries ---------------------------------------------------

	fn closure(&self, start: &str, edge: &str, inverse: bool) -> Vec<String> {
		let mut seen: HashSet<String> = HashSet::new();
		let mut out = Vec::new();
		let mut stack = vec![start.to_string()];
		while let Some(current) = stack.pop() {
			if !seen.insert(current.clone()) {
				continue;
			}
			let next: Vec<String> = if inverse {
				self.store
					.find(None, Some(edge), Some(&Term::Iri(current.clone())))
					.map(|t| t.subject.clone())
					.collect()
			} else {
				self.store
					.find(Some(&current), Some(edge), None)
					.filter_map(|t| t.object.id().map(str::to_string))
					.collect()
			};
			out.push(current);
			stack.extend(next);
		}
		out
	}

	/// Ancestor closure over `subClassOf`, self included.
	pub fn class_hierarchy(&self, subject: &str) -> Vec<String> {
		self.closure(subject, rdfs::SUB_CLASS_OF, false)
	}

	/// Ancestor closure over `subPropertyOf`, self included.
	pub fn property_hierarchy(&self, subject: &str) -> Vec<String> {
		self.closure(subject, rdfs::SUB_PROPERTY_OF, false)
	}

	/// All classes entailed to be subclasses of `subject`, self included.
	pub fn descendant_classes_of(&self, subject: &str) -> Vec<String> {
		self.closure(subject, rdfs::SUB_CLASS_OF, true)
	}

	/// All properties entailed to be subproperties of `subject`, self included.
	pub fn descendant_properties_of(&self, subject: &str) -> Vec<String> {
		self.closure(subject, rdfs::SUB_PROPERTY_OF, true)
	}

	/// Reflexive, transitive subclass test following every parent branch.
	pub fn is_subclass_of(&self, subject: &str, target: &str) -> bool {
		subject == target || self.class_hierarchy(subject).iter().any(|c| c == target)
	}

	/// Subclass test over a set of declared types.
	pub fn any_subclass_of(&self, subjects: &[String], target: &str) -> bool {
		subjects.iter().any(|s| self.is_subclass_of(s, target))
	}

	pub fn is_subproperty_of(&self, subject: &str, target: &str) -> bool {
		subject == target || self.property_hierarchy(subject).iter().any(|p| p == target)
	}

	// --- characteristic queries --------------------------------------------

	fn has_type(&self, subject: &str, characteristic: &str) -> bool {
		self.store
			.find(Some(subject), Some(rdf::TYPE), Some(&Term::Iri(characteristic.to_string())))
			.next()
			.is_some()
	}

	pub fn is_object_property(&self, subject: &str) -> bool {
		self.has_type(subject, owl::OBJECT_PROPERTY)
	}

	pub fn is_functional(&self, subject: &str) -> bool {
		self.has_type(subject, owl::FUNCTIONAL_PROPERTY)
	}

	pub fn is_deprecated(&self, subject: &str) -> bool {
		self.has_type(subject, owl::DEPRECATED_PROPERTY)
	}

	pub fn is_language_property(&self, subject: &str) -> bool {
		self.has_type(subject, asx::LANGUAGE_PROPERTY)
	}

	pub fn is_number(&self, subject: &str) -> bool {
		self.is_subclass_of(subject, asx::NUMBER)
	}

	pub fn is_date(&self, subject: &str) -> bool {
		self.is_subclass_of(subject, asx::DATE)
	}

	pub fn is_boolean(&self, subject: &str) -> bool {
		self.is_subclass_of(subject, asx::BOOLEAN)
	}

	pub fn is_link(&self, subject: &str) -> bool {
		self.is_subclass_of(subject, as2::LINK)
	}

	pub fn is_object(&self, subject: &str) -> bool {
		!self.is_link(subject)
	}

	pub fn is_intransitive(&self, subject: &str) -> bool {
		self.is_subclass_of(subject, as2::INTRANSITIVE_ACTIVITY)
	}

	/// True when the axiom store mentions `subject` as a subject at all.
	pub fn is_known(&self, subject: &str) -> bool {
		self.store.count_subject(subject) > 0
	}

	// --- default ontology --------------------------------------------------

	fn load_default_ontology(&mut self) {
		// datatype groupings driving value coercion
		for number in [
			xsd::FLOAT, xsd::DECIMAL, xsd::DOUBLE, xsd::INTEGER,
			xsd::NON_POSITIVE_INTEGER, xsd::LONG, xsd::NON_NEGATIVE_INTEGER,
			xsd::NEGATIVE_INTEGER, xsd::INT, xsd::UNSIGNED_LONG,
			xsd::POSITIVE_INTEGER, xsd::SHORT, xsd::UNSIGNED_INT, xsd::BYTE,
			xsd::UNSIGNED_SHORT, xsd::UNSIGNED_BYTE,
		] {
			self.subclass(number, &[asx::NUMBER]);
		}
		self.subclass(xsd::DATE_TIME, &[asx::DATE]);
		self.subclass(xsd::DATE, &[asx::DATE]);
		self.subclass(xsd::BOOLEAN, &[asx::BOOLEAN]);

		// class forest
		self.subclass(as2::ACCEPT, &[as2::RESPOND]);
		self.subclass(as2::ACTIVITY, &[as2::OBJECT]);
		self.subclass(as2::BLOCK, &[as2::IGNORE]);
		self.subclass(as2::INTRANSITIVE_ACTIVITY, &[as2::ACTIVITY]);
		self.subclass(as2::ACTOR, &[as2::OBJECT]);
		self.subclass(as2::ACHIEVE, &[as2::OBJECT]);
		self.subclass(as2::ADD, &[as2::ACTIVITY]);
		self.subclass(as2::ALBUM, &[as2::COLLECTION]);
		self.subclass(as2::ANNOUNCE, &[as2::ACTIVITY]);
		self.subclass(as2::APPLICATION, &[as2::ACTOR]);
		self.subclass(as2::ARRIVE, &[as2::INTRANSITIVE_ACTIVITY]);
		self.subclass(as2::ARTICLE, &[as2::CONTENT]);
		self.subclass(as2::ASSIGN, &[as2::ACTIVITY]);
		self.subclass(as2::AUDIO, &[as2::DOCUMENT]);
		self.subclass(as2::BROWSER_VIEW, &[as2::ACTIVITY_HANDLER, as2::LINK]);
		self.subclass(as2::COLLECTION, &[as2::OBJECT]);
		self.subclass(as2::COMPLETE, &[as2::ACTIVITY]);
		self.subclass(as2::CONFIRM, &[as2::RESPOND]);
		self.subclass(as2::CONNECT, &[as2::ACTIVITY]);
		self.subclass(as2::CONTENT, &[as2::OBJECT]);
		self.subclass(as2::CREATE, &[as2::ACTIVITY]);
		self.subclass(as2::DELETE, &[as2::ACTIVITY]);
		self.subclass(as2::DEVICE, &[as2::ACTOR]);
		self.subclass(as2::DISLIKE, &[as2::RESPOND]);
		self.subclass(as2::DOCUMENT, &[as2::CONTENT]);
		self.subclass(as2::EMBEDDED_VIEW, &[as2::ACTIVITY_HANDLER, as2::CONTENT]);
		self.subclass(as2::EVENT, &[as2::OBJECT]);
		self.subclass(as2::FAVORITE, &[as2::RESPOND]);
		self.subclass(as2::FLAG, &[as2::RESPOND]);
		self.subclass(as2::FOLDER, &[as2::COLLECTION]);
		self.subclass(as2::FOLLOW, &[as2::ACTIVITY]);
		self.subclass(as2::FRIEND_REQUEST, &[as2::CONNECT]);
		self.subclass(as2::GIVE, &[as2::OFFER]);
		self.subclass(as2::GROUP, &[as2::ACTOR]);
		self.subclass(as2::HTTP_REQUEST, &[as2::ACTIVITY_HANDLER, as2::LINK]);
		self.subclass(as2::IGNORE, &[as2::RESPOND]);
		self.subclass(as2::IMAGE, &[as2::DOCUMENT]);
		self.subclass(as2::INVITE, &[as2::OFFER]);
		self.subclass(as2::JOIN, &[as2::ACTIVITY]);
		self.subclass(as2::LEAVE, &[as2::ACTIVITY]);
		self.subclass(as2::LIKE, &[as2::RESPOND]);
		self.subclass(as2::EXPERIENCE, &[as2::ACTIVITY]);
		self.subclass(as2::VIEW, &[as2::EXPERIENCE]);
		self.subclass(as2::WATCH, &[as2::VIEW]);
		self.subclass(as2::LISTEN, &[as2::EXPERIENCE]);
		self.subclass(as2::READ, &[as2::VIEW]);
		self.subclass(as2::RESERVATION, &[as2::ACTIVITY]);
		self.subclass(as2::RESPOND, &[as2::ACTIVITY]);
		self.subclass(as2::MOVE, &[as2::ACTIVITY]);
		self.subclass(as2::TRAVEL, &[as2::INTRANSITIVE_ACTIVITY]);
		self.subclass(as2::MENTION, &[as2::LINK]);
		self.subclass(as2::NOTE, &[as2::CONTENT]);
		self.subclass(as2::OFFER, &[as2::ACTIVITY]);
		self.subclass(as2::ORDERED_COLLECTION, &[as2::COLLECTION]);
		self.subclass(as2::ORGANIZATION, &[as2::ACTOR]);
		self.subclass(as2::PAGE, &[as2::CONTENT]);
		self.subclass(as2::PERSON, &[as2::ACTOR]);
		self.subclass(as2::PLACE, &[as2::OBJECT]);
		self.subclass(as2::POSSIBLE_ANSWER, &[as2::CONTENT]);
		self.subclass(as2::POST, &[as2::ACTIVITY]);
		self.subclass(as2::PROCESS, &[as2::ACTOR]);
		self.subclass(as2::QUESTION, &[as2::CONTENT, as2::INTRANSITIVE_ACTIVITY]);
		self.subclass(as2::REJECT, &[as2::RESPOND]);
		self.subclass(as2::REMOVE, &[as2::ACTIVITY]);
		self.subclass(as2::REVIEW, &[as2::RESPOND]);
		self.subclass(as2::ROLE, &[as2::ACTOR]);
		self.subclass(as2::SAVE, &[as2::ACTIVITY]);
		self.subclass(as2::SERVICE, &[as2::ACTOR]);
		self.subclass(as2::SHARE, &[as2::ACTIVITY]);
		self.subclass(as2::STORY, &[as2::ORDERED_COLLECTION]);
		self.subclass(as2::TENTATIVE_ACCEPT, &[as2::ACCEPT]);
		self.subclass(as2::TENTATIVE_REJECT, &[as2::REJECT]);
		self.subclass(as2::UNDO, &[as2::ACTIVITY]);
		self.subclass(as2::VIDEO, &[as2::DOCUMENT]);
		self.subclass(as2::UPDATE, &[as2::ACTIVITY]);

		// property characteristics
		let object = &[owl::OBJECT_PROPERTY][..];
		let functional_object = &[owl::OBJECT_PROPERTY, owl::FUNCTIONAL_PROPERTY][..];
		let datatype = &[owl::DATATYPE_PROPERTY][..];
		let functional_datatype = &[owl::DATATYPE_PROPERTY, owl::FUNCTIONAL_PROPERTY][..];
		let deprecated_object = &[owl::OBJECT_PROPERTY, owl::DEPRECATED_PROPERTY][..];
		let deprecated_datatype = &[owl::DATATYPE_PROPERTY, owl::DEPRECATED_PROPERTY][..];
		let deprecated_functional_datatype =
			&[owl::DATATYPE_PROPERTY, owl::FUNCTIONAL_PROPERTY, owl::DEPRECATED_PROPERTY][..];
		let language = &[owl::DATATYPE_PROPERTY, asx::LANGUAGE_PROPERTY][..];

		self.property(rdf::FIRST, functional_object);
		self.property(rdf::REST, functional_object);
		for prop in [
			as2::ACTION, as2::ACTOR_PROP, as2::ACTOR_OF, as2::ATTRIBUTED_TO,
			as2::ATTRIBUTED_WITH, as2::ATTACHED_TO, as2::ATTACHMENT, as2::BCC,
			as2::BTO, as2::CC, as2::CONTEXT, as2::CONTEXT_OF, as2::GENERATOR,
			as2::GENERATOR_OF, as2::HANDLER_FOR, as2::HAS_EXPECTED_INPUT,
			as2::HAS_POTENTIAL_RESULT, as2::HAS_PREFERENCE, as2::HAS_REQUIREMENT,
			as2::ICON, as2::ICON_FOR, as2::IMAGE_PROP, as2::IMAGE_OF,
			as2::IN_REPLY_TO, as2::ITEMS, as2::LOCATION, as2::LOCATION_OF,
			as2::MEMBER_OF, as2::OBJECT_PROP, as2::OBJECT_OF, as2::ONE_OF,
			as2::ANY_OF, as2::PARAMETER, as2::PREVIEW, as2::PREVIEW_OF,
			as2::PROVIDER, as2::PROVIDER_OF, as2::REPLIES, as2::RESULT,
			as2::RESULT_OF, as2::ROLE_PROP, as2::SCOPE, as2::SCOPE_OF,
			as2::SHAPE, as2::TAG, as2::TAG_OF, as2::TARGET, as2::TARGET_OF,
			as2::ORIGIN, as2::ORIGIN_OF, as2::TO, as2::URL, as2::USING,
		] {
			self.property(prop, object);
		}
		for prop in [as2::CURRENT, as2::FIRST, as2::HREF_TEMPLATE, as2::LAST,
			as2::NEXT, as2::PREV, as2::SELF]
		{
			self.property(prop, functional_object);
		}
		for prop in [as2::ATTACHMENTS, as2::AUTHOR, as2::AUTHOR_OF, as2::TAGS] {
			self.property(prop, deprecated_object);
		}
		for prop in [
			as2::ACCURACY, as2::ALIAS, as2::ALTITUDE, as2::BROWSER_CONTEXT,
			as2::CONFIRM_PROP, as2::DURATION, as2::END_TIME, as2::HEIGHT,
			as2::HREF, as2::HREFLANG, as2::ITEMS_PER_PAGE, as2::LATITUDE,
			as2::LONGITUDE, as2::MEDIA_TYPE, as2::METHOD, as2::NAME,
			as2::PRIORITY, as2::PUBLISHED, as2::RADIUS, as2::RATING,
			as2::OPTIONAL, as2::SANDBOX, as2::START_INDEX, as2::START_TIME,
			as2::TEMPLATE, as2::TOTAL_ITEMS, as2::UNITS, as2::UPDATED,
			as2::WIDTH,
		] {
			self.property(prop, functional_datatype);
		}
		self.property(as2::REL, datatype);
		for prop in [as2::DOWNSTREAM_DUPLICATES, as2::UPSTREAM_DUPLICATES] {
			self.property(prop, deprecated_datatype);
		}
		for prop in [as2::ID, as2::OBJECT_TYPE, as2::VERB] {
			self.property(prop, deprecated_functional_datatype);
		}
		for prop in [as2::CONTENT_PROP, as2::DISPLAY_NAME, as2::SUMMARY, as2::TITLE] {
			self.property(prop, language);
		}
		self.property(as2::HTTP_HEADER, &[owl::CLASS]);

		// property subsumption
		self.add(as2::ACTOR_PROP, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_TO);
		self.add(as2::ACTOR_OF, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_WITH);
		self.add(as2::AUTHOR, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_TO);
		self.add(as2::AUTHOR_OF, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_WITH);
		self.add(as2::RESULT, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_WITH);
		self.add(as2::RESULT_OF, rdfs::SUB_PROPERTY_OF, as2::ATTRIBUTED_TO);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn subsumption_is_reflexive() {
		let r = Reasoner::new();
		for class in [as2::OBJECT, as2::QUESTION, as2::WATCH, "urn:never-declared:X"] {
			assert!(r.is_subclass_of(class, class), "{class} should subsume itself");
		}
	}

	#[test]
	fn subsumption_is_transitive_across_the_verb_chain() {
		let r = Reasoner::new();
		assert!(r.is_subclass_of(as2::WATCH, as2::VIEW));
		assert!(r.is_subclass_of(as2::WATCH, as2::EXPERIENCE));
		assert!(r.is_subclass_of(as2::WATCH, as2::ACTIVITY));
		assert!(r.is_subclass_of(as2::WATCH, as2::OBJECT));
		assert!(!r.is_subclass_of(as2::WATCH, as2::COLLECTION));
	}

	#[test]
	fn multi_parent_classes_reach_every_branch() {
		let r = Reasoner::new();
		assert!(r.is_subclass_of(as2::QUESTION, as2::CONTENT));
		assert!(r.is_subclass_of(as2::QUESTION, as2::INTRANSITIVE_ACTIVITY));
		assert!(r.is_subclass_of(as2::QUESTION, as2::ACTIVITY));
		assert!(r.is_intransitive(as2::QUESTION));
	}

	#[test]
	fn unknown_iris_answer_false_rather_than_erroring() {
		let r = Reasoner::new();
		assert!(!r.is_subclass_of("urn:x:Nothing", as2::OBJECT));
		assert!(!r.is_object_property("urn:x:nothing"));
		assert!(!r.is_known("urn:x:nothing"));
	}

	#[test]
	fn cycles_in_user_axioms_terminate() {
		let mut r = Reasoner::new();
		r.add("urn:x:A", rdfs::SUB_CLASS_OF, "urn:x:B");
		r.add("urn:x:B", rdfs::SUB_CLASS_OF, "urn:x:A");
		assert!(r.is_subclass_of("urn:x:A", "urn:x:B"));
		assert!(r.is_subclass_of("urn:x:B", "urn:x:A"));
		assert!(!r.is_subclass_of("urn:x:A", as2::OBJECT));
	}

	#[test]
	fn property_characteristics_answer_membership() {
		let r = Reasoner::new();
		assert!(r.is_object_property(as2::ACTOR_PROP));
		assert!(!r.is_object_property(as2::CONTENT_PROP));
		assert!(r.is_functional(as2::RATING));
		assert!(!r.is_functional(as2::TAG));
		assert!(r.is_language_property(as2::CONTENT_PROP));
		assert!(r.is_deprecated(as2::VERB));
		assert!(r.is_functional(as2::VERB));
	}

	#[test]
	fn coercion_marker_classes_cover_the_xsd_types() {
		let r = Reasoner::new();
		assert!(r.is_number(xsd::FLOAT));
		assert!(r.is_number(xsd::NON_NEGATIVE_INTEGER));
		assert!(r.is_date(xsd::DATE_TIME));
		assert!(r.is_boolean(xsd::BOOLEAN));
		assert!(!r.is_number(xsd::STRING));
	}

	#[test]
	fn property_subsumption_follows_declared_axioms() {
		let r = Reasoner::new();
		assert!(r.is_subproperty_of(as2::ACTOR_PROP, as2::ATTRIBUTED_TO));
		assert!(r.is_subproperty_of(as2::ACTOR_PROP, as2::ACTOR_PROP));
		assert!(!r.is_subproperty_of(as2::ATTRIBUTED_TO, as2::ACTOR_PROP));
	}

	#[test]
	fn descendant_closures_walk_the_inverse_direction() {
		let r = Reasoner::new();
		let views = r.descendant_classes_of(as2::VIEW);
		assert!(views.contains(&as2::WATCH.to_string()));
		assert!(views.contains(&as2::READ.to_string()));
		assert!(!views.contains(&as2::LISTEN.to_string()));
		let attributed = r.descendant_properties_of(as2::ATTRIBUTED_TO);
		assert!(attributed.contains(&as2::ACTOR_PROP.to_string()));
	}

	#[test]
	fn custom_vocabulary_extends_the_ontology_after_construction() {
		let mut r = Reasoner::new();
		r.declare("ex", "https://example.org/vocab#");
		r.add("ex:Boost", rdfs::SUB_CLASS_OF, "ex:Share");
		r.add("ex:Share", rdfs::SUB_CLASS_OF, as2::ANNOUNCE);
		assert!(r.is_subclass_of("https://example.org/vocab#Boost", as2::ACTIVITY));
		assert!(r.is_known("https://example.org/vocab#Boost"));
	}
}
