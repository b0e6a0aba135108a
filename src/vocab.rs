//! Vocabulary constants and the fixed default context.
//!
//! Each namespace is a module of full-IRI constants plus a `TERMS` table
//! mapping short names to IRIs. The Activity Streams table doubles as the
//! compaction context for the JSON boundary.

macro_rules! terms {
	($base:literal : $($konst:ident = $term:literal),* $(,)?) => {
		pub const NS: &str = $base;
		$(pub const $konst: &str = concat!($base, $term);)*
		/// (short name, full IRI) pairs for every term in this namespace.
		pub const TERMS: &[(&str, &str)] = &[$(($term, $konst)),*];
	};
}

/// RDF core terms.
pub mod rdf {
	terms! { "http://www.w3.org/1999/02/22-rdf-syntax-ns#":
		TYPE = "type",
		FIRST = "first",
		REST = "rest",
		NIL = "nil",
		LANG_STRING = "langString",
	}
}

/// RDFS terms used by the ontology axioms.
pub mod rdfs {
	terms! { "http://www.w3.org/2000/01/rdf-schema#":
		SUB_CLASS_OF = "subClassOf",
		SUB_PROPERTY_OF = "subPropertyOf",
	}
}

/// OWL property characteristics.
pub mod owl {
	terms! { "http://www.w3.org/2002/07/owl#":
		CLASS = "Class",
		OBJECT_PROPERTY = "ObjectProperty",
		DATATYPE_PROPERTY = "DatatypeProperty",
		FUNCTIONAL_PROPERTY = "FunctionalProperty",
		DEPRECATED_PROPERTY = "DeprecatedProperty",
	}
}

/// XSD datatypes.
pub mod xsd {
	terms! { "http://www.w3.org/2001/XMLSchema#":
		STRING = "string",
		BOOLEAN = "boolean",
		DATE = "date",
		TIME = "time",
		DATE_TIME = "dateTime",
		DURATION = "duration",
		FLOAT = "float",
		DOUBLE = "double",
		DECIMAL = "decimal",
		INTEGER = "integer",
		NON_POSITIVE_INTEGER = "nonPositiveInteger",
		NEGATIVE_INTEGER = "negativeInteger",
		NON_NEGATIVE_INTEGER = "nonNegativeInteger",
		POSITIVE_INTEGER = "positiveInteger",
		LONG = "long",
		INT = "int",
		SHORT = "short",
		BYTE = "byte",
		UNSIGNED_LONG = "unsignedLong",
		UNSIGNED_INT = "unsignedInt",
		UNSIGNED_SHORT = "unsignedShort",
		UNSIGNED_BYTE = "unsignedByte",
		ANY_URI = "anyURI",
	}
}

/// Extension namespace grouping datatypes for value coercion and marking
/// language-mapped properties.
pub mod asx {
	terms! { "https://ns.asgraph.dev/asx#":
		NUMBER = "Number",
		DATE = "Date",
		BOOLEAN = "Boolean",
		LANGUAGE_PROPERTY = "LanguageProperty",
	}
}

/// The Activity Streams vocabulary: classes first, then properties.
pub mod as2 {
	terms! { "https://www.w3.org/ns/activitystreams#":
		// core classes
		OBJECT = "Object",
		LINK = "Link",
		ACTIVITY = "Activity",
		INTRANSITIVE_ACTIVITY = "IntransitiveActivity",
		ACTOR = "Actor",
		COLLECTION = "Collection",
		ORDERED_COLLECTION = "OrderedCollection",
		CONTENT = "Content",
		PLACE = "Place",
		QUESTION = "Question",
		POSSIBLE_ANSWER = "PossibleAnswer",
		EVENT = "Event",
		// activity classes
		ACCEPT = "Accept",
		TENTATIVE_ACCEPT = "TentativeAccept",
		ADD = "Add",
		ARRIVE = "Arrive",
		CREATE = "Create",
		DELETE = "Delete",
		FAVORITE = "Favorite",
		FOLLOW = "Follow",
		IGNORE = "Ignore",
		JOIN = "Join",
		LEAVE = "Leave",
		LIKE = "Like",
		OFFER = "Offer",
		CONNECT = "Connect",
		FRIEND_REQUEST = "FriendRequest",
		GIVE = "Give",
		INVITE = "Invite",
		POST = "Post",
		REJECT = "Reject",
		TENTATIVE_REJECT = "TentativeReject",
		REMOVE = "Remove",
		REVIEW = "Review",
		SAVE = "Save",
		SHARE = "Share",
		UNDO = "Undo",
		UPDATE = "Update",
		EXPERIENCE = "Experience",
		VIEW = "View",
		WATCH = "Watch",
		LISTEN = "Listen",
		READ = "Read",
		RESPOND = "Respond",
		MOVE = "Move",
		TRAVEL = "Travel",
		ANNOUNCE = "Announce",
		BLOCK = "Block",
		FLAG = "Flag",
		DISLIKE = "Dislike",
		CONFIRM = "Confirm",
		ASSIGN = "Assign",
		COMPLETE = "Complete",
		ACHIEVE = "Achieve",
		RESERVATION = "Reservation",
		// actor classes
		APPLICATION = "Application",
		DEVICE = "Device",
		GROUP = "Group",
		ORGANIZATION = "Organization",
		PERSON = "Person",
		PROCESS = "Process",
		ROLE = "Role",
		SERVICE = "Service",
		// content classes
		ARTICLE = "Article",
		DOCUMENT = "Document",
		AUDIO = "Audio",
		IMAGE = "Image",
		VIDEO = "Video",
		NOTE = "Note",
		PAGE = "Page",
		// collection classes
		ALBUM = "Album",
		FOLDER = "Folder",
		STORY = "Story",
		// link classes
		MENTION = "Mention",
		// action-handler classes
		ACTIVITY_HANDLER = "ActivityHandler",
		BROWSER_VIEW = "BrowserView",
		EMBEDDED_VIEW = "EmbeddedView",
		HTTP_REQUEST = "HttpRequest",
		HTTP_HEADER = "HttpHeader",
		// object properties
		ACTION = "action",
		ACTOR_PROP = "actor",
		ACTOR_OF = "actorOf",
		ATTRIBUTED_TO = "attributedTo",
		ATTRIBUTED_WITH = "attributedWith",
		ATTACHED_TO = "attachedTo",
		ATTACHMENT = "attachment",
		ATTACHMENTS = "attachments",
		AUTHOR = "author",
		AUTHOR_OF = "authorOf",
		BCC = "bcc",
		BTO = "bto",
		CC = "cc",
		CONTEXT = "context",
		CONTEXT_OF = "contextOf",
		CURRENT = "current",
		FIRST = "first",
		GENERATOR = "generator",
		GENERATOR_OF = "generatorOf",
		HANDLER_FOR = "handlerFor",
		HAS_EXPECTED_INPUT = "hasExpectedInput",
		HAS_POTENTIAL_RESULT = "hasPotentialResult",
		HAS_PREFERENCE = "hasPreference",
		HAS_REQUIREMENT = "hasRequirement",
		HREF_TEMPLATE = "hreftemplate",
		ICON = "icon",
		ICON_FOR = "iconFor",
		IMAGE_PROP = "image",
		IMAGE_OF = "imageOf",
		IN_REPLY_TO = "inReplyTo",
		ITEMS = "items",
		LAST = "last",
		LOCATION = "location",
		LOCATION_OF = "locationOf",
		MEMBER_OF = "memberOf",
		NEXT = "next",
		OBJECT_PROP = "object",
		OBJECT_OF = "objectOf",
		ONE_OF = "oneOf",
		ANY_OF = "anyOf",
		PARAMETER = "parameter",
		PREV = "prev",
		PREVIEW = "preview",
		PREVIEW_OF = "previewOf",
		PROVIDER = "provider",
		PROVIDER_OF = "providerOf",
		REPLIES = "replies",
		RESULT = "result",
		RESULT_OF = "resultOf",
		ROLE_PROP = "role",
		SCOPE = "scope",
		SCOPE_OF = "scopeOf",
		SELF = "self",
		SHAPE = "shape",
		TAG = "tag",
		TAG_OF = "tagOf",
		TAGS = "tags",
		TARGET = "target",
		TARGET_OF = "targetOf",
		ORIGIN = "origin",
		ORIGIN_OF = "originOf",
		TO = "to",
		URL = "url",
		USING = "using",
		// datatype properties
		ACCURACY = "accuracy",
		ALIAS = "alias",
		ALTITUDE = "altitude",
		BROWSER_CONTEXT = "browserContext",
		CONFIRM_PROP = "confirm",
		CONTENT_PROP = "content",
		DISPLAY_NAME = "displayName",
		DOWNSTREAM_DUPLICATES = "downstreamDuplicates",
		DURATION = "duration",
		END_TIME = "endTime",
		HEIGHT = "height",
		HREF = "href",
		HREFLANG = "hreflang",
		ID = "id",
		ITEMS_PER_PAGE = "itemsPerPage",
		LATITUDE = "latitude",
		LONGITUDE = "longitude",
		MEDIA_TYPE = "mediaType",
		METHOD = "method",
		NAME = "name",
		OBJECT_TYPE = "objectType",
		OPTIONAL = "optional",
		PRIORITY = "priority",
		PUBLISHED = "published",
		RADIUS = "radius",
		RATING = "rating",
		REL = "rel",
		SANDBOX = "sandbox",
		START_INDEX = "startIndex",
		START_TIME = "startTime",
		SUMMARY = "summary",
		TEMPLATE = "template",
		TITLE = "title",
		TOTAL_ITEMS = "totalItems",
		UNITS = "units",
		UPDATED = "updated",
		UPSTREAM_DUPLICATES = "upstreamDuplicates",
		VERB = "verb",
		WIDTH = "width",
	}
}

/// Resolve a property or class reference to a full IRI.
///
/// Short names are looked up in the Activity Streams term table; anything
/// containing a scheme separator passes through untouched, as do unknown
/// bare names.
pub fn resolve(key: &str) -> String {
	if key.contains(':') {
		return key.to_string();
	}
	for (term, iri) in as2::TERMS {
		if *term == key {
			return (*iri).to_string();
		}
	}
	key.to_string()
}

/// Map an IRI back to its Activity Streams short name, when it has one.
pub fn compact(iri: &str) -> Option<&'static str> {
	let term = iri.strip_prefix(as2::NS)?;
	as2::TERMS
		.iter()
		.find(|(short, _)| *short == term)
		.map(|(short, _)| *short)
}

/// Datatype coercion hints from the fixed default context: properties whose
/// bare JSON values carry an implied datatype on import.
pub fn datatype_hint(iri: &str) -> Option<&'static str> {
	match iri {
		as2::PUBLISHED | as2::UPDATED | as2::START_TIME | as2::END_TIME => Some(xsd::DATE_TIME),
		as2::TOTAL_ITEMS | as2::ITEMS_PER_PAGE | as2::START_INDEX
		| as2::HEIGHT | as2::WIDTH => Some(xsd::NON_NEGATIVE_INTEGER),
		as2::RATING | as2::PRIORITY | as2::LATITUDE | as2::LONGITUDE
		| as2::ACCURACY | as2::ALTITUDE | as2::RADIUS => Some(xsd::FLOAT),
		_ => None,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn short_names_resolve_into_the_activitystreams_namespace() {
		assert_eq!(resolve("attributedTo"), as2::ATTRIBUTED_TO);
		assert_eq!(resolve("Question"), as2::QUESTION);
	}

	#[test]
	fn full_iris_and_unknown_names_pass_through() {
		assert_eq!(resolve(rdf::FIRST), rdf::FIRST);
		assert_eq!(resolve("ext:custom"), "ext:custom");
		assert_eq!(resolve("somethingElse"), "somethingElse");
	}

	#[test]
	fn compaction_inverts_resolution_for_known_terms() {
		assert_eq!(compact(as2::IN_REPLY_TO), Some("inReplyTo"));
		assert_eq!(compact(rdf::FIRST), None);
	}
}
