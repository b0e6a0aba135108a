//! Per-language literal variants.
//!
//! A language property never reads back as a plain array: its triples fold
//! into one [`LanguageValue`] keyed by BCP-47 tag, with an optional untagged
//! default. The `"*"` lookup performs content-negotiation style matching
//! against the configured default language.

/// A set of language-tagged string values plus one optional untagged default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageValue {
	default: Option<String>,
	values: Vec<(String, String)>,
	preferred: Option<String>,
}

impl LanguageValue {
	pub(crate) fn new(preferred: Option<String>) -> Self {
		LanguageValue { default: None, values: Vec::new(), preferred }
	}

	pub(crate) fn insert(&mut self, tag: Option<&str>, value: &str) {
		match tag {
			Some(tag) => self.values.push((tag.to_string(), value.to_string())),
			None => self.default = Some(value.to_string()),
		}
	}

	/// Look a value up by tag. `"*"` negotiates against the configured
	/// default language, falling back to the untagged default and then to
	/// the most tag-compatible entry.
	pub fn get(&self, tag: &str) -> Option<&str> {
		if tag == "*" {
			return self.star();
		}
		self.values
			.iter()
			.find(|(t, _)| t.eq_ignore_ascii_case(tag))
			.map(|(_, v)| v.as_str())
	}

	fn star(&self) -> Option<&str> {
		if let Some(wanted) = &self.preferred {
			if let Some((_, v)) = self.values.iter().find(|(t, _)| suitable(t, wanted)) {
				return Some(v);
			}
		}
		if let Some(def) = &self.default {
			return Some(def);
		}
		// no default: fall back to the first tagged entry
		self.values.first().map(|(_, v)| v.as_str())
	}

	/// The untagged default value, when one was set.
	pub fn default_value(&self) -> Option<&str> {
		self.default.as_deref()
	}

	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.values.iter().map(|(t, _)| t.as_str())
	}

	pub fn len(&self) -> usize {
		self.values.len() + usize::from(self.default.is_some())
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty() && self.default.is_none()
	}
}

impl std::fmt::Display for LanguageValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.get("*").unwrap_or_default())
	}
}

/// BCP-47 suitability: a tag serves a wanted range when their subtags agree
/// up to the length of the shorter one, so `en` serves `en-US` and `en-GB`
/// serves `en`.
fn suitable(tag: &str, wanted: &str) -> bool {
	let mut a = tag.split('-');
	let mut b = wanted.split('-');
	loop {
		match (a.next(), b.next()) {
			(Some(x), Some(y)) => {
				if !x.eq_ignore_ascii_case(y) {
					return false;
				}
			}
			_ => return true,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn value(preferred: &str) -> LanguageValue {
		LanguageValue::new(Some(preferred.to_string()))
	}

	#[test]
	fn exact_tag_lookup_is_case_insensitive() {
		let mut v = value("en");
		v.insert(Some("en-GB"), "colour");
		assert_eq!(v.get("EN-gb"), Some("colour"));
		assert_eq!(v.get("fr"), None);
	}

	#[test]
	fn wildcard_prefers_the_configured_language() {
		let mut v = value("en");
		v.insert(Some("fr"), "bonjour");
		v.insert(Some("en"), "hello");
		assert_eq!(v.get("*"), Some("hello"));
	}

	#[test]
	fn wildcard_matches_regional_variants_of_the_configured_language() {
		let mut v = value("en-US");
		v.insert(Some("fr"), "bonjour");
		v.insert(Some("en"), "hello");
		assert_eq!(v.get("*"), Some("hello"));
	}

	#[test]
	fn wildcard_falls_back_to_the_untagged_default() {
		let mut v = value("en");
		v.insert(Some("fr"), "bonjour");
		v.insert(None, "fallback");
		assert_eq!(v.get("*"), Some("fallback"));
	}

	#[test]
	fn wildcard_without_default_returns_the_most_compatible_entry() {
		let mut v = value("en");
		v.insert(Some("fr"), "bonjour");
		assert_eq!(v.get("*"), Some("bonjour"));
	}

	#[test]
	fn empty_value_reports_itself() {
		let v = LanguageValue::new(None);
		assert!(v.is_empty());
		assert_eq!(v.get("*"), None);
		assert_eq!(v.to_string(), "");
	}
}
