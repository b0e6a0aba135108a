//! Accessor and mutator generation for the typed view and builder traits.
//!
//! Every semantic property is one `getter!`/`setter!` line naming the IRI
//! constant and the coercion shape; the traits below stay declarative.

macro_rules! getter {
	($name:ident($iri:path) -> lang) => {
		fn $name(&self) -> $crate::LanguageValue {
			self.base().get($iri).lang()
		}
	};

	($name:ident($iri:path) -> str) => {
		fn $name(&self) -> Option<String> {
			self.base().get($iri).as_str()
		}
	};

	($name:ident($iri:path) -> f64) => {
		fn $name(&self) -> Option<f64> {
			self.base().get($iri).as_f64()
		}
	};

	($name:ident($iri:path) -> u64) => {
		fn $name(&self) -> Option<u64> {
			self.base().get($iri).as_u64()
		}
	};

	($name:ident($iri:path) -> date) => {
		fn $name(&self) -> Option<chrono::DateTime<chrono::Utc>> {
			self.base().get($iri).as_date()
		}
	};

	($name:ident($iri:path) -> node) => {
		fn $name(&self) -> Option<$crate::Typed> {
			self.base().get($iri).node()
		}
	};

	($name:ident($iri:path) -> nodes) => {
		fn $name(&self) -> Vec<$crate::Typed> {
			self.base().get($iri).nodes()
		}
	};

	($name:ident($iri:path) -> slot) => {
		fn $name(&self) -> $crate::Slot {
			self.base().get($iri)
		}
	};
}

pub(crate) use getter;

macro_rules! setter {
	// object property or free-form value, fallible
	($name:ident($iri:path) -> set) => {
		fn $name(mut self, val: impl Into<$crate::builder::Input>) -> $crate::Result<Self> {
			self.builder_mut().set_in_place($iri, val.into(), $crate::builder::SetOpts::default())?;
			Ok(self)
		}
	};

	// language-tagged literal
	($name:ident($iri:path) -> lang) => {
		fn $name(mut self, val: &str, lang: Option<&str>) -> Self {
			self.builder_mut().put_lang($iri, val, lang);
			self
		}
	};

	// xsd:dateTime literal plus a *_now() convenience
	($name:ident($iri:path) -> date) => {
		paste::paste! {
			fn $name(mut self, val: chrono::DateTime<chrono::Utc>) -> Self {
				self.builder_mut().put_date($iri, val);
				self
			}

			fn [<$name _now>](self) -> Self {
				self.$name(chrono::Utc::now())
			}
		}
	};

	// non-negative integer, floored and clamped at zero
	($name:ident($iri:path) -> nonneg) => {
		fn $name(mut self, val: i64) -> Self {
			self.builder_mut().put_non_negative_int($iri, val);
			self
		}
	};

	// unclamped float literal
	($name:ident($iri:path) -> float) => {
		fn $name(mut self, val: f64) -> Self {
			self.builder_mut().put_float($iri, val);
			self
		}
	};

	// float clamped into a closed range
	($name:ident($iri:path) -> ranged($min:expr, $max:expr)) => {
		fn $name(mut self, val: f64) -> Self {
			self.builder_mut().put_ranged($iri, val, $min, $max);
			self
		}
	};

	// xsd:duration as a string, or seconds as a non-negative number
	($name:ident($iri:path) -> duration) => {
		paste::paste! {
			fn $name(mut self, val: &str) -> Self {
				self.builder_mut().put_plain($iri, val);
				self
			}

			fn [<$name _secs>](mut self, val: i64) -> Self {
				self.builder_mut().put_non_negative_int($iri, val);
				self
			}
		}
	};

	// plain string literal
	($name:ident($iri:path) -> str) => {
		fn $name(mut self, val: &str) -> Self {
			self.builder_mut().put_plain($iri, val);
			self
		}
	};
}

pub(crate) use setter;
