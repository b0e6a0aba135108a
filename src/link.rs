use crate::macros::getter;
use crate::object::{Typed, View};
use crate::vocab::as2;

/// An indirect reference to a resource.
pub trait Link: View {
	getter! { href(as2::HREF) -> str }
	getter! { hreflang(as2::HREFLANG) -> str }
	getter! { rel(as2::REL) -> slot }
	getter! { href_template(as2::HREF_TEMPLATE) -> str }
}

impl Link for Typed {}
