use crate::macros::getter;
use crate::object::{Object, Typed};
use crate::vocab::as2;

/// Properties of activities: who did what, to what, addressed to whom.
pub trait Activity: Object {
	getter! { actor(as2::ACTOR_PROP) -> nodes }
	getter! { object(as2::OBJECT_PROP) -> nodes }
	getter! { target(as2::TARGET) -> nodes }
	getter! { result(as2::RESULT) -> nodes }
	getter! { origin(as2::ORIGIN) -> nodes }
	getter! { priority(as2::PRIORITY) -> f64 }
	getter! { to(as2::TO) -> nodes }
	getter! { bto(as2::BTO) -> nodes }
	getter! { cc(as2::CC) -> nodes }
	getter! { bcc(as2::BCC) -> nodes }
}

impl Activity for Typed {}
