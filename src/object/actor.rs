use crate::macros::getter;
use crate::object::{Object, Typed};
use crate::vocab::as2;

pub trait Actor: Object {
	getter! { actor_of(as2::ACTOR_OF) -> nodes }
}

impl Actor for Typed {}
