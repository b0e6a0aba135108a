use crate::macros::getter;
use crate::object::activity::Activity;
use crate::object::content::Content;
use crate::object::Typed;
use crate::vocab::as2;

/// A question with exclusive or inclusive answer options.
pub trait Question: Activity {
	getter! { one_of(as2::ONE_OF) -> nodes }
	getter! { any_of(as2::ANY_OF) -> nodes }
}

impl Question for Typed {}

pub trait PossibleAnswer: Content {
	getter! { shape(as2::SHAPE) -> nodes }
}

impl PossibleAnswer for Typed {}
