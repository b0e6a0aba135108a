use crate::macros::getter;
use crate::object::{Object, Typed};
use crate::vocab::as2;

/// Media dimensions and playback length, shared by documents and links.
pub trait Content: Object {
	getter! { height(as2::HEIGHT) -> u64 }
	getter! { width(as2::WIDTH) -> u64 }
	getter! { duration(as2::DURATION) -> str }
}

impl Content for Typed {}
