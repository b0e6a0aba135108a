use crate::macros::getter;
use crate::object::{Object, Typed};
use crate::vocab::as2;

pub trait Place: Object {
	getter! { accuracy(as2::ACCURACY) -> f64 }
	getter! { altitude(as2::ALTITUDE) -> f64 }
	getter! { latitude(as2::LATITUDE) -> f64 }
	getter! { longitude(as2::LONGITUDE) -> f64 }
	getter! { radius(as2::RADIUS) -> f64 }
	getter! { units(as2::UNITS) -> str }
}

impl Place for Typed {}
