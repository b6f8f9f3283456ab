//! Reading stored values as sampling weights.
//!
//! A map may hold values of any type; only values that read as a finite real
//! number are usable weights. Everything else is rejected at sampling time with
//! [`SampleError::InvalidWeight`](crate::SampleError::InvalidWeight), never at
//! insertion time.

use std::fmt::Debug;

/// A value that may be interpreted as a sampling weight.
///
/// Implemented for every primitive integer and float type. `bool`, `char`, `str`
/// and `String` are implemented too, but never yield a weight: they are the
/// non-numeric values a caller can still store in a map.
pub trait Weight: Debug {
    /// The weight as an `f64`, or `None` if the value is not a finite real number.
    fn as_weight(&self) -> Option<f64>;
}

macro_rules! impl_numeric_weight {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn as_weight(&self) -> Option<f64> {
                    let w = *self as f64;
                    w.is_finite().then_some(w)
                }
            }
        )*
    };
}

impl_numeric_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! impl_non_numeric_weight {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn as_weight(&self) -> Option<f64> {
                    None
                }
            }
        )*
    };
}

impl_non_numeric_weight!(bool, char, str, String);

impl<W: Weight + ?Sized> Weight for &W {
    #[inline]
    fn as_weight(&self) -> Option<f64> {
        (**self).as_weight()
    }
}

impl<W: Weight + ?Sized> Weight for Box<W> {
    #[inline]
    fn as_weight(&self) -> Option<f64> {
        (**self).as_weight()
    }
}

impl<W: Weight> Weight for Option<W> {
    #[inline]
    fn as_weight(&self) -> Option<f64> {
        self.as_ref().and_then(Weight::as_weight)
    }
}
