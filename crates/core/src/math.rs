use nalgebra::Scalar as MatrixScalar;
use num_traits::{Float as NumFloat, FromPrimitive};
use std::ops::{AddAssign, MulAssign, SubAssign};

/// Bounds at or beyond this magnitude are treated as absent.
pub const BOUND_INF: f64 = 1e30;

pub trait RealNumber:
    NumFloat + FromPrimitive + MatrixScalar + Send + Sync + AddAssign + SubAssign + MulAssign
{
    fn bound_inf() -> Self {
        cast(BOUND_INF)
    }

    fn has_finite_lower(value: Self) -> bool {
        value > -Self::bound_inf()
    }

    fn has_finite_upper(value: Self) -> bool {
        value < Self::bound_inf()
    }
}

impl<T> RealNumber for T where
    T: NumFloat + FromPrimitive + MatrixScalar + Send + Sync + AddAssign + SubAssign + MulAssign
{
}

#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

#[cfg(feature = "f32")]
pub type Scalar = f32;

/// Converts an `f64` constant into `T`, saturating to +-infinity when it does
/// not fit.
pub fn cast<T: RealNumber>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(|| {
        if value.is_sign_negative() {
            T::neg_infinity()
        } else {
            T::infinity()
        }
    })
}
