//! Random dense test problems.

use crate::math::{cast, RealNumber};
use crate::model::Model;
use nalgebra::{DMatrix, DVector};
use rand::Rng;

fn uniform<T: RealNumber, R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> T {
    cast(rng.gen_range(lo..hi))
}

// NaN means "never".
fn probability(factor: f64) -> f64 {
    if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

/// Generates a feasible, strongly convex dense QP with `n` variables, `p`
/// equalities and `m` inequalities.
///
/// `P = M^T M + 1e-2 I`. A random point `x0` satisfies every constraint: `b = A x0`,
/// `h = G x0 + s` with `s >= 0`, and finite bounds bracket `x0`. Each variable
/// receives a finite lower (upper) bound with probability `x_lb_factor`
/// (`x_ub_factor`) and is unbounded on that side otherwise. Factors are
/// clamped to `[0, 1]` and NaN counts as 0.
pub fn dense_strongly_convex_qp<T, R>(
    rng: &mut R,
    n: usize,
    p: usize,
    m: usize,
    x_lb_factor: f64,
    x_ub_factor: f64,
) -> Model<T>
where
    T: RealNumber,
    R: Rng + ?Sized,
{
    let factor = DMatrix::<T>::from_fn(n, n, |_, _| uniform(rng, -1.0, 1.0));
    let mut objective = factor.tr_mul(&factor);
    objective.fill_lower_triangle_with_upper_triangle();
    let regularization: T = cast(1e-2);
    for i in 0..n {
        objective[(i, i)] += regularization;
    }

    let x0 = DVector::<T>::from_fn(n, |_, _| uniform(rng, -1.0, 1.0));
    let c = DVector::<T>::from_fn(n, |_, _| uniform(rng, -1.0, 1.0));

    let a = DMatrix::<T>::from_fn(p, n, |_, _| uniform(rng, -1.0, 1.0));
    let b = &a * &x0;

    let g = DMatrix::<T>::from_fn(m, n, |_, _| uniform(rng, -1.0, 1.0));
    let mut h = &g * &x0;
    for value in h.iter_mut() {
        *value += uniform::<T, _>(rng, 0.0, 1.0);
    }

    let x_lb_factor = probability(x_lb_factor);
    let x_ub_factor = probability(x_ub_factor);
    let mut x_lb = DVector::from_element(n, T::neg_infinity());
    let mut x_ub = DVector::from_element(n, T::infinity());
    for i in 0..n {
        if rng.gen_bool(x_lb_factor) {
            x_lb[i] = x0[i] - uniform::<T, _>(rng, 0.0, 1.0);
        }
        if rng.gen_bool(x_ub_factor) {
            x_ub[i] = x0[i] + uniform::<T, _>(rng, 0.0, 1.0);
        }
    }

    Model {
        p: objective,
        c,
        a,
        b,
        g,
        h,
        x_lb,
        x_ub,
    }
}
