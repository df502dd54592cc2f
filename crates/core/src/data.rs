use crate::math::RealNumber;
use crate::model::Model;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("inequality row {row} out of range (m = {m})")]
    InvalidIndex { row: usize, m: usize },
    #[error("inconsistent data: {0}")]
    Inconsistent(String),
}

pub type DataResult<T> = Result<T, DataError>;

/// Canonical dense problem data consumed by the solver loop.
///
/// Built once from a [`Model`] and never re-derived. Only two things may
/// change afterwards: inequality rows can be zeroed with
/// [`Data::set_g_row_zero`], and the box scaling vector is writable through
/// [`Data::x_b_scaling_mut`].
///
/// Finite bounds are compacted: `x_lb_idx[k]` is the original index of the
/// k-th variable with a finite lower bound and `x_lb_n[k]` holds the
/// *negated* bound, while `x_ub_idx`/`x_ub` hold the finite upper bounds
/// unnegated. Index vectors are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "DataParts<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Data<T: RealNumber> {
    n: usize,
    p: usize,
    m: usize,

    p_utri: DMatrix<T>,
    at: DMatrix<T>,
    gt: DMatrix<T>,

    c: DVector<T>,
    b: DVector<T>,
    h: DVector<T>,

    x_lb_idx: Vec<usize>,
    x_ub_idx: Vec<usize>,

    // lb <= x_b_scaling .* x <= ub
    x_b_scaling: DVector<T>,

    x_lb_n: DVector<T>,
    x_ub: DVector<T>,
}

impl<T> Data<T>
where
    T: RealNumber,
{
    pub fn new(model: Model<T>) -> Self {
        let n = model.p.nrows();
        let p = model.a.nrows();
        let m = model.g.nrows();

        let p_utri = model.p.upper_triangle();
        let at = model.a.transpose();
        let gt = model.g.transpose();

        let (x_lb_idx, x_lb_n): (Vec<usize>, Vec<T>) = model
            .x_lb
            .iter()
            .enumerate()
            .filter(|(_, lb)| T::has_finite_lower(**lb))
            .map(|(i, lb)| (i, -*lb))
            .unzip();

        let (x_ub_idx, x_ub): (Vec<usize>, Vec<T>) = model
            .x_ub
            .iter()
            .enumerate()
            .filter(|(_, ub)| T::has_finite_upper(**ub))
            .map(|(i, ub)| (i, *ub))
            .unzip();

        tracing::debug!(
            n,
            p,
            m,
            n_lb = x_lb_idx.len(),
            n_ub = x_ub_idx.len(),
            "canonical problem data constructed"
        );

        Self {
            n,
            p,
            m,
            p_utri,
            at,
            gt,
            c: model.c,
            b: model.b,
            h: model.h,
            x_lb_idx,
            x_ub_idx,
            x_b_scaling: DVector::from_element(n, T::one()),
            x_lb_n: DVector::from_vec(x_lb_n),
            x_ub: DVector::from_vec(x_ub),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn m(&self) -> usize {
        self.m
    }

    /// Upper triangle of `P`, diagonal included. Entries below the diagonal
    /// are zero and must be read as the mirrored upper entries.
    pub fn p_utri(&self) -> &DMatrix<T> {
        &self.p_utri
    }

    pub fn at(&self) -> &DMatrix<T> {
        &self.at
    }

    pub fn gt(&self) -> &DMatrix<T> {
        &self.gt
    }

    pub fn c(&self) -> &DVector<T> {
        &self.c
    }

    pub fn b(&self) -> &DVector<T> {
        &self.b
    }

    pub fn h(&self) -> &DVector<T> {
        &self.h
    }

    pub fn n_lb(&self) -> usize {
        self.x_lb_idx.len()
    }

    pub fn n_ub(&self) -> usize {
        self.x_ub_idx.len()
    }

    pub fn x_lb_idx(&self) -> &[usize] {
        &self.x_lb_idx
    }

    pub fn x_ub_idx(&self) -> &[usize] {
        &self.x_ub_idx
    }

    /// Negated finite lower bounds, aligned with [`Data::x_lb_idx`].
    pub fn x_lb_n(&self) -> &DVector<T> {
        &self.x_lb_n
    }

    /// Finite upper bounds, aligned with [`Data::x_ub_idx`].
    pub fn x_ub(&self) -> &DVector<T> {
        &self.x_ub
    }

    pub fn x_b_scaling(&self) -> &DVector<T> {
        &self.x_b_scaling
    }

    pub fn x_b_scaling_mut(&mut self) -> &mut [T] {
        self.x_b_scaling.as_mut_slice()
    }

    /// Deactivates inequality `row` (numbered as in `G`) by zeroing its
    /// coefficients, i.e. column `row` of `G^T`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= m`. Use [`Data::try_set_g_row_zero`] when the index
    /// is not known to be valid.
    pub fn set_g_row_zero(&mut self, row: usize) {
        assert!(
            row < self.m,
            "inequality row {row} out of range (m = {})",
            self.m
        );
        self.gt.column_mut(row).fill(T::zero());
        tracing::trace!(row, "inequality row zeroed");
    }

    pub fn try_set_g_row_zero(&mut self, row: usize) -> DataResult<()> {
        if row >= self.m {
            return Err(DataError::InvalidIndex { row, m: self.m });
        }
        self.set_g_row_zero(row);
        Ok(())
    }

    /// Dense count of the strictly upper part of `P`, `n(n-1)/2`. This is a
    /// capacity, not the number of structurally non-zero entries.
    pub fn non_zeros_p_utri(&self) -> usize {
        let n = self.p_utri.nrows();
        n * n.saturating_sub(1) / 2
    }

    pub fn non_zeros_a(&self) -> usize {
        self.at.nrows() * self.at.ncols()
    }

    pub fn non_zeros_g(&self) -> usize {
        self.gt.nrows() * self.gt.ncols()
    }
}

// Unchecked field set accepted from serialized input; converted into `Data`
// only after the shape invariants hold.
#[derive(Deserialize)]
struct DataParts<T: RealNumber> {
    n: usize,
    p: usize,
    m: usize,
    p_utri: DMatrix<T>,
    at: DMatrix<T>,
    gt: DMatrix<T>,
    c: DVector<T>,
    b: DVector<T>,
    h: DVector<T>,
    x_lb_idx: Vec<usize>,
    x_ub_idx: Vec<usize>,
    x_b_scaling: DVector<T>,
    x_lb_n: DVector<T>,
    x_ub: DVector<T>,
}

fn check_shape(name: &str, actual: (usize, usize), expected: (usize, usize)) -> DataResult<()> {
    if actual != expected {
        return Err(DataError::Inconsistent(format!(
            "{name} is {}x{}, expected {}x{}",
            actual.0, actual.1, expected.0, expected.1
        )));
    }
    Ok(())
}

fn check_bound_map(name: &str, idx: &[usize], values: usize, n: usize) -> DataResult<()> {
    if idx.len() != values {
        return Err(DataError::Inconsistent(format!(
            "{name} has {} indices but {values} values",
            idx.len()
        )));
    }
    if idx.windows(2).any(|w| w[0] >= w[1]) {
        return Err(DataError::Inconsistent(format!(
            "{name} indices are not strictly increasing"
        )));
    }
    if idx.last().is_some_and(|&last| last >= n) {
        return Err(DataError::Inconsistent(format!(
            "{name} index out of range (n = {n})"
        )));
    }
    Ok(())
}

impl<T> TryFrom<DataParts<T>> for Data<T>
where
    T: RealNumber,
{
    type Error = DataError;

    fn try_from(parts: DataParts<T>) -> DataResult<Self> {
        let DataParts { n, p, m, .. } = parts;
        check_shape("p_utri", parts.p_utri.shape(), (n, n))?;
        check_shape("at", parts.at.shape(), (n, p))?;
        check_shape("gt", parts.gt.shape(), (n, m))?;
        check_shape("c", parts.c.shape(), (n, 1))?;
        check_shape("b", parts.b.shape(), (p, 1))?;
        check_shape("h", parts.h.shape(), (m, 1))?;
        check_shape("x_b_scaling", parts.x_b_scaling.shape(), (n, 1))?;
        check_bound_map("x_lb_idx", &parts.x_lb_idx, parts.x_lb_n.len(), n)?;
        check_bound_map("x_ub_idx", &parts.x_ub_idx, parts.x_ub.len(), n)?;
        Ok(Self {
            n,
            p,
            m,
            p_utri: parts.p_utri,
            at: parts.at,
            gt: parts.gt,
            c: parts.c,
            b: parts.b,
            h: parts.h,
            x_lb_idx: parts.x_lb_idx,
            x_ub_idx: parts.x_ub_idx,
            x_b_scaling: parts.x_b_scaling,
            x_lb_n: parts.x_lb_n,
            x_ub: parts.x_ub,
        })
    }
}

impl<T> From<Model<T>> for Data<T>
where
    T: RealNumber,
{
    fn from(model: Model<T>) -> Self {
        Self::new(model)
    }
}

impl<T> Default for Data<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            n: 0,
            p: 0,
            m: 0,
            p_utri: DMatrix::zeros(0, 0),
            at: DMatrix::zeros(0, 0),
            gt: DMatrix::zeros(0, 0),
            c: DVector::zeros(0),
            b: DVector::zeros(0),
            h: DVector::zeros(0),
            x_lb_idx: Vec::new(),
            x_ub_idx: Vec::new(),
            x_b_scaling: DVector::zeros(0),
            x_lb_n: DVector::zeros(0),
            x_ub: DVector::zeros(0),
        }
    }
}
