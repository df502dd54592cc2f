use crate::math::RealNumber;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
    #[error("missing model component: {0}")]
    Missing(&'static str),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Dense QP problem
///
/// ```text
/// minimize    1/2 x^T P x + c^T x
/// subject to  A x  = b
///             G x <= h
///             x_lb <= x <= x_ub
/// ```
///
/// Bounds at or beyond [`BOUND_INF`](crate::math::BOUND_INF) in magnitude
/// mean the variable is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model<T: RealNumber> {
    pub p: DMatrix<T>,
    pub c: DVector<T>,
    pub a: DMatrix<T>,
    pub b: DVector<T>,
    pub g: DMatrix<T>,
    pub h: DVector<T>,
    pub x_lb: DVector<T>,
    pub x_ub: DVector<T>,
}

impl<T> Model<T>
where
    T: RealNumber,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p: DMatrix<T>,
        c: DVector<T>,
        a: DMatrix<T>,
        b: DVector<T>,
        g: DMatrix<T>,
        h: DVector<T>,
        x_lb: Option<DVector<T>>,
        x_ub: Option<DVector<T>>,
    ) -> ModelResult<Self> {
        let n = c.len();
        let model = Self {
            p,
            c,
            a,
            b,
            g,
            h,
            x_lb: x_lb.unwrap_or_else(|| DVector::from_element(n, T::neg_infinity())),
            x_ub: x_ub.unwrap_or_else(|| DVector::from_element(n, T::infinity())),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn n(&self) -> usize {
        self.p.nrows()
    }

    pub fn p(&self) -> usize {
        self.a.nrows()
    }

    pub fn m(&self) -> usize {
        self.g.nrows()
    }

    pub fn validate(&self) -> ModelResult<()> {
        let result = self.check_dimensions().and_then(|_| self.check_bounds());
        if let Err(err) = &result {
            tracing::debug!(error = %err, "model validation failed");
        }
        result
    }

    fn check_dimensions(&self) -> ModelResult<()> {
        let n = self.p.nrows();
        if self.p.ncols() != n {
            return Err(ModelError::DimensionMismatch(format!(
                "P must be square, got {}x{}",
                self.p.nrows(),
                self.p.ncols()
            )));
        }
        if self.c.len() != n {
            return Err(ModelError::DimensionMismatch(format!(
                "c length {} != n ({n})",
                self.c.len()
            )));
        }
        check_block("A", &self.a, &self.b, n)?;
        check_block("G", &self.g, &self.h, n)?;
        if self.x_lb.len() != n {
            return Err(ModelError::DimensionMismatch(format!(
                "x_lb length {} != n ({n})",
                self.x_lb.len()
            )));
        }
        if self.x_ub.len() != n {
            return Err(ModelError::DimensionMismatch(format!(
                "x_ub length {} != n ({n})",
                self.x_ub.len()
            )));
        }
        Ok(())
    }

    fn check_bounds(&self) -> ModelResult<()> {
        for (i, (lo, hi)) in self.x_lb.iter().zip(self.x_ub.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(ModelError::InvalidBounds(format!(
                    "NaN bound on variable {i}"
                )));
            }
            if lo > hi {
                return Err(ModelError::InvalidBounds(format!(
                    "lower bound exceeds upper bound at index {i}"
                )));
            }
        }
        Ok(())
    }
}

fn check_block<T: RealNumber>(
    name: &str,
    matrix: &DMatrix<T>,
    rhs: &DVector<T>,
    n: usize,
) -> ModelResult<()> {
    if matrix.ncols() != n {
        return Err(ModelError::DimensionMismatch(format!(
            "{name} columns {} != n ({n})",
            matrix.ncols()
        )));
    }
    if matrix.nrows() != rhs.len() {
        return Err(ModelError::DimensionMismatch(format!(
            "{name} rows {} != rhs length {}",
            matrix.nrows(),
            rhs.len()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ModelBuilder<T: RealNumber> {
    p: Option<DMatrix<T>>,
    c: Option<DVector<T>>,
    eq: Option<(DMatrix<T>, DVector<T>)>,
    ineq: Option<(DMatrix<T>, DVector<T>)>,
    x_lb: Option<DVector<T>>,
    x_ub: Option<DVector<T>>,
}

impl<T> Default for ModelBuilder<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            p: None,
            c: None,
            eq: None,
            ineq: None,
            x_lb: None,
            x_ub: None,
        }
    }
}

impl<T> ModelBuilder<T>
where
    T: RealNumber,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn p(mut self, matrix: DMatrix<T>) -> Self {
        self.p = Some(matrix);
        self
    }

    pub fn c(mut self, vector: DVector<T>) -> Self {
        self.c = Some(vector);
        self
    }

    pub fn eq(mut self, a: DMatrix<T>, b: DVector<T>) -> Self {
        self.eq = Some((a, b));
        self
    }

    pub fn ineq(mut self, g: DMatrix<T>, h: DVector<T>) -> Self {
        self.ineq = Some((g, h));
        self
    }

    pub fn x_lb(mut self, lower: DVector<T>) -> Self {
        self.x_lb = Some(lower);
        self
    }

    pub fn x_ub(mut self, upper: DVector<T>) -> Self {
        self.x_ub = Some(upper);
        self
    }

    pub fn bounds(self, lower: DVector<T>, upper: DVector<T>) -> Self {
        self.x_lb(lower).x_ub(upper)
    }

    pub fn build(self) -> ModelResult<Model<T>> {
        let p = self.p.ok_or(ModelError::Missing("objective matrix P"))?;
        let c = self.c.ok_or(ModelError::Missing("linear term c"))?;
        let n = c.len();
        let (a, b) = self
            .eq
            .unwrap_or_else(|| (DMatrix::zeros(0, n), DVector::zeros(0)));
        let (g, h) = self
            .ineq
            .unwrap_or_else(|| (DMatrix::zeros(0, n), DVector::zeros(0)));
        Model::new(p, c, a, b, g, h, self.x_lb, self.x_ub)
    }
}
