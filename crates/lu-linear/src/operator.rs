//! Storage-agnostic linear operators.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CsrMatrix;

use crate::error::{LinearError, LinearResult};

/// A matrix that can be applied to a vector.
pub trait LinearOperator {
    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Compute `M x`. Callers guarantee `x.len() == self.ncols()`.
    fn apply(&self, x: &DVector<f64>) -> DVector<f64>;

    /// Stored entries.
    fn nnz(&self) -> usize;

    /// [`apply`](Self::apply) with the length of `x` checked first.
    fn apply_checked(&self, x: &DVector<f64>, what: &'static str) -> LinearResult<DVector<f64>> {
        if x.len() != self.ncols() {
            return Err(LinearError::Dimension {
                what,
                expected: self.ncols(),
                actual: x.len(),
            });
        }
        Ok(self.apply(x))
    }
}

impl LinearOperator for DMatrix<f64> {
    fn nrows(&self) -> usize {
        self.shape().0
    }

    fn ncols(&self) -> usize {
        self.shape().1
    }

    fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        self * x
    }

    fn nnz(&self) -> usize {
        self.len()
    }
}

impl LinearOperator for CsrMatrix<f64> {
    fn nrows(&self) -> usize {
        CsrMatrix::nrows(self)
    }

    fn ncols(&self) -> usize {
        CsrMatrix::ncols(self)
    }

    fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        self * x
    }

    fn nnz(&self) -> usize {
        CsrMatrix::nnz(self)
    }
}

/// A system matrix in dense or compressed sparse row storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Dense(DMatrix<f64>),
    Sparse(CsrMatrix<f64>),
}

impl Operator {
    /// Wrap a dense matrix, converting to CSR when `sparse` is set.
    pub fn from_dense(matrix: DMatrix<f64>, sparse: bool) -> Self {
        if sparse {
            Operator::Sparse(CsrMatrix::from(&matrix))
        } else {
            Operator::Dense(matrix)
        }
    }

    pub fn zeros(nrows: usize, ncols: usize, sparse: bool) -> Self {
        if sparse {
            Operator::Sparse(CsrMatrix::zeros(nrows, ncols))
        } else {
            Operator::Dense(DMatrix::zeros(nrows, ncols))
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Operator::Sparse(_))
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Dense copy of the operator.
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Operator::Dense(m) => m.clone(),
            Operator::Sparse(m) => DMatrix::from(m),
        }
    }
}

impl From<DMatrix<f64>> for Operator {
    fn from(matrix: DMatrix<f64>) -> Self {
        Operator::Dense(matrix)
    }
}

impl From<CsrMatrix<f64>> for Operator {
    fn from(matrix: CsrMatrix<f64>) -> Self {
        Operator::Sparse(matrix)
    }
}

impl LinearOperator for Operator {
    fn nrows(&self) -> usize {
        match self {
            Operator::Dense(m) => LinearOperator::nrows(m),
            Operator::Sparse(m) => LinearOperator::nrows(m),
        }
    }

    fn ncols(&self) -> usize {
        match self {
            Operator::Dense(m) => LinearOperator::ncols(m),
            Operator::Sparse(m) => LinearOperator::ncols(m),
        }
    }

    fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            // Matrix::apply is an unrelated inherent method
            Operator::Dense(m) => LinearOperator::apply(m, x),
            Operator::Sparse(m) => LinearOperator::apply(m, x),
        }
    }

    fn nnz(&self) -> usize {
        match self {
            Operator::Dense(m) => LinearOperator::nnz(m),
            Operator::Sparse(m) => LinearOperator::nnz(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 4, &[
            1.0, 0.0, 0.0, 2.0, //
            0.0, -1.0, 0.5, 0.0, //
            0.0, 0.0, 0.0, 3.0,
        ])
    }

    #[test]
    fn sparse_drops_explicit_zeros() {
        let op = Operator::from_dense(banded(), true);
        assert!(op.is_sparse());
        assert_eq!(op.shape(), (3, 4));
        assert_eq!(op.nnz(), 5);
        assert_eq!(op.to_dense(), banded());
    }

    #[test]
    fn dense_and_sparse_apply_agree() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let dense = Operator::from_dense(banded(), false).apply(&x);
        let sparse = Operator::from_dense(banded(), true).apply(&x);

        assert_eq!(dense, DVector::from_vec(vec![9.0, -0.5, 12.0]));
        assert_eq!(dense, sparse);
    }

    #[test]
    fn csr_product_matches_dense_with_empty_rows() {
        // rows 1 and 3 hold no entries
        let csr = CsrMatrix::try_from_csr_data(
            4,
            3,
            vec![0, 2, 2, 3, 3],
            vec![0, 2, 1],
            vec![2.0, -1.0, 0.5],
        )
        .unwrap();
        let x = DVector::from_vec(vec![1.0, 4.0, 3.0]);

        let y = LinearOperator::apply(&csr, &x);
        assert_eq!(y, DVector::from_vec(vec![-1.0, 0.0, 2.0, 0.0]));
        assert_eq!(y, DMatrix::from(&csr) * &x);
    }

    #[test]
    fn apply_checked_rejects_wrong_length() {
        let op = Operator::from_dense(banded(), true);
        let err = op
            .apply_checked(&DVector::zeros(3), "input")
            .unwrap_err();
        assert_eq!(
            err,
            LinearError::Dimension {
                what: "input",
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn zeros_have_no_entries_when_sparse() {
        let op = Operator::zeros(2, 5, true);
        assert_eq!(op.nnz(), 0);
        assert_eq!(op.apply(&DVector::from_element(5, 1.0)), DVector::zeros(2));
    }
}
