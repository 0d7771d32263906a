//! Structural representation of a sparse matrix.
//!
//! A [`SparsityPattern`] only records where the structurally nonzero
//! entries of a matrix are, in compressed sparse column form. Values are
//! never retained: coloring only depends on the structure.

use ndarray::ArrayView2;
use num_traits::Zero;
use sprs::indexing::SpIndex;
use sprs::CsMatViewI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ColoringError, Result};

/// The nonzero structure of a `rows x cols` matrix, stored column by column.
///
/// ## Storage format
///
/// The row indices of the nonzeros of column `j` are
/// `indices[indptr[j]..indptr[j + 1]]`, sorted in increasing order and
/// without duplicates. The total number of nonzeros is thus
/// `indptr[cols]`.
///
/// This is the same layout as the structure of a CSC [`sprs::CsMat`],
/// and a pattern is immutable once built.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PatternParts"))]
pub struct SparsityPattern {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
}

/// Unchecked serialized form of a pattern.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PatternParts {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<PatternParts> for SparsityPattern {
    type Error = ColoringError;

    fn try_from(parts: PatternParts) -> Result<Self> {
        Self::try_new((parts.nrows, parts.ncols), parts.indptr, parts.indices)
    }
}

impl SparsityPattern {
    /// Build a pattern from its raw compressed column arrays, checking the
    /// storage invariants.
    pub fn try_new(
        shape: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<usize>,
    ) -> Result<Self> {
        let (nrows, ncols) = shape;
        let invalid = |reason| ColoringError::InvalidShape {
            rows: nrows,
            cols: ncols,
            reason,
        };
        if indptr.len() != ncols + 1 {
            return Err(invalid("indptr length should be cols + 1"));
        }
        if indptr[0] != 0 || indptr[ncols] != indices.len() {
            return Err(invalid("indptr does not delimit the indices"));
        }
        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(invalid("indptr is not sorted"));
        }
        for col in indptr.windows(2) {
            let rows = &indices[col[0]..col[1]];
            if rows.windows(2).any(|w| w[0] >= w[1]) {
                return Err(invalid("row indices should be sorted and unique"));
            }
            if rows.last().map_or(false, |&row| row >= nrows) {
                return Err(invalid("row index out of bounds"));
            }
        }
        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
        })
    }

    /// Build a pattern without checking the storage invariants.
    pub(crate) fn new_trusted(
        shape: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(indptr.len(), shape.1 + 1);
        debug_assert_eq!(indptr[shape.1], indices.len());
        Self {
            nrows: shape.0,
            ncols: shape.1,
            indptr,
            indices,
        }
    }

    /// An empty pattern, all entries are structural zeros.
    pub fn empty(shape: (usize, usize)) -> Self {
        Self::new_trusted(shape, vec![0; shape.1 + 1], Vec::new())
    }

    /// The pattern of the identity matrix of size `n`.
    pub fn eye(n: usize) -> Self {
        Self::new_trusted((n, n), (0..=n).collect(), (0..n).collect())
    }

    /// The pattern of a fully dense matrix.
    pub fn dense(shape: (usize, usize)) -> Self {
        let (nrows, ncols) = shape;
        let indptr = (0..=ncols).map(|j| j * nrows).collect();
        let indices = (0..ncols).flat_map(|_| 0..nrows).collect();
        Self::new_trusted(shape, indptr, indices)
    }

    /// Extract the structure of a sparse matrix, in either storage.
    ///
    /// Every stored entry is considered structurally nonzero, including
    /// explicitly stored zeros.
    pub fn from_csmat<N, I, Iptr>(mat: CsMatViewI<N, I, Iptr>) -> Self
    where
        I: SpIndex,
        Iptr: SpIndex,
    {
        let (nrows, ncols) = mat.shape();
        if mat.is_csc() {
            let mut indptr = Vec::with_capacity(ncols + 1);
            let mut indices = Vec::with_capacity(mat.nnz());
            indptr.push(0);
            for col in mat.outer_iterator() {
                indices.extend(col.indices().iter().map(|i| i.index()));
                indptr.push(indices.len());
            }
            return Self::new_trusted((nrows, ncols), indptr, indices);
        }
        // CSR storage: the rows are the outer dimension, so the pattern
        // is the transpose of the one we can read directly.
        let mut indptr = Vec::with_capacity(nrows + 1);
        let mut indices = Vec::with_capacity(mat.nnz());
        indptr.push(0);
        for row in mat.outer_iterator() {
            indices.extend(row.indices().iter().map(|j| j.index()));
            indptr.push(indices.len());
        }
        Self::new_trusted((ncols, nrows), indptr, indices).transpose()
    }

    /// Extract the structure of a dense matrix, entries different from
    /// zero are nonzeros.
    pub fn from_dense<N>(mat: ArrayView2<N>) -> Self
    where
        N: Zero + PartialEq,
    {
        let (nrows, ncols) = mat.dim();
        let mut indptr = Vec::with_capacity(ncols + 1);
        let mut indices = Vec::new();
        indptr.push(0);
        for col in mat.columns() {
            for (row, val) in col.iter().enumerate() {
                if !val.is_zero() {
                    indices.push(row);
                }
            }
            indptr.push(indices.len());
        }
        Self::new_trusted((nrows, ncols), indptr, indices)
    }

    /// Build a pattern from a list of `(row, col)` locations. Duplicate
    /// locations are merged.
    pub fn from_triplets(
        shape: (usize, usize),
        locations: &[(usize, usize)],
    ) -> Result<Self> {
        let (nrows, ncols) = shape;
        if locations.iter().any(|&(i, j)| i >= nrows || j >= ncols) {
            return Err(ColoringError::InvalidShape {
                rows: nrows,
                cols: ncols,
                reason: "location out of bounds",
            });
        }
        let mut sorted: Vec<(usize, usize)> =
            locations.iter().map(|&(i, j)| (j, i)).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut indptr = vec![0; ncols + 1];
        for &(j, _) in &sorted {
            indptr[j + 1] += 1;
        }
        for j in 0..ncols {
            indptr[j + 1] += indptr[j];
        }
        let indices = sorted.into_iter().map(|(_, i)| i).collect();
        Ok(Self::new_trusted(shape, indptr, indices))
    }

    pub fn rows(&self) -> usize {
        self.nrows
    }

    pub fn cols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of structural nonzeros.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// The sorted row indices of the nonzeros of column `col`.
    ///
    /// # Panics
    ///
    /// If `col >= self.cols()`
    pub fn outer(&self, col: usize) -> &[usize] {
        &self.indices[self.indptr[col]..self.indptr[col + 1]]
    }

    /// Iterate over the `(row, col)` locations of the nonzeros, in storage
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indptr
            .windows(2)
            .enumerate()
            .flat_map(move |(col, w)| {
                self.indices[w[0]..w[1]].iter().map(move |&row| (row, col))
            })
    }

    /// Maximum number of nonzeros in a column.
    pub fn max_outer_nnz(&self) -> usize {
        self.indptr
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }

    /// The pattern of the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut indptr = vec![0; self.nrows + 1];
        for &row in &self.indices {
            indptr[row + 1] += 1;
        }
        for row in 0..self.nrows {
            indptr[row + 1] += indptr[row];
        }
        let mut next = indptr.clone();
        let mut indices = vec![0; self.nnz()];
        // Visiting columns in increasing order keeps the new columns sorted.
        for (row, col) in self.iter() {
            indices[next[row]] = col;
            next[row] += 1;
        }
        Self::new_trusted((self.ncols, self.nrows), indptr, indices)
    }

    /// Whether entry `(i, j)` is nonzero iff entry `(j, i)` is.
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && *self == self.transpose()
    }

    /// The union of this pattern and of its transpose.
    pub fn symmetrize(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(ColoringError::InvalidShape {
                rows: self.nrows,
                cols: self.ncols,
                reason: "a symmetric pattern should be square",
            });
        }
        let transposed = self.transpose();
        if transposed == *self {
            return Ok(transposed);
        }
        let n = self.ncols;
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(2 * self.nnz());
        indptr.push(0);
        for col in 0..n {
            let (mut lhs, mut rhs) = (self.outer(col), transposed.outer(col));
            // sorted merge of the two columns
            while let (Some(&a), Some(&b)) = (lhs.first(), rhs.first()) {
                if a <= b {
                    lhs = &lhs[1..];
                }
                if b <= a {
                    rhs = &rhs[1..];
                }
                indices.push(a.min(b));
            }
            indices.extend_from_slice(lhs);
            indices.extend_from_slice(rhs);
            indptr.push(indices.len());
        }
        Ok(Self::new_trusted((n, n), indptr, indices))
    }

    /// Whether `(row, col)` is a structural nonzero.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        col < self.ncols && self.outer(col).binary_search(&row).is_ok()
    }
}

#[cfg(test)]
mod test {
    use super::SparsityPattern;
    use crate::errors::ColoringError;
    use crate::test_data::{jac_4x4, jac_4x4_dense};
    use sprs::{CsMat, TriMat};

    #[test]
    fn from_csmat_both_storages() {
        let csc = jac_4x4();
        let csr = csc.to_csr();
        let from_csc = SparsityPattern::from_csmat(csc.view());
        let from_csr = SparsityPattern::from_csmat(csr.view());
        assert_eq!(from_csc, from_csr);
        assert_eq!(from_csc.shape(), (4, 4));
        assert_eq!(from_csc.indptr(), &[0, 1, 4, 6, 7]);
        assert_eq!(from_csc.indices(), &[2, 0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn from_dense_matches_sparse() {
        let dense = jac_4x4_dense();
        let pattern = SparsityPattern::from_dense(dense.view());
        assert_eq!(pattern, SparsityPattern::from_csmat(jac_4x4().view()));
    }

    #[test]
    fn explicit_zeros_are_structural() {
        let mut tri = TriMat::new((2, 2));
        tri.add_triplet(0, 1, 0.);
        tri.add_triplet(1, 1, 2.);
        let mat: CsMat<f64> = tri.to_csc();
        let pattern = SparsityPattern::from_csmat(mat.view());
        assert_eq!(pattern.nnz(), 2);
        assert!(pattern.contains(0, 1));
        assert!(!pattern.contains(1, 0));
    }

    #[test]
    fn from_triplets() {
        let pattern = SparsityPattern::from_triplets(
            (3, 2),
            &[(2, 0), (0, 0), (1, 1), (2, 0)],
        )
        .unwrap();
        assert_eq!(pattern.indptr(), &[0, 2, 3]);
        assert_eq!(pattern.indices(), &[0, 2, 1]);

        let res = SparsityPattern::from_triplets((3, 2), &[(0, 2)]);
        assert!(matches!(res, Err(ColoringError::InvalidShape { .. })));
    }

    #[test]
    fn try_new_checks_structure() {
        assert!(SparsityPattern::try_new((2, 2), vec![0, 1, 2], vec![1, 0])
            .is_ok());
        // unsorted rows
        assert!(SparsityPattern::try_new((2, 2), vec![0, 2, 2], vec![1, 0])
            .is_err());
        // out of bounds row
        assert!(SparsityPattern::try_new((2, 2), vec![0, 1, 1], vec![2])
            .is_err());
        // bad indptr length
        assert!(SparsityPattern::try_new((2, 2), vec![0, 1], vec![0])
            .is_err());
    }

    #[test]
    fn transpose() {
        let pattern = SparsityPattern::from_csmat(jac_4x4().view());
        let transposed = pattern.transpose();
        assert_eq!(transposed.indptr(), &[0, 2, 3, 5, 7]);
        assert_eq!(transposed.indices(), &[1, 2, 3, 0, 1, 1, 2]);
        assert_eq!(transposed.transpose(), pattern);
    }

    #[test]
    fn symmetrize() {
        let pattern =
            SparsityPattern::from_triplets((3, 3), &[(0, 0), (2, 0), (1, 2)])
                .unwrap();
        assert!(!pattern.is_symmetric());
        let sym = pattern.symmetrize().unwrap();
        assert!(sym.is_symmetric());
        assert_eq!(sym.indptr(), &[0, 2, 3, 5]);
        assert_eq!(sym.indices(), &[0, 2, 2, 0, 1]);

        let rect = SparsityPattern::dense((2, 3));
        assert!(rect.symmetrize().is_err());
    }

    #[test]
    fn special_patterns() {
        let eye = SparsityPattern::eye(3);
        assert!(eye.is_symmetric());
        assert_eq!(eye.max_outer_nnz(), 1);
        let dense = SparsityPattern::dense((3, 2));
        assert_eq!(dense.nnz(), 6);
        assert_eq!(dense.outer(1), &[0, 1, 2]);
        let empty = SparsityPattern::empty((4, 5));
        assert_eq!(empty.nnz(), 0);
        assert_eq!(empty.iter().count(), 0);
    }
}
