//! Compression of a sparse matrix by its coloring, and exact recovery of
//! its coefficients from the compressed matrix.
//!
//! For a column partition with `ncolors` colors, a `m x n` matrix `A` is
//! compressed into the `m x ncolors` matrix `A * B`, where the basis `B`
//! has a one at `(j, color(j))`. Column `c` of the compressed matrix is the
//! sum of the columns of color `c`. Since columns sharing a color never
//! have a nonzero in the same row, every coefficient `A[i, j]` can be read
//! back at `(i, color(j))`. Row partitions are the transposed situation.
//!
//! ```rust
//! use ndarray::arr2;
//! use sprs_colorings::{compress_dense, compute_coloring, Order, SparsityPattern};
//! use sprs_colorings::{ColoringProblem, GreedyColoringAlgorithm};
//!
//! let a = arr2(&[[0, 2, 3, 0], [0, 0, 0, 4], [1, 5, 0, 0], [0, 6, 7, 0]]);
//! let pattern = SparsityPattern::from_dense(a.view());
//! let result = compute_coloring(
//!     &pattern,
//!     ColoringProblem::default(),
//!     GreedyColoringAlgorithm::new(Order::Natural),
//! )
//! .unwrap();
//! assert_eq!(result.coloring.colors(), &[0, 1, 0, 0]);
//! let b = compress_dense(a.view(), &result.basis).unwrap();
//! assert_eq!(b, arr2(&[[3, 2], [4, 0], [1, 5], [7, 6]]));
//! let a2 = result.index_map.decompress(b.view()).unwrap();
//! assert_eq!(a2.to_dense(), a);
//! ```

use ndarray::{Array2, ArrayView2, LinalgScalar};
use num_traits::{One, Zero};
use sprs::indexing::SpIndex;
use sprs::{CsMat, CsMatView, CsMatViewI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ColoringError, Result};
use crate::greedy::Coloring;
use crate::pattern::SparsityPattern;
use crate::problem::{ColoringProblem, Partition, Structure};

/// Indicator matrix of a coloring.
///
/// For a column partition, the basis has one row per colored column and
/// one column per color. For a row partition, one row per color and one
/// column per colored row.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BasisParts"))]
pub struct BasisMatrix {
    partition: Partition,
    colors: Vec<usize>,
    ncolors: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BasisParts {
    partition: Partition,
    colors: Vec<usize>,
    ncolors: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<BasisParts> for BasisMatrix {
    type Error = ColoringError;

    fn try_from(parts: BasisParts) -> Result<Self> {
        if parts.colors.iter().any(|&c| c >= parts.ncolors) {
            return Err(ColoringError::InvalidColoring(
                "basis color out of range",
            ));
        }
        Ok(Self {
            partition: parts.partition,
            colors: parts.colors,
            ncolors: parts.ncolors,
        })
    }
}

impl BasisMatrix {
    pub fn new(coloring: &Coloring, partition: Partition) -> Self {
        Self {
            partition,
            colors: coloring.colors().to_vec(),
            ncolors: coloring.ncolors(),
        }
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn ncolors(&self) -> usize {
        self.ncolors
    }

    /// The color of each colored column (or row).
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Number of colored columns (or rows).
    pub fn nb_vertices(&self) -> usize {
        self.colors.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        match self.partition {
            Partition::Column => (self.nb_vertices(), self.ncolors),
            Partition::Row => (self.ncolors, self.nb_vertices()),
        }
    }

    /// Dense representation, with ones where a vertex has a color.
    pub fn to_dense<N>(&self) -> Array2<N>
    where
        N: Zero + One + Clone,
    {
        let mut dense = Array2::zeros(self.shape());
        for (vertex, &color) in self.colors.iter().enumerate() {
            let loc = match self.partition {
                Partition::Column => [vertex, color],
                Partition::Row => [color, vertex],
            };
            dense[loc] = N::one();
        }
        dense
    }

    /// Sparse representation in CSC storage.
    pub fn to_csmat<N>(&self) -> CsMat<N>
    where
        N: One + Clone,
    {
        let nnz = self.nb_vertices();
        match self.partition {
            Partition::Column => {
                let mut indptr = vec![0; self.ncolors + 1];
                for &color in &self.colors {
                    indptr[color + 1] += 1;
                }
                for color in 0..self.ncolors {
                    indptr[color + 1] += indptr[color];
                }
                let mut next = indptr.clone();
                let mut indices = vec![0; nnz];
                for (vertex, &color) in self.colors.iter().enumerate() {
                    indices[next[color]] = vertex;
                    next[color] += 1;
                }
                CsMat::new_csc(self.shape(), indptr, indices, vec![N::one(); nnz])
            }
            Partition::Row => CsMat::new_csc(
                self.shape(),
                (0..=nnz).collect(),
                self.colors.clone(),
                vec![N::one(); nnz],
            ),
        }
    }
}

/// Location in the compressed matrix of every structural nonzero of the
/// original matrix.
///
/// Locations are stored linearized in column major order: the nonzero
/// stored at position `k` of the pattern is found at
/// `(lin[k] % crows, lin[k] / crows)` of the `crows x ccols` compressed
/// matrix.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "IndexMapParts"))]
pub struct CompressedIndexMap {
    pattern: SparsityPattern,
    compressed_shape: (usize, usize),
    linear: Vec<usize>,
    required_shape: (usize, usize),
}

/// Serialized form of an index map, the required shape is recomputed.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct IndexMapParts {
    pattern: SparsityPattern,
    compressed_shape: (usize, usize),
    linear: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<IndexMapParts> for CompressedIndexMap {
    type Error = ColoringError;

    fn try_from(parts: IndexMapParts) -> Result<Self> {
        if parts.linear.len() != parts.pattern.nnz() {
            return Err(ColoringError::InvalidColoring(
                "one compressed location per nonzero expected",
            ));
        }
        let (crows, ccols) = parts.compressed_shape;
        let size = crows.checked_mul(ccols).ok_or(
            ColoringError::InvalidColoring("compressed shape overflows"),
        )?;
        if parts.linear.iter().any(|&lin| lin >= size) {
            return Err(ColoringError::InvalidColoring(
                "compressed location out of bounds",
            ));
        }
        let map = Self::from_parts(
            parts.pattern,
            parts.compressed_shape,
            parts.linear,
        );
        if !map.is_injective_per_column() {
            return Err(ColoringError::InvalidColoring(
                "two nonzeros of a column share a compressed location",
            ));
        }
        Ok(map)
    }
}

impl CompressedIndexMap {
    /// Locate every nonzero of `pattern` in its compressed matrix.
    ///
    /// # Panics
    ///
    /// If the coloring does not allow direct recovery of every
    /// coefficient. This cannot happen with colorings computed by
    /// [`GreedyColoring`](crate::GreedyColoring).
    pub fn new(
        pattern: &SparsityPattern,
        coloring: &Coloring,
        problem: ColoringProblem,
    ) -> Result<Self> {
        let (nrows, ncols) = pattern.shape();
        let ncolors = coloring.ncolors();
        let colors = coloring.colors();
        let compressed_shape = match problem.partition {
            Partition::Column => (nrows, ncolors),
            Partition::Row => (ncolors, ncols),
        };
        let crows = compressed_shape.0;

        let linear: Vec<usize> = match (problem.structure, problem.partition)
        {
            (Structure::Nonsymmetric, Partition::Column) => {
                assert_eq!(colors.len(), ncols);
                pattern
                    .iter()
                    .map(|(row, col)| row + crows * colors[col])
                    .collect()
            }
            (Structure::Nonsymmetric, Partition::Row) => {
                assert_eq!(colors.len(), nrows);
                pattern
                    .iter()
                    .map(|(row, col)| colors[row] + crows * col)
                    .collect()
            }
            (Structure::Symmetric, partition) => {
                let sym = pattern.symmetrize()?;
                assert_eq!(colors.len(), ncols);
                pattern
                    .iter()
                    .map(|(row, col)| match partition {
                        Partition::Column => {
                            let (r, c) =
                                symmetric_location(&sym, colors, row, col);
                            r + crows * c
                        }
                        // same search on the transposed matrix
                        Partition::Row => {
                            let (c, r) =
                                symmetric_location(&sym, colors, col, row);
                            r + crows * c
                        }
                    })
                    .collect()
            }
        };

        let map = Self::from_parts(pattern.clone(), compressed_shape, linear);
        assert!(
            map.is_injective_per_column(),
            "two nonzeros of a column share a compressed location"
        );
        Ok(map)
    }

    /// Every location of `linear` should lie in the compressed shape.
    fn from_parts(
        pattern: SparsityPattern,
        compressed_shape: (usize, usize),
        linear: Vec<usize>,
    ) -> Self {
        let mut map = Self {
            pattern,
            compressed_shape,
            linear,
            required_shape: (0, 0),
        };
        let required_shape = map
            .compressed_coords()
            .fold((0, 0), |(rmax, cmax), (r, c)| {
                (rmax.max(r + 1), cmax.max(c + 1))
            });
        map.required_shape = required_shape;
        map
    }

    /// The shape of the original matrix.
    pub fn shape(&self) -> (usize, usize) {
        self.pattern.shape()
    }

    pub fn compressed_shape(&self) -> (usize, usize) {
        self.compressed_shape
    }

    /// The pattern of the original matrix.
    pub fn pattern(&self) -> &SparsityPattern {
        &self.pattern
    }

    /// Number of structural nonzeros.
    pub fn nnz(&self) -> usize {
        self.linear.len()
    }

    pub fn linear_indices(&self) -> &[usize] {
        &self.linear
    }

    /// `(compressed_row, compressed_col)` of every nonzero, in the
    /// storage order of the pattern.
    pub fn compressed_coords(
        &self,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        let crows = self.compressed_shape.0;
        self.linear.iter().map(move |&lin| (lin % crows, lin / crows))
    }

    /// The compressed row of every nonzero, as a CSC matrix with the
    /// structure of the original one.
    pub fn row_inds(&self) -> CsMat<usize> {
        let data = self.compressed_coords().map(|(r, _)| r).collect();
        self.with_pattern(data)
    }

    /// The compressed column of every nonzero, as a CSC matrix with the
    /// structure of the original one.
    pub fn col_inds(&self) -> CsMat<usize> {
        let data = self.compressed_coords().map(|(_, c)| c).collect();
        self.with_pattern(data)
    }

    fn with_pattern<N>(&self, data: Vec<N>) -> CsMat<N> {
        CsMat::new_csc(
            self.pattern.shape(),
            self.pattern.indptr().to_vec(),
            self.pattern.indices().to_vec(),
            data,
        )
    }

    /// Recover the original matrix from its compressed counterpart.
    pub fn decompress<N>(&self, compressed: ArrayView2<N>) -> Result<CsMat<N>>
    where
        N: Clone,
    {
        self.check_compressed(compressed.dim())?;
        let data = self
            .compressed_coords()
            .map(|loc| compressed[loc].clone())
            .collect();
        Ok(self.with_pattern(data))
    }

    /// Recover the coefficients of the original matrix into `values`, laid
    /// out in the storage order of the pattern (eg the `data` of a CSC
    /// matrix with this pattern). Nothing is written on error.
    pub fn decompress_into<N>(
        &self,
        compressed: ArrayView2<N>,
        values: &mut [N],
    ) -> Result<()>
    where
        N: Clone,
    {
        self.check_compressed(compressed.dim())?;
        if values.len() != self.nnz() {
            return Err(ColoringError::ShapeMismatch {
                expected: (self.nnz(), 1),
                found: (values.len(), 1),
            });
        }
        for (val, loc) in values.iter_mut().zip(self.compressed_coords()) {
            *val = compressed[loc].clone();
        }
        Ok(())
    }

    fn check_compressed(&self, dim: (usize, usize)) -> Result<()> {
        let (rows, cols) = self.required_shape;
        if dim.0 < rows || dim.1 < cols {
            return Err(ColoringError::ShapeMismatch {
                expected: self.required_shape,
                found: dim,
            });
        }
        Ok(())
    }

    fn is_injective_per_column(&self) -> bool {
        let indptr = self.pattern.indptr();
        indptr.windows(2).all(|w| {
            let mut locs = self.linear[w[0]..w[1]].to_vec();
            locs.sort_unstable();
            locs.windows(2).all(|l| l[0] != l[1])
        })
    }
}

/// Where to read the coefficient `(row, col)` of a symmetric matrix
/// compressed by columns: either at `(row, color(col))` if `col` is the
/// only member of its color in the neighborhood of `row`, or at the
/// transposed location `(col, color(row))`.
fn symmetric_location(
    sym: &SparsityPattern,
    colors: &[usize],
    row: usize,
    col: usize,
) -> (usize, usize) {
    let alone = |vertex: usize, other: usize| {
        sym.outer(vertex)
            .iter()
            .all(|&k| k == other || colors[k] != colors[other])
    };
    if alone(row, col) {
        (row, colors[col])
    } else {
        assert!(
            alone(col, row),
            "coefficient ({row}, {col}) cannot be recovered directly"
        );
        (col, colors[row])
    }
}

fn check_basis(
    basis: &BasisMatrix,
    shape: (usize, usize),
) -> Result<()> {
    let (nrows, ncols) = shape;
    match basis.partition() {
        Partition::Column if basis.nb_vertices() != ncols => {
            Err(ColoringError::ShapeMismatch {
                expected: (nrows, basis.nb_vertices()),
                found: shape,
            })
        }
        Partition::Row if basis.nb_vertices() != nrows => {
            Err(ColoringError::ShapeMismatch {
                expected: (basis.nb_vertices(), ncols),
                found: shape,
            })
        }
        _ => Ok(()),
    }
}

/// Compress a sparse matrix: `mat * basis` for a column partition,
/// `basis * mat` for a row partition.
pub fn compress<N, I, Iptr>(
    mat: CsMatViewI<N, I, Iptr>,
    basis: &BasisMatrix,
) -> Result<Array2<N>>
where
    N: Clone + Zero,
    I: SpIndex,
    Iptr: SpIndex,
{
    let shape = mat.shape();
    check_basis(basis, shape)?;
    let colors = basis.colors();
    let partition = basis.partition();
    let out_shape = match partition {
        Partition::Column => (shape.0, basis.ncolors()),
        Partition::Row => (basis.ncolors(), shape.1),
    };
    let mut compressed = Array2::<N>::zeros(out_shape);
    for (val, (row, col)) in mat.iter() {
        let (row, col) = (row.index(), col.index());
        let loc = match partition {
            Partition::Column => [row, colors[col]],
            Partition::Row => [colors[row], col],
        };
        let acc = &mut compressed[loc];
        *acc = acc.clone() + val.clone();
    }
    Ok(compressed)
}

/// Compress a dense matrix: `mat * basis` for a column partition,
/// `basis * mat` for a row partition.
pub fn compress_dense<N>(
    mat: ArrayView2<N>,
    basis: &BasisMatrix,
) -> Result<Array2<N>>
where
    N: LinalgScalar,
{
    check_basis(basis, mat.dim())?;
    let dense_basis = basis.to_dense::<N>();
    Ok(match basis.partition() {
        Partition::Column => mat.dot(&dense_basis),
        Partition::Row => dense_basis.dot(&mat),
    })
}

/// Recover a sparse matrix from its compressed counterpart, given the
/// compressed row and column of each of its nonzeros as two matrices
/// sharing the structure of the result.
pub fn decompress<N>(
    compressed: ArrayView2<N>,
    row_inds: CsMatView<usize>,
    col_inds: CsMatView<usize>,
) -> Result<CsMat<N>>
where
    N: Clone,
{
    if !row_inds.is_csc() || !col_inds.is_csc() {
        return decompress(
            compressed,
            row_inds.to_csc().view(),
            col_inds.to_csc().view(),
        );
    }
    let pattern = SparsityPattern::from_csmat(row_inds);
    if pattern != SparsityPattern::from_csmat(col_inds) {
        return Err(ColoringError::ShapeMismatch {
            expected: row_inds.shape(),
            found: col_inds.shape(),
        });
    }
    let (crows, ccols) = compressed.dim();
    let mut data = Vec::with_capacity(row_inds.nnz());
    for (&r, &c) in row_inds.data().iter().zip(col_inds.data()) {
        if r >= crows || c >= ccols {
            let required = row_inds
                .data()
                .iter()
                .zip(col_inds.data())
                .fold((0, 0), |(rmax, cmax), (&r, &c)| {
                    (rmax.max(r + 1), cmax.max(c + 1))
                });
            return Err(ColoringError::ShapeMismatch {
                expected: required,
                found: (crows, ccols),
            });
        }
        data.push(compressed[[r, c]].clone());
    }
    Ok(CsMat::new_csc(
        pattern.shape(),
        pattern.indptr().to_vec(),
        pattern.indices().to_vec(),
        data,
    ))
}
