/*!
# sprs-colorings

Coloring of sparse matrices for sparse automatic differentiation.

Given only the sparsity pattern of a Jacobian or Hessian, this crate
assigns a color to every column (or row) such that the whole matrix can
be recovered from one matrix-vector (or vector-matrix) product per color.
The colors are computed greedily on a conflict graph derived from the
pattern, in a vertex order chosen among several heuristics.

## Examples

Coloring, compression and decompression of a Jacobian

```rust
use sprs::CsMat;
use sprs_colorings::{compress, compute_coloring, SparsityPattern};
use sprs_colorings::{ColoringProblem, GreedyColoringAlgorithm, Order};

let jac = CsMat::new_csc((4, 4),
                         vec![0, 1, 4, 6, 7],
                         vec![2, 0, 2, 3, 0, 3, 1],
                         vec![1., 2., 5., 6., 3., 7., 4.]);
let pattern = SparsityPattern::from_csmat(jac.view());
let result = compute_coloring(
    &pattern,
    ColoringProblem::default(),
    GreedyColoringAlgorithm::new(Order::LargestFirst),
).unwrap();
assert_eq!(result.coloring.ncolors(), 2);

let compressed = compress(jac.view(), &result.basis).unwrap();
assert_eq!(compressed.dim(), (4, 2));
let recovered = result.index_map.decompress(compressed.view()).unwrap();
assert_eq!(recovered, jac);
```

Hessians use a symmetric structure

```rust
use sprs_colorings::{compute_coloring, SparsityPattern};
use sprs_colorings::{ColoringProblem, GreedyColoringAlgorithm};

let problem = ColoringProblem::from_names("symmetric", "column").unwrap();
let pattern = SparsityPattern::eye(5);
let result = compute_coloring(
    &pattern,
    problem,
    GreedyColoringAlgorithm::default(),
).unwrap();
assert_eq!(result.coloring.colors(), &[0; 5]);
```
*/

pub mod check;
pub mod compression;
pub mod errors;
pub mod graph;
pub mod greedy;
pub mod order;
pub mod pattern;
pub mod problem;

pub use crate::compression::{
    compress, compress_dense, decompress, BasisMatrix, CompressedIndexMap,
};
pub use crate::errors::{ColoringError, Result};
pub use crate::graph::ConflictGraph;
pub use crate::greedy::{Coloring, ColoringEngine, GreedyColoring};
pub use crate::pattern::SparsityPattern;
pub use crate::problem::{
    ColoringProblem, GreedyColoringAlgorithm, Order, Partition, Structure,
};

use ndarray::{Array2, ArrayView2};
use num_traits::Zero;
use sprs::indexing::SpIndex;
use sprs::{CsMat, CsMatViewI};

/// Everything needed to compress and decompress matrices sharing a pattern.
///
/// The result does not depend on the values of the matrices, it can be
/// reused as long as the pattern does not change.
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColoringResult {
    pub problem: ColoringProblem,
    pub coloring: Coloring,
    pub basis: BasisMatrix,
    pub index_map: CompressedIndexMap,
}

impl ColoringResult {
    /// The colors, the basis, and the compressed row and column of every
    /// nonzero.
    pub fn into_parts(
        self,
    ) -> (Vec<usize>, BasisMatrix, (CsMat<usize>, CsMat<usize>)) {
        let maps = (self.index_map.row_inds(), self.index_map.col_inds());
        (self.coloring.into_vec(), self.basis, maps)
    }

    /// Compress a matrix having the colored pattern.
    pub fn compress<N, I, Iptr>(
        &self,
        mat: CsMatViewI<N, I, Iptr>,
    ) -> Result<Array2<N>>
    where
        N: Clone + Zero,
        I: SpIndex,
        Iptr: SpIndex,
    {
        compress(mat, &self.basis)
    }

    /// Recover a matrix having the colored pattern from its compression.
    pub fn decompress<N>(&self, compressed: ArrayView2<N>) -> Result<CsMat<N>>
    where
        N: Clone,
    {
        self.index_map.decompress(compressed)
    }
}

/// Color the columns or rows of `pattern` with the greedy algorithm.
///
/// Fails with `InvalidShape` for a symmetric structure on a non-square
/// pattern.
pub fn compute_coloring(
    pattern: &SparsityPattern,
    problem: ColoringProblem,
    algorithm: GreedyColoringAlgorithm,
) -> Result<ColoringResult> {
    color_pattern(&GreedyColoring, pattern, problem, algorithm.order, false)
}

/// Color the columns or rows of `pattern` with the given engine.
///
/// # Panics
///
/// If the engine returns a coloring in which conflicting vertices share a
/// color.
pub fn compute_coloring_with<E>(
    engine: &E,
    pattern: &SparsityPattern,
    problem: ColoringProblem,
    order: Order,
) -> Result<ColoringResult>
where
    E: ColoringEngine + ?Sized,
{
    color_pattern(engine, pattern, problem, order, true)
}

/// `verify` checks properness of the coloring in release builds as well.
fn color_pattern<E>(
    engine: &E,
    pattern: &SparsityPattern,
    problem: ColoringProblem,
    order: Order,
    verify: bool,
) -> Result<ColoringResult>
where
    E: ColoringEngine + ?Sized,
{
    let graph = ConflictGraph::new(pattern, problem)?;
    let perm = order.vertex_order(&graph);
    let coloring = engine.color(&graph, &perm);
    assert_eq!(
        coloring.len(),
        graph.nb_vertices(),
        "the coloring engine returned a coloring of the wrong size"
    );
    if verify {
        assert!(
            check::is_proper(&graph, coloring.colors()),
            "the coloring engine returned an invalid coloring"
        );
    } else {
        debug_assert!(check::is_proper(&graph, coloring.colors()));
    }
    log::debug!(
        "colored {:?} pattern with {} nonzeros ({}, {} order): {} colors",
        pattern.shape(),
        pattern.nnz(),
        problem,
        order,
        coloring.ncolors()
    );

    let basis = BasisMatrix::new(&coloring, problem.partition);
    let index_map = CompressedIndexMap::new(pattern, &coloring, problem)?;
    Ok(ColoringResult {
        problem,
        coloring,
        basis,
        index_map,
    })
}

#[cfg(test)]
mod test_data;
