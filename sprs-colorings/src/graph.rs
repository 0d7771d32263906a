//! Conflict graphs: which vertices must not share a color.
//!
//! The vertices are the columns (column partition), the rows (row
//! partition) or the shared row/column indices (symmetric structure) of
//! the pattern. For a nonsymmetric structure, the graph is the column
//! (or row) intersection graph and a proper coloring of it is all that is
//! needed for direct decompression. For a symmetric structure, the graph
//! is the adjacency graph of the pattern and colors must also differ
//! between vertices sharing a neighbor, see [`ConflictGraph::distance`].

use smallvec::SmallVec;

use crate::errors::Result;
use crate::pattern::SparsityPattern;
use crate::problem::{ColoringProblem, Partition, Structure};

/// An undirected graph without self loops, in compressed adjacency form.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ConflictGraph {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    distance: usize,
}

impl ConflictGraph {
    /// Build the conflict graph of `pattern` for the given problem.
    ///
    /// Fails with `InvalidShape` for a symmetric structure on a non-square
    /// pattern. An asymmetric pattern is symmetrized for a symmetric
    /// structure.
    pub fn new(
        pattern: &SparsityPattern,
        problem: ColoringProblem,
    ) -> Result<Self> {
        let graph = match (problem.structure, problem.partition) {
            (Structure::Nonsymmetric, Partition::Column) => {
                Self::column_intersection(pattern)
            }
            (Structure::Nonsymmetric, Partition::Row) => {
                Self::column_intersection(&pattern.transpose())
            }
            (Structure::Symmetric, _) => {
                Self::adjacency(&pattern.symmetrize()?)
            }
        };
        log::trace!(
            "conflict graph for {}: {} vertices, {} edges",
            problem,
            graph.nb_vertices(),
            graph.nb_edges()
        );
        Ok(graph)
    }

    /// Columns are adjacent when they have a nonzero in a common row.
    pub fn column_intersection(pattern: &SparsityPattern) -> Self {
        let by_rows = pattern.transpose();
        let ncols = pattern.cols();
        let mut indptr = Vec::with_capacity(ncols + 1);
        let mut indices = Vec::new();
        let mut marker = vec![usize::MAX; ncols];
        let mut neighbors: SmallVec<[usize; 32]> = SmallVec::new();
        indptr.push(0);
        for col in 0..ncols {
            neighbors.clear();
            for &row in pattern.outer(col) {
                for &other in by_rows.outer(row) {
                    if other != col && marker[other] != col {
                        marker[other] = col;
                        neighbors.push(other);
                    }
                }
            }
            neighbors.sort_unstable();
            indices.extend_from_slice(&neighbors);
            indptr.push(indices.len());
        }
        Self {
            indptr,
            indices,
            distance: 1,
        }
    }

    /// The adjacency graph of a symmetric pattern, diagonal entries are
    /// dropped.
    pub fn adjacency(pattern: &SparsityPattern) -> Self {
        debug_assert!(pattern.is_symmetric());
        let n = pattern.cols();
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(pattern.nnz());
        indptr.push(0);
        for vertex in 0..n {
            indices.extend(
                pattern.outer(vertex).iter().filter(|&&other| other != vertex),
            );
            indptr.push(indices.len());
        }
        Self {
            indptr,
            indices,
            distance: 2,
        }
    }

    /// Build a graph from adjacency lists. Every edge should be listed
    /// from both of its ends.
    pub fn from_adjacency_lists(lists: &[Vec<usize>], distance: usize) -> Self {
        assert!(distance == 1 || distance == 2);
        let mut indptr = Vec::with_capacity(lists.len() + 1);
        let mut indices = Vec::new();
        indptr.push(0);
        let mut neighbors: SmallVec<[usize; 32]> = SmallVec::new();
        for (vertex, list) in lists.iter().enumerate() {
            neighbors.clear();
            neighbors.extend(list.iter().copied().filter(|&v| v != vertex));
            neighbors.sort_unstable();
            neighbors.dedup();
            indices.extend_from_slice(&neighbors);
            indptr.push(indices.len());
        }
        let graph = Self {
            indptr,
            indices,
            distance,
        };
        debug_assert!(graph.is_undirected());
        graph
    }

    pub fn nb_vertices(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Number of undirected edges.
    pub fn nb_edges(&self) -> usize {
        self.indices.len() / 2
    }

    /// The sorted neighbors of `vertex`.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.indices[self.indptr[vertex]..self.indptr[vertex + 1]]
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.indptr[vertex + 1] - self.indptr[vertex]
    }

    pub fn degrees(&self) -> Vec<usize> {
        self.indptr.windows(2).map(|w| w[1] - w[0]).collect()
    }

    pub fn max_degree(&self) -> usize {
        self.indptr
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }

    /// 1 if only adjacent vertices conflict, 2 if vertices sharing a
    /// neighbor conflict as well.
    pub fn distance(&self) -> usize {
        self.distance
    }

    fn is_undirected(&self) -> bool {
        (0..self.nb_vertices()).all(|v| {
            self.neighbors(v)
                .iter()
                .all(|&w| self.neighbors(w).binary_search(&v).is_ok())
        })
    }
}
