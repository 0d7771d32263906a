//! Greedy coloring of conflict graphs.

use sprs::PermOwnedI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ColoringError, Result};
use crate::graph::ConflictGraph;

/// A color per vertex. Colors are contiguous: with `ncolors` colors, every
/// color in `0..ncolors` is given to at least one vertex.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ColoringParts"))]
pub struct Coloring {
    colors: Vec<usize>,
    ncolors: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ColoringParts {
    colors: Vec<usize>,
    ncolors: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<ColoringParts> for Coloring {
    type Error = ColoringError;

    fn try_from(parts: ColoringParts) -> Result<Self> {
        let coloring = Self::try_new(parts.colors)?;
        if coloring.ncolors != parts.ncolors {
            return Err(ColoringError::InvalidColoring(
                "ncolors does not match the colors",
            ));
        }
        Ok(coloring)
    }
}

impl Coloring {
    /// # Panics
    ///
    /// If the colors are not contiguous.
    pub fn new(colors: Vec<usize>) -> Self {
        match Self::try_new(colors) {
            Ok(coloring) => coloring,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fails with `InvalidColoring` if the colors are not contiguous.
    pub fn try_new(colors: Vec<usize>) -> Result<Self> {
        let ncolors = colors.iter().max().map_or(0, |&c| c + 1);
        let mut used = vec![false; ncolors];
        for &color in &colors {
            used[color] = true;
        }
        if !used.iter().all(|&u| u) {
            return Err(ColoringError::InvalidColoring(
                "colors should be contiguous",
            ));
        }
        Ok(Self { colors, ncolors })
    }

    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    pub fn color(&self, vertex: usize) -> usize {
        self.colors[vertex]
    }

    pub fn ncolors(&self) -> usize {
        self.ncolors
    }

    /// Number of colored vertices.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The vertices of each color, in increasing order.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.ncolors];
        for (vertex, &color) in self.colors.iter().enumerate() {
            groups[color].push(vertex);
        }
        groups
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.colors
    }
}

/// Something able to color a conflict graph.
///
/// Implementations must return a contiguous coloring in which no two
/// vertices in conflict share a color. Two vertices are in conflict when
/// they are adjacent, or, for a graph of distance 2, when they have a
/// common neighbor.
pub trait ColoringEngine {
    fn color(
        &self,
        graph: &ConflictGraph,
        order: &PermOwnedI<usize>,
    ) -> Coloring;
}

/// Give each vertex, in turn, the smallest color not forbidden by the
/// vertices it conflicts with.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedyColoring;

const UNCOLORED: usize = usize::MAX;

fn forbid(forbidden: &mut Vec<usize>, color: usize, vertex: usize) {
    if color == UNCOLORED {
        return;
    }
    if color >= forbidden.len() {
        forbidden.resize(color + 1, UNCOLORED);
    }
    forbidden[color] = vertex;
}

impl ColoringEngine for GreedyColoring {
    fn color(
        &self,
        graph: &ConflictGraph,
        order: &PermOwnedI<usize>,
    ) -> Coloring {
        let nb_vertices = graph.nb_vertices();
        assert_eq!(order.dim(), nb_vertices);
        let mut colors = vec![UNCOLORED; nb_vertices];
        // forbidden[c] == v iff color c is taken by a vertex conflicting
        // with v, which avoids clearing between vertices
        let mut forbidden: Vec<usize> = Vec::with_capacity(graph.max_degree());

        for ind in 0..nb_vertices {
            let vertex = order.at(ind);
            for &neighbor in graph.neighbors(vertex) {
                forbid(&mut forbidden, colors[neighbor], vertex);
                if graph.distance() == 2 {
                    for &other in graph.neighbors(neighbor) {
                        if other != vertex {
                            forbid(&mut forbidden, colors[other], vertex);
                        }
                    }
                }
            }
            let color = forbidden
                .iter()
                .position(|&v| v != vertex)
                .unwrap_or(forbidden.len());
            colors[vertex] = color;
        }

        Coloring::new(colors)
    }
}
