//! Options describing a coloring problem and the greedy algorithm used to
//! solve it.
//!
//! All options are closed enumerations, and can be parsed from their
//! snake case names:
//!
//! ```rust
//! use sprs_colorings::{Order, Partition, Structure};
//! let structure: Structure = "symmetric".parse().unwrap();
//! let partition: Partition = "row".parse().unwrap();
//! let order: Order = "largest_first".parse().unwrap();
//! assert_eq!(structure, Structure::Symmetric);
//! assert_eq!(partition, Partition::Row);
//! assert_eq!(order, Order::LargestFirst);
//! assert!("diagonal".parse::<Structure>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ColoringError;

/// Whether the matrix to color should be seen as structurally symmetric.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Structure {
    /// Jacobian-like matrices, rows and columns are unrelated.
    #[default]
    Nonsymmetric,
    /// Hessian-like matrices, the pattern is the adjacency of an
    /// undirected graph.
    Symmetric,
}

/// Whether colors are given to columns or to rows.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Partition {
    /// Compression by matrix-vector products, `A * B`.
    #[default]
    Column,
    /// Compression by vector-matrix products, `B * A`.
    Row,
}

/// The order in which vertices are visited by the greedy coloring.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Order {
    /// Vertices in increasing index order.
    #[default]
    Natural,
    /// A uniformly random permutation. A seeded order is reproducible.
    Random { seed: Option<u64> },
    /// Static decreasing degree order.
    LargestFirst,
    /// Reverse of the order of repeated removal of a minimum degree vertex.
    SmallestLast,
    /// Repeatedly pick the vertex with the most already ordered neighbors.
    IncidenceDegree,
    /// Repeatedly pick the vertex with the largest degree among the
    /// vertices not ordered yet.
    DynamicLargestFirst,
}

impl Order {
    /// A random order drawn from a generator seeded with `seed`.
    pub fn random(seed: u64) -> Self {
        Self::Random { seed: Some(seed) }
    }

    /// Whether the order depends on the degrees of the remaining vertices,
    /// and thus has to be computed incrementally.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Natural | Self::Random { .. } | Self::LargestFirst => false,
            Self::SmallestLast
            | Self::IncidenceDegree
            | Self::DynamicLargestFirst => true,
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonsymmetric => f.write_str("nonsymmetric"),
            Self::Symmetric => f.write_str("symmetric"),
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => f.write_str("column"),
            Self::Row => f.write_str("row"),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural => f.write_str("natural"),
            Self::Random { seed: None } => f.write_str("random"),
            Self::Random { seed: Some(seed) } => write!(f, "random({seed})"),
            Self::LargestFirst => f.write_str("largest_first"),
            Self::SmallestLast => f.write_str("smallest_last"),
            Self::IncidenceDegree => f.write_str("incidence_degree"),
            Self::DynamicLargestFirst => f.write_str("dynamic_largest_first"),
        }
    }
}

impl FromStr for Structure {
    type Err = ColoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonsymmetric" => Ok(Self::Nonsymmetric),
            "symmetric" => Ok(Self::Symmetric),
            _ => Err(ColoringError::InvalidStructure(s.to_owned())),
        }
    }
}

impl FromStr for Partition {
    type Err = ColoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column" => Ok(Self::Column),
            "row" => Ok(Self::Row),
            _ => Err(ColoringError::InvalidPartition(s.to_owned())),
        }
    }
}

impl FromStr for Order {
    type Err = ColoringError;

    /// Parse an order name. `"random"` gives an unseeded order, use
    /// [`Order::random`] for a reproducible one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "natural" => Ok(Self::Natural),
            "random" => Ok(Self::Random { seed: None }),
            // alias without the underscore
            "largest_first" | "largestfirst" => Ok(Self::LargestFirst),
            "smallest_last" => Ok(Self::SmallestLast),
            "incidence_degree" => Ok(Self::IncidenceDegree),
            "dynamic_largest_first" => Ok(Self::DynamicLargestFirst),
            _ => Err(ColoringError::InvalidOrder(s.to_owned())),
        }
    }
}

/// The kind of matrix being colored and the kind of compression wanted.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColoringProblem {
    pub structure: Structure,
    pub partition: Partition,
}

impl ColoringProblem {
    pub fn new(structure: Structure, partition: Partition) -> Self {
        Self {
            structure,
            partition,
        }
    }

    /// Parse both options from their names.
    pub fn from_names(structure: &str, partition: &str) -> crate::Result<Self> {
        Ok(Self::new(structure.parse()?, partition.parse()?))
    }
}

impl fmt::Display for ColoringProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.structure, self.partition)
    }
}

/// Greedy coloring with direct decompression.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreedyColoringAlgorithm {
    pub order: Order,
}

impl GreedyColoringAlgorithm {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
