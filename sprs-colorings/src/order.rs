//! Vertex orderings for greedy coloring.
//!
//! The order in which vertices are greedily colored does not affect the
//! validity of the coloring, but has a large influence on the number of
//! colors. Static orders only look at the conflict graph once, dynamic
//! orders ([`smallest_last`], [`incidence_degree`] and
//! [`dynamic_largest_first`]) maintain a degree per vertex that evolves as
//! vertices get ordered.
//!
//! All orders break ties deterministically, towards the smallest vertex
//! index, so only [`random`] depends on anything but the graph.

use std::cmp::Reverse;

use priority_queue::PriorityQueue;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use sprs::PermOwnedI;

use crate::graph::ConflictGraph;
use crate::problem::Order;

impl Order {
    /// Compute the visitation order of the vertices of `graph`.
    ///
    /// A seeded random order always gives the same permutation for the same
    /// seed, an unseeded one draws its seed from the thread generator.
    pub fn vertex_order(&self, graph: &ConflictGraph) -> PermOwnedI<usize> {
        let seed = match *self {
            Order::Random { seed } => seed.unwrap_or_else(rand::random),
            _ => 0,
        };
        self.vertex_order_with_rng(graph, &mut Pcg64::seed_from_u64(seed))
    }

    /// Compute the visitation order of the vertices of `graph`, drawing
    /// random orders from `rng`. The seed stored in a random order is
    /// ignored.
    pub fn vertex_order_with_rng<R>(
        &self,
        graph: &ConflictGraph,
        rng: &mut R,
    ) -> PermOwnedI<usize>
    where
        R: Rng + ?Sized,
    {
        let perm = match *self {
            Order::Natural => natural(graph),
            Order::Random { .. } => random(graph, rng),
            Order::LargestFirst => largest_first(graph),
            Order::SmallestLast => smallest_last(graph),
            Order::IncidenceDegree => incidence_degree(graph),
            Order::DynamicLargestFirst => dynamic_largest_first(graph),
        };
        log::trace!("{} order: {:?}", self, perm);
        PermOwnedI::new(perm)
    }
}

pub fn natural(graph: &ConflictGraph) -> Vec<usize> {
    (0..graph.nb_vertices()).collect()
}

/// A uniformly random permutation of the vertices.
pub fn random<R>(graph: &ConflictGraph, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut perm = natural(graph);
    perm.shuffle(rng);
    perm
}

/// Vertices by decreasing degree.
pub fn largest_first(graph: &ConflictGraph) -> Vec<usize> {
    let degrees = graph.degrees();
    let mut perm = natural(graph);
    // stable, so equal degrees stay in index order
    perm.sort_by_key(|&v| Reverse(degrees[v]));
    perm
}

/// Repeatedly remove a vertex of minimum degree in the remaining graph,
/// the order is the reverse of the removal order.
pub fn smallest_last(graph: &ConflictGraph) -> Vec<usize> {
    let nb_vertices = graph.nb_vertices();
    let mut degrees = graph.degrees();
    let mut removed = vec![false; nb_vertices];
    let mut removal = Vec::with_capacity(nb_vertices);

    // The queue pops its maximum, reversing the key pops the vertex with
    // minimum degree then minimum index.
    let mut queue: PriorityQueue<usize, Reverse<(usize, usize)>> = (0
        ..nb_vertices)
        .map(|v| (v, Reverse((degrees[v], v))))
        .collect();

    while let Some((vertex, _)) = queue.pop() {
        removed[vertex] = true;
        removal.push(vertex);
        for &neighbor in graph.neighbors(vertex) {
            if !removed[neighbor] {
                degrees[neighbor] -= 1;
                queue.change_priority(
                    &neighbor,
                    Reverse((degrees[neighbor], neighbor)),
                );
            }
        }
    }

    removal.reverse();
    removal
}

/// Repeatedly pick the vertex with the most already ordered neighbors,
/// then the largest degree.
pub fn incidence_degree(graph: &ConflictGraph) -> Vec<usize> {
    let nb_vertices = graph.nb_vertices();
    let degrees = graph.degrees();
    let mut incidence = vec![0; nb_vertices];
    let mut ordered = vec![false; nb_vertices];
    let mut perm = Vec::with_capacity(nb_vertices);

    let mut queue: PriorityQueue<usize, (usize, usize, Reverse<usize>)> = (0
        ..nb_vertices)
        .map(|v| (v, (0, degrees[v], Reverse(v))))
        .collect();

    while let Some((vertex, _)) = queue.pop() {
        ordered[vertex] = true;
        perm.push(vertex);
        for &neighbor in graph.neighbors(vertex) {
            if !ordered[neighbor] {
                incidence[neighbor] += 1;
                queue.change_priority(
                    &neighbor,
                    (incidence[neighbor], degrees[neighbor], Reverse(neighbor)),
                );
            }
        }
    }
    perm
}

/// Repeatedly pick the vertex with the largest degree in the graph induced
/// by the vertices not ordered yet.
pub fn dynamic_largest_first(graph: &ConflictGraph) -> Vec<usize> {
    let nb_vertices = graph.nb_vertices();
    let mut degrees = graph.degrees();
    let mut ordered = vec![false; nb_vertices];
    let mut perm = Vec::with_capacity(nb_vertices);

    let mut queue: PriorityQueue<usize, (usize, Reverse<usize>)> = (0
        ..nb_vertices)
        .map(|v| (v, (degrees[v], Reverse(v))))
        .collect();

    while let Some((vertex, _)) = queue.pop() {
        ordered[vertex] = true;
        perm.push(vertex);
        for &neighbor in graph.neighbors(vertex) {
            if !ordered[neighbor] {
                degrees[neighbor] -= 1;
                queue.change_priority(
                    &neighbor,
                    (degrees[neighbor], Reverse(neighbor)),
                );
            }
        }
    }
    perm
}
