//! Verification of colorings.
//!
//! These functions do not trust any coloring algorithm: they check the
//! defining property of a valid coloring directly on the pattern or on the
//! conflict graph. They are meant for tests and for validating colorings
//! coming from elsewhere.

use crate::graph::ConflictGraph;
use crate::pattern::SparsityPattern;

/// Whether no two colors of `colors` appear twice in one of `groups`.
fn all_distinct<'a, G>(groups: G, colors: &[usize], ncolors: usize) -> bool
where
    G: Iterator<Item = &'a [usize]>,
{
    let mut seen_in = vec![usize::MAX; ncolors];
    for (group_ind, group) in groups.enumerate() {
        for &vertex in group {
            let color = colors[vertex];
            if seen_in[color] == group_ind {
                return false;
            }
            seen_in[color] = group_ind;
        }
    }
    true
}

fn nb_colors(colors: &[usize]) -> usize {
    colors.iter().max().map_or(0, |&c| c + 1)
}

/// Whether columns sharing a color never have a nonzero in the same row.
pub fn structurally_orthogonal_columns(
    pattern: &SparsityPattern,
    colors: &[usize],
) -> bool {
    if colors.len() != pattern.cols() {
        return false;
    }
    let by_rows = pattern.transpose();
    let rows = (0..by_rows.cols()).map(|row| by_rows.outer(row));
    all_distinct(rows, colors, nb_colors(colors))
}

/// Whether rows sharing a color never have a nonzero in the same column.
pub fn structurally_orthogonal_rows(
    pattern: &SparsityPattern,
    colors: &[usize],
) -> bool {
    if colors.len() != pattern.rows() {
        return false;
    }
    let cols = (0..pattern.cols()).map(|col| pattern.outer(col));
    all_distinct(cols, colors, nb_colors(colors))
}

/// Whether every coefficient of a symmetric matrix can be read directly
/// from its compression by columns: for each nonzero `(i, j)`, either
/// `color(j)` appears once in row `i`, or `color(i)` appears once in row
/// `j`.
pub fn symmetrically_orthogonal_columns(
    pattern: &SparsityPattern,
    colors: &[usize],
) -> bool {
    let sym = match pattern.symmetrize() {
        Ok(sym) => sym,
        Err(_) => return false,
    };
    if colors.len() != sym.cols() {
        return false;
    }
    let alone = |vertex: usize, other: usize| {
        sym.outer(vertex)
            .iter()
            .all(|&k| k == other || colors[k] != colors[other])
    };
    pattern.iter().all(|(i, j)| alone(i, j) || alone(j, i))
}

/// Whether no two conflicting vertices share a color, see
/// [`ConflictGraph::distance`].
pub fn is_proper(graph: &ConflictGraph, colors: &[usize]) -> bool {
    if colors.len() != graph.nb_vertices() {
        return false;
    }
    (0..graph.nb_vertices()).all(|v| {
        graph.neighbors(v).iter().all(|&w| {
            colors[w] != colors[v]
                && (graph.distance() < 2
                    || graph
                        .neighbors(w)
                        .iter()
                        .all(|&x| x == v || colors[x] != colors[v]))
        })
    })
}

/// Whether adjacent vertices have different colors and every path on four
/// vertices uses at least three colors.
pub fn is_star_coloring(graph: &ConflictGraph, colors: &[usize]) -> bool {
    if colors.len() != graph.nb_vertices() {
        return false;
    }
    for b in 0..graph.nb_vertices() {
        for &c in graph.neighbors(b) {
            if colors[b] == colors[c] {
                return false;
            }
            // a bicolored path a - b - c - d
            let has_a = graph
                .neighbors(b)
                .iter()
                .any(|&a| a != c && colors[a] == colors[c]);
            let has_d = graph
                .neighbors(c)
                .iter()
                .any(|&d| d != b && colors[d] == colors[b]);
            if has_a && has_d {
                return false;
            }
        }
    }
    true
}
