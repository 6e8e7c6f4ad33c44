//! Validates a graph and materialises its transposed adjacency matrix.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use tracing::debug;

use crate::{
    error::{Error, Result},
    graph::Network,
};

/// A transposed adjacency matrix along with the vertex each row and column stands for.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared<T> {
    /// `Aᵗ`: entry `(i, j)` is the weight of the edge from vertex `j` to vertex `i`.
    pub matrix: DMatrix<f64>,
    /// Matrix index to vertex, sorted by `T`'s implementation of `Ord`.
    pub index: Vec<T>,
}

impl<T> Prepared<T> {
    /// Returns the number of vertices (the matrix dimension).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns whether the graph had no vertices.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns whether every entry of the matrix is zero, i.e. nothing flows between vertices.
    pub fn is_zero(&self) -> bool {
        self.matrix.iter().all(|w| *w == 0.0)
    }
}

/// Builds the transposed adjacency matrix of a simple graph.
///
/// Undirected graphs are treated as directed in both directions: every edge `{u, v}` is written
/// as `u → v` and `v → u`. Self-loops are written once.
///
/// # Errors
///
/// Returns [`Error::Structural`] if the graph has parallel edges, before any matrix is built.
///
/// # Examples
///
/// ```
/// use nalgebra::dmatrix;
/// use indirect::{adjacency, edge::Edge, graph::Graph};
///
/// let mut graph = Graph::directed();
/// graph.insert(Edge::new("a", "b"));
///
/// let prepared = adjacency::prepare(&graph).unwrap();
///
/// assert_eq!(prepared.index, vec!["a", "b"]);
/// assert_eq!(
///     prepared.matrix,
///     dmatrix![0.0, 0.0;
///              1.0, 0.0]
/// );
/// ```
pub fn prepare<G: Network>(graph: &G) -> Result<Prepared<G::Vertex>> {
    if graph.has_parallel_edges() {
        return Err(Error::Structural {
            reason: "the transform isn't defined for graphs with parallel edges".into(),
        });
    }

    let edges = graph.weighted_edges();

    // Edge endpoints are folded in so a collaborator that only reports connected vertices still
    // yields a complete index.
    let mut vertices = graph.vertices();
    vertices.extend(edges.iter().flat_map(|(u, v, _)| [*u, *v]));
    vertices.sort();
    vertices.dedup();

    let positions: BTreeMap<G::Vertex, usize> = vertices
        .iter()
        .enumerate()
        .map(|(i, &vertex)| (vertex, i))
        .collect();

    let n = vertices.len();
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    let symmetric = !graph.is_directed();

    for (source, target, weight) in &edges {
        let i = positions[source];
        let j = positions[target];

        // Written straight into the transposed slot: the target's row collects what flows in
        // from the source's column.
        matrix[(j, i)] = *weight;
        if symmetric && i != j {
            matrix[(i, j)] = *weight;
        }
    }

    debug!(
        vertices = n,
        edges = edges.len(),
        directed = !symmetric,
        "prepared adjacency matrix"
    );

    Ok(Prepared {
        matrix,
        index: vertices,
    })
}
