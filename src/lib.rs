//! Indirect is a small toolkit for computing the indirect influences and indirect dependences of
//! the vertices in a graph, aggregating paths of every length through a matrix function of the
//! adjacency matrix.
//!
//! Two matrix functions are supported, the heat kernel `e^(k(Aᵗ - I))` and power weighted paths
//! (PWP) `(e^(kAᵗ) - I) / (e^k - 1)`. Both yield a pair of distributions over the vertices.
//!
//! # Basic usage
//!
//! Scores are computed from any [`Network`](graph::Network), the crate ships with a
//! [`Graph`](graph::Graph) structure which can be constructed from one or more
//! [`Edge`](edge::Edge) instances.
//!
//! ```rust
//! use indirect::edge::Edge;
//! use indirect::graph::Graph;
//!
//! // Construct the graph instance, undirected edges count in both directions.
//! let mut graph = Graph::undirected();
//!
//! // Insert some edges, note the IDs can be any type that is `Copy + Eq + Hash + Ord + Debug`.
//! graph.insert(Edge::new("a", "b"));
//! graph.insert(Edge::new("b", "c"));
//! graph.insert(Edge::new("c", "d"));
//!
//! // Compute the scores for both transforms.
//! let heat_kernel = indirect::heat_kernel(&graph, 1.0).unwrap();
//! let pwp = indirect::pwp(&graph, 1.0).unwrap();
//!
//! // The ends of the path are the least influential vertices.
//! assert!(heat_kernel.influences["a"] < heat_kernel.influences["b"]);
//! assert!(pwp.influences["d"] < pwp.influences["c"]);
//! ```
//!
//! A [`Scorer`](influence::Scorer) can be used directly to pick the transform at runtime or to
//! inject a different matrix exponential.

pub mod adjacency;
pub mod edge;
pub mod error;
pub mod expm;
pub mod graph;
pub mod influence;
pub mod transform;

pub use error::{Error, Result};
pub use influence::{heat_kernel, pwp, Scorer, Scores};
pub use transform::{Params, Transform};
