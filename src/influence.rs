//! Indirect influences and dependences computed from a matrix function of the adjacency matrix.
//!
//! The transposed adjacency matrix `Aᵗ` of a graph is run through a
//! [`Transform`](crate::transform::Transform), aggregating the weights of paths of every length
//! into a single matrix `T`. Summing `T`'s columns gives each vertex's indirect influence (how
//! much it reaches the rest of the graph as a source), summing its rows gives each vertex's
//! indirect dependence (how much it's reached as a sink). Both vectors are then normalised into
//! distributions.

use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};

use tracing::{debug, instrument, trace};

use crate::{
    adjacency::{self, Prepared},
    error::{Error, Result},
    expm::{self, MatrixExponential},
    graph::Network,
    transform::Params,
};

/// Normalised scores below zero but above this are floating point noise and are clamped to zero.
const NEGATIVE_TOLERANCE: f64 = 1e-12;

/// The indirect influence and dependence of every vertex in a graph.
///
/// Each mapping contains every vertex exactly once and its values sum to `1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scores<T>
where
    T: Eq + Hash,
{
    /// How much each vertex, as a source, reaches the rest of the graph.
    pub influences: HashMap<T, f64>,
    /// How much each vertex, as a sink, is reached by the rest of the graph.
    pub dependences: HashMap<T, f64>,
}

impl<T> Scores<T>
where
    T: Copy + Eq + Hash + Ord,
{
    /// Returns the influence of a vertex, if it's part of the graph.
    pub fn influence(&self, vertex: &T) -> Option<f64> {
        self.influences.get(vertex).copied()
    }

    /// Returns the dependence of a vertex, if it's part of the graph.
    pub fn dependence(&self, vertex: &T) -> Option<f64> {
        self.dependences.get(vertex).copied()
    }

    /// Returns the vertices ordered from most to least influential. Ties are ordered by vertex.
    pub fn ranked_influences(&self) -> Vec<(T, f64)> {
        ranked(&self.influences)
    }

    /// Returns the vertices ordered from most to least dependent. Ties are ordered by vertex.
    pub fn ranked_dependences(&self) -> Vec<(T, f64)> {
        ranked(&self.dependences)
    }
}

/// Computes [`Scores`] with an injected matrix exponential.
///
/// The scorer holds no state between calls and can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use indirect::{edge::Edge, graph::Graph, influence::Scorer, transform::Params};
///
/// let mut graph = Graph::undirected();
/// graph.insert(Edge::new("a", "b"));
/// graph.insert(Edge::new("a", "c"));
///
/// let scores = Scorer::new().score(&graph, &Params::pwp(0.5)).unwrap();
///
/// // The hub is both the most influential and the most dependent vertex.
/// assert_eq!(scores.ranked_influences()[0].0, "a");
/// assert_eq!(scores.ranked_dependences()[0].0, "a");
/// ```
#[derive(Clone)]
pub struct Scorer {
    expm: Option<Arc<dyn MatrixExponential>>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("expm", &self.expm.as_ref().map(|expm| expm.name()))
            .finish()
    }
}

impl Scorer {
    /// Creates a scorer backed by the matrix exponential compiled into this build.
    pub fn new() -> Self {
        Self {
            expm: expm::default_backend(),
        }
    }

    /// Creates a scorer backed by the given matrix exponential.
    pub fn with_backend(expm: Arc<dyn MatrixExponential>) -> Self {
        Self { expm: Some(expm) }
    }

    /// Creates a scorer without a matrix exponential, every computation will fail with
    /// [`Error::MissingDependency`] until one is provided.
    pub fn without_backend() -> Self {
        Self { expm: None }
    }

    /// Returns the name of the matrix exponential backing this scorer, if any.
    pub fn backend(&self) -> Option<&'static str> {
        self.expm.as_ref().map(|expm| expm.name())
    }

    /// Computes the indirect influences and dependences of every vertex in `graph`.
    ///
    /// # Errors
    ///
    /// - [`Error::Structural`] if the graph is a multigraph.
    /// - [`Error::DegenerateParameter`] if `params.k` isn't valid for the transform, or is so
    ///   large that `e^k` leaves the range of an `f64`.
    /// - [`Error::DegenerateInput`] if nothing flows between the vertices (e.g. no edges).
    /// - [`Error::MissingDependency`] if the scorer has no matrix exponential.
    #[instrument(skip(self, graph, params), fields(transform = %params.transform, k = params.k))]
    pub fn score<G: Network>(&self, graph: &G, params: &Params) -> Result<Scores<G::Vertex>> {
        let prepared = adjacency::prepare(graph)?;
        self.score_prepared(&prepared, params)
    }

    /// Computes the scores from an already prepared adjacency matrix.
    ///
    /// Useful when scoring the same graph with several parameters, see [`Scorer::score`] for the
    /// errors. The matrix must be square with one row per indexed vertex, otherwise
    /// [`Error::Structural`] is returned.
    pub fn score_prepared<T>(&self, prepared: &Prepared<T>, params: &Params) -> Result<Scores<T>>
    where
        T: Copy + Eq + Hash,
    {
        let (rows, columns) = prepared.matrix.shape();
        if rows != columns || rows != prepared.index.len() {
            return Err(Error::Structural {
                reason: format!(
                    "a {rows}x{columns} matrix can't be scored against {} vertices",
                    prepared.index.len()
                ),
            });
        }

        let Params { k, transform } = *params;
        transform.check(k)?;

        if prepared.is_zero() {
            return Err(Error::DegenerateInput {
                reason: "the adjacency matrix is zero, nothing flows between vertices".into(),
            });
        }

        let expm = self.expm.as_deref().ok_or(Error::MissingDependency {
            capability: "matrix exponential",
        })?;

        debug!(
            %transform,
            backend = expm.name(),
            vertices = prepared.len(),
            "applying transform"
        );

        let matrix = transform.apply(&prepared.matrix, k, expm);

        // The adjacency matrix isn't zero, so neither is the exact transform. A zero or non-finite
        // result means `e^k` over- or underflowed.
        if matrix.iter().any(|w| !w.is_finite()) || matrix.iter().all(|w| *w == 0.0) {
            return Err(Error::DegenerateParameter { transform, k });
        }

        // Reducing over the rows yields the column sums, and vice versa.
        let influences = normalise(matrix.row_sum().iter().copied(), "influences")?;
        let dependences = normalise(matrix.column_sum().iter().copied(), "dependences")?;

        Ok(Scores {
            influences: prepared.index.iter().copied().zip(influences).collect(),
            dependences: prepared.index.iter().copied().zip(dependences).collect(),
        })
    }
}

/// Computes the heat kernel indirect influences and dependences of `graph` with scale `k`.
///
/// `k` has to be finite and non-negative. Large values overflow the exponential: past roughly
/// `k = 700` (less on dense or heavily weighted graphs) the call fails with
/// [`Error::DegenerateParameter`].
///
/// # Examples
///
/// ```
/// use indirect::{edge::Edge, graph::Graph};
///
/// let mut graph = Graph::undirected();
/// for (a, b) in [(0, 1), (1, 2), (2, 3)] {
///     graph.insert(Edge::new(a, b));
/// }
///
/// let scores = indirect::heat_kernel(&graph, 1.0).unwrap();
///
/// let total: f64 = scores.influences.values().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
pub fn heat_kernel<G: Network>(graph: &G, k: f64) -> Result<Scores<G::Vertex>> {
    Scorer::new().score(graph, &Params::heat_kernel(k))
}

/// Computes the PWP indirect influences and dependences of `graph` with scale `k`.
///
/// `k` has to be finite and positive. Large values overflow the exponential: past roughly
/// `k = 700` (less on dense or heavily weighted graphs) the call fails with
/// [`Error::DegenerateParameter`].
///
/// # Examples
///
/// ```
/// use indirect::{edge::Edge, error::Error, graph::Graph};
///
/// let mut graph = Graph::directed();
/// graph.insert(Edge::new("a", "b"));
///
/// let scores = indirect::pwp(&graph, 1.0).unwrap();
/// assert!(scores.influence(&"a").unwrap() > 0.99);
///
/// assert!(matches!(
///     indirect::pwp(&graph, 0.0),
///     Err(Error::DegenerateParameter { .. })
/// ));
/// ```
pub fn pwp<G: Network>(graph: &G, k: f64) -> Result<Scores<G::Vertex>> {
    Scorer::new().score(graph, &Params::pwp(k))
}

//
// Helpers
//

/// Scales the raw sums so they add up to `1`.
fn normalise(raw: impl Iterator<Item = f64>, what: &str) -> Result<Vec<f64>> {
    let raw: Vec<f64> = raw.collect();
    let sum: f64 = raw.iter().sum();

    trace!(what, sum, "raw reduction");

    if sum == 0.0 || !sum.is_finite() {
        return Err(Error::DegenerateInput {
            reason: format!("the {what} sum to {sum} and can't be normalised"),
        });
    }

    raw.into_iter()
        .map(|value| {
            let value = value / sum;

            if value >= 0.0 {
                Ok(value)
            } else if value > -NEGATIVE_TOLERANCE {
                Ok(0.0)
            } else {
                Err(Error::DegenerateInput {
                    reason: format!("the {what} contain a negative score ({value})"),
                })
            }
        })
        .collect()
}

fn ranked<T: Copy + Ord>(scores: &HashMap<T, f64>) -> Vec<(T, f64)> {
    let mut pairs: Vec<(T, f64)> = scores.iter().map(|(v, s)| (*v, *s)).collect();

    pairs.sort_unstable_by(|(a, x), (b, y)| y.total_cmp(x).then_with(|| a.cmp(b)));

    pairs
}
