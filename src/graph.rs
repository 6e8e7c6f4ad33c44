//! A module for working with graphs.

use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    fmt::Debug,
    hash::Hash,
};

use crate::edge::Edge;

/// The queries the scoring pipeline needs from a graph.
///
/// Any graph representation can be scored as long as it can enumerate its vertices and weighted
/// edges and report on its directedness and whether it contains parallel edges.
pub trait Network {
    /// The vertex identifier, used as the key in the resulting score mappings.
    type Vertex: Copy + Eq + Hash + Ord + Debug;

    /// Returns every vertex in the graph, including isolated ones. The order is irrelevant.
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// Returns every edge as a `(source, target, weight)` triple.
    ///
    /// For undirected graphs each edge is reported once, in either orientation.
    fn weighted_edges(&self) -> Vec<(Self::Vertex, Self::Vertex, f64)>;

    /// Returns whether the edges are directed.
    fn is_directed(&self) -> bool;

    /// Returns whether two or more edges may join the same (ordered, if directed) pair of
    /// vertices, i.e. whether the graph is a multigraph.
    fn has_parallel_edges(&self) -> bool;
}

/// A weighted graph, made up of vertices and edges.
///
/// Graphs are either directed or undirected and either simple or multigraphs (allowing parallel
/// edges). Edges inserted without an explicit weight carry a weight of `1.0`.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The vertices in the graph, isolated vertices included.
    ///
    /// The use of a `BTreeSet` means we need the `Ord` bound on `T`, which in turn gives a stable
    /// vertex order between computations.
    vertices: BTreeSet<T>,
    /// The edges in the graph mapped to the weight of each parallel copy.
    edges: BTreeMap<Edge<T>, Vec<f64>>,
    directed: bool,
    multi: bool,
}

impl<T> Default for Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty directed graph, equivalent to [`Graph::directed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// assert!(graph.is_directed());
    /// ```
    pub fn new() -> Self {
        Self::directed()
    }

    /// Creates an empty directed simple graph.
    pub fn directed() -> Self {
        Self::with_kind(true, false)
    }

    /// Creates an empty undirected simple graph.
    pub fn undirected() -> Self {
        Self::with_kind(false, false)
    }

    /// Creates an empty multigraph which accepts parallel edges.
    ///
    /// Multigraphs can be built but not scored.
    pub fn multi(directed: bool) -> Self {
        Self::with_kind(directed, true)
    }

    fn with_kind(directed: bool, multi: bool) -> Self {
        Self {
            vertices: Default::default(),
            edges: Default::default(),
            directed,
            multi,
        }
    }

    /// Returns whether the graph is directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns whether the graph accepts parallel edges.
    pub fn is_multi(&self) -> bool {
        self.multi
    }

    /// Iterates over the distinct edges of the graph and the weights of their copies.
    pub fn edges(&self) -> impl Iterator<Item = (&Edge<T>, &[f64])> {
        self.edges
            .iter()
            .map(|(edge, weights)| (edge, weights.as_slice()))
    }

    /// Adds an isolated vertex to the graph, returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: T) -> bool {
        self.vertices.insert(vertex)
    }

    /// Inserts an edge with a weight of `1.0` into the graph.
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        self.insert_weighted(edge, 1.0)
    }

    /// Inserts a weighted edge into the graph.
    ///
    /// Returns `false` if the graph is simple and already contains the edge, in which case the
    /// existing weight is kept. Multigraphs always accept the edge as a new parallel copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    /// use indirect::graph::Graph;
    ///
    /// let mut graph = Graph::undirected();
    ///
    /// assert!(graph.insert_weighted(Edge::new("a", "b"), 2.0));
    /// assert!(!graph.insert_weighted(Edge::new("b", "a"), 3.0));
    /// ```
    pub fn insert_weighted(&mut self, edge: Edge<T>, weight: f64) -> bool {
        let edge = self.normalise(edge);

        self.vertices.insert(*edge.source());
        self.vertices.insert(*edge.target());

        match self.edges.entry(edge) {
            Entry::Vacant(entry) => {
                entry.insert(vec![weight]);
                true
            }
            Entry::Occupied(mut entry) if self.multi => {
                entry.get_mut().push(weight);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Inserts a subset of `(hub, leaf)` edges into the graph.
    pub fn insert_subset(&mut self, hub: T, leaves: &[T]) {
        for leaf in leaves {
            self.insert(Edge::new(hub, *leaf));
        }
    }

    /// Removes an edge (and any parallel copies) from the graph and returns whether it was
    /// present. The endpoints stay in the graph as vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    /// use indirect::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    ///
    /// assert_eq!(graph.remove(&Edge::new("a", "b")), true);
    /// assert_eq!(graph.remove(&Edge::new("a", "c")), false);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let edge = self.normalise(edge.clone());
        self.edges.remove(&edge).is_some()
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        let edge = self.normalise(edge.clone());
        self.edges.contains_key(&edge)
    }

    /// Returns the vertex count of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    /// use indirect::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.add_vertex("c");
    ///
    /// assert_eq!(graph.vertex_count(), 3);
    /// ```
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph, parallel copies included.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    /// use indirect::graph::Graph;
    ///
    /// let mut graph = Graph::undirected();
    ///
    /// graph.insert(Edge::new("a", "b"));
    /// assert_eq!(graph.density(), 1.0);
    ///
    /// graph.insert(Edge::new("a", "c"));
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count, ordered pairs count
        // twice in a directed graph.
        let pec = if self.directed {
            vc * (vc - 1.0)
        } else {
            vc * (vc - 1.0) / 2.0
        };

        ec / pec
    }

    //
    // Private
    //

    /// Undirected edges are keyed by their canonical form.
    fn normalise(&self, edge: Edge<T>) -> Edge<T> {
        if self.directed {
            edge
        } else {
            edge.canonical()
        }
    }
}

impl<T> Network for Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    type Vertex = T;

    fn vertices(&self) -> Vec<T> {
        self.vertices.iter().copied().collect()
    }

    fn weighted_edges(&self) -> Vec<(T, T, f64)> {
        self.edges
            .iter()
            .flat_map(|(edge, weights)| {
                weights
                    .iter()
                    .map(move |weight| (*edge.source(), *edge.target(), *weight))
            })
            .collect()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    /// A multigraph reports parallel edges even while every pair is joined at most once.
    fn has_parallel_edges(&self) -> bool {
        self.multi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! graph {
          ($graph:expr; $($path:expr),*) => {{
              let mut graph = $graph;

              $(
                  let mut iter = $path.into_iter().peekable();
                  while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                      graph.insert(Edge::new(a, *b));
                  }

              )*

              graph
          }}
      }

    #[test]
    fn new() {
        let graph: Graph<()> = Graph::new();

        assert!(graph.is_directed());
        assert!(!graph.is_multi());
    }

    #[test]
    fn insert() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        assert!(graph.insert(edge.clone()));
        assert!(!graph.insert(edge));

        // The reverse edge is distinct in a directed graph.
        assert!(graph.insert(Edge::new("b", "a")));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn insert_undirected() {
        let mut graph = Graph::undirected();

        assert!(graph.insert(Edge::new("b", "a")));
        assert!(!graph.insert(Edge::new("a", "b")));
        assert!(graph.contains(&Edge::new("a", "b")));
        assert!(graph.contains(&Edge::new("b", "a")));

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn insert_keeps_original_weight() {
        let mut graph = Graph::new();

        graph.insert_weighted(Edge::new("a", "b"), 2.0);
        graph.insert_weighted(Edge::new("a", "b"), 5.0);

        assert_eq!(graph.weighted_edges(), vec![("a", "b", 2.0)]);
    }

    #[test]
    fn insert_multi() {
        let mut graph = Graph::multi(true);
        let edge = Edge::new("a", "b");

        assert!(graph.has_parallel_edges());

        assert!(graph.insert(edge.clone()));
        assert!(graph.insert_weighted(edge, 3.0));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.weighted_edges(),
            vec![("a", "b", 1.0), ("a", "b", 3.0)]
        );
    }

    #[test]
    fn insert_subset() {
        let mut graph = Graph::new();

        let (a, b, c, d) = ("a", "b", "c", "d");

        graph.insert(Edge::new(a, b));
        graph.insert(Edge::new(a, c));

        let edges = vec![b, d];
        graph.insert_subset(a, &edges);

        assert!(graph.contains(&Edge::new(a, b)));
        assert!(graph.contains(&Edge::new(a, c)));
        assert!(graph.contains(&Edge::new(a, d)));

        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn remove() {
        let edge = Edge::new("a", "b");
        let uninserted_edge = Edge::new("a", "c");

        let mut graph = Graph::new();
        graph.insert(edge.clone());

        assert!(graph.remove(&edge));
        assert!(!graph.remove(&uninserted_edge));
    }

    #[test]
    fn remove_drops_parallel_copies() {
        let mut graph = Graph::multi(false);
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("b", "a"));

        assert!(graph.remove(&Edge::new("a", "b")));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn contains() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        graph.insert(edge.clone());

        assert!(graph.contains(&edge));
        assert!(!graph.contains(&Edge::new("b", "a")));
        assert!(!graph.contains(&Edge::new("b", "c")));
    }

    #[test]
    fn vertex_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.vertex_count(), 0);

        // Verify two new vertices get added when they don't yet exist in the graph.
        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.vertex_count(), 2);

        // Verify only one new vertex is added when one of them already exists in the graph.
        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.vertex_count(), 3);

        // Isolated vertices count too.
        assert!(graph.add_vertex("d"));
        assert!(!graph.add_vertex("a"));
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn edge_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.edge_count(), 0);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn density() {
        let mut graph = Graph::undirected();
        assert!(graph.density().is_nan());

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.density(), 1.0);

        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.density(), 2.0 / 3.0);
    }

    #[test]
    fn density_directed() {
        let graph = graph!(Graph::directed(); ["a", "b", "c"]);

        // Two of six possible ordered pairs.
        assert_eq!(graph.density(), 2.0 / 6.0);
    }

    #[test]
    fn edges() {
        let mut graph = Graph::multi(false);
        graph.insert_weighted(Edge::new("b", "a"), 2.0);
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("a", "c"));

        let edges: Vec<_> = graph.edges().collect();

        assert_eq!(
            edges,
            vec![
                (&Edge::new("a", "b"), &[2.0, 1.0][..]),
                (&Edge::new("a", "c"), &[1.0][..])
            ]
        );
    }

    #[test]
    fn network_vertices_are_sorted() {
        let graph = graph!(Graph::undirected(); [3, 1, 2]);

        assert_eq!(graph.vertices(), vec![1, 2, 3]);
    }

    #[test]
    fn network_undirected_edges_are_canonical() {
        let graph = graph!(Graph::undirected(); [3, 1, 2]);

        assert_eq!(graph.weighted_edges(), vec![(1, 2, 1.0), (1, 3, 1.0)]);
        assert!(!graph.is_directed());
        assert!(!graph.has_parallel_edges());
    }
}
