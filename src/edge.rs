//! A module for working with edges.

/// A pair of vertices representing a graph edge, directed from `source` to `target`.
///
/// Whether the direction carries meaning is up to the containing graph: an undirected
/// [`Graph`](crate::graph::Graph) stores its edges in [`canonical`](Edge::canonical) form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_ne!(edge, Edge::new("b", "a"));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the vertex the edge leaves from.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the vertex the edge points to.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the same edge pointing the other way.
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Orders the endpoints so that `source <= target`.
    ///
    /// Two edges joining the same pair of vertices share a canonical form regardless of their
    /// direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::edge::Edge;
    ///
    /// assert_eq!(Edge::new("b", "a").canonical(), Edge::new("a", "b"));
    /// ```
    pub fn canonical(self) -> Self
    where
        T: Ord,
    {
        if self.source > self.target {
            self.reversed()
        } else {
            self
        }
    }
}
