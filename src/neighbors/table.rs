//! The flat `Object, Neighbor, Distance` relation produced by every strategy

use crate::spatial::mask::Label;
use std::collections::HashSet;

/// One directed adjacency between two objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborEdge<L> {
    /// Identifier of the object the edge starts from
    pub object: L,
    /// Identifier of the neighboring object
    pub neighbor: L,
    /// Distance between the two, `None` when only adjacency is meaningful
    pub distance: Option<f64>,
}

impl<L: Label> NeighborEdge<L> {
    /// Create an edge
    pub const fn new(object: L, neighbor: L, distance: Option<f64>) -> Self {
        Self {
            object,
            neighbor,
            distance,
        }
    }
}

/// Ordered neighbor edges in the order the strategy discovered them
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborTable<L> {
    edges: Vec<NeighborEdge<L>>,
}

impl<L> Default for NeighborTable<L> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<L: Label> NeighborTable<L> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge
    pub fn push(&mut self, edge: NeighborEdge<L>) {
        self.edges.push(edge);
    }

    /// Number of edges
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edges were found
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate edges in table order
    pub fn iter(&self) -> std::slice::Iter<'_, NeighborEdge<L>> {
        self.edges.iter()
    }

    /// All edges in table order
    pub fn edges(&self) -> &[NeighborEdge<L>] {
        &self.edges
    }

    /// Edges leaving `object`, in table order
    pub fn outgoing(&self, object: L) -> impl Iterator<Item = &NeighborEdge<L>> + '_ {
        self.edges.iter().filter(move |e| e.object == object)
    }

    /// Replace every distance with `None`, keeping adjacency only
    #[must_use]
    pub fn without_distances(self) -> Self {
        self.edges
            .into_iter()
            .map(|e| NeighborEdge {
                distance: None,
                ..e
            })
            .collect()
    }

    /// Whether every edge `(a, b)` has a matching reverse edge `(b, a)`
    ///
    /// An empty table is symmetric.
    pub fn is_symmetric(&self) -> bool {
        let pairs: HashSet<(L, L)> = self.edges.iter().map(|e| (e.object, e.neighbor)).collect();
        pairs.iter().all(|&(a, b)| pairs.contains(&(b, a)))
    }
}

impl<L> FromIterator<NeighborEdge<L>> for NeighborTable<L> {
    fn from_iter<I: IntoIterator<Item = NeighborEdge<L>>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<L> IntoIterator for NeighborTable<L> {
    type Item = NeighborEdge<L>;
    type IntoIter = std::vec::IntoIter<NeighborEdge<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a, L> IntoIterator for &'a NeighborTable<L> {
    type Item = &'a NeighborEdge<L>;
    type IntoIter = std::slice::Iter<'a, NeighborEdge<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
