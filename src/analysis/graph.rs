//! Neighbor graphs built from measured tables
//!
//! A table whose every edge has its reverse collapses to an undirected graph
//! with one edge per pair; any other table becomes a directed graph that keeps
//! each edge as measured. Nodes can carry per-object attributes such as mean
//! intensities, and the graph exports to Graphviz DOT.

use crate::io::table::ObjectAttributes;
use crate::neighbors::table::NeighborTable;
use crate::spatial::mask::Label;
use petgraph::EdgeType;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, Graph, NodeIndex, UnGraph};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Graph node for one object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode<L> {
    /// Object identifier
    pub label: L,
    /// Named numeric attributes of the object
    pub attributes: Vec<(String, f64)>,
}

impl<L: Label> fmt::Display for ObjectNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Graph edge weight: the measured distance, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistance(pub Option<f64>);

impl fmt::Display for EdgeDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.map_or(Ok(()), |d| write!(f, "{d}"))
    }
}

enum GraphKind<L> {
    Directed(DiGraph<ObjectNode<L>, EdgeDistance>),
    Undirected(UnGraph<ObjectNode<L>, EdgeDistance>),
}

/// Object graph over a neighbor table
pub struct NeighborGraph<L> {
    graph: GraphKind<L>,
    index: HashMap<L, NodeIndex>,
}

impl<L: Label> NeighborGraph<L> {
    /// Build a graph from a neighbor table
    ///
    /// `objects` adds nodes for objects without neighbors; `attributes`
    /// attaches per-object values to the nodes that have them.
    pub fn from_table(
        table: &NeighborTable<L>,
        objects: Option<&[L]>,
        attributes: Option<&ObjectAttributes<L>>,
    ) -> Self {
        let mut labels: BTreeSet<L> = objects.unwrap_or_default().iter().copied().collect();
        for edge in table {
            labels.insert(edge.object);
            labels.insert(edge.neighbor);
        }

        let nodes: Vec<ObjectNode<L>> = labels
            .into_iter()
            .map(|label| ObjectNode {
                label,
                attributes: attributes
                    .and_then(|a| a.get(label))
                    .map(|pairs| {
                        pairs
                            .into_iter()
                            .map(|(name, value)| (name.to_string(), value))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        if table.is_symmetric() {
            let (graph, index) = build(nodes, table, true);
            Self {
                graph: GraphKind::Undirected(graph),
                index,
            }
        } else {
            let (graph, index) = build(nodes, table, false);
            Self {
                graph: GraphKind::Directed(graph),
                index,
            }
        }
    }

    /// Whether edges keep their direction
    pub const fn is_directed(&self) -> bool {
        matches!(self.graph, GraphKind::Directed(_))
    }

    /// Number of objects in the graph
    pub fn node_count(&self) -> usize {
        match &self.graph {
            GraphKind::Directed(g) => g.node_count(),
            GraphKind::Undirected(g) => g.node_count(),
        }
    }

    /// Number of edges (pairs, for an undirected graph)
    pub fn edge_count(&self) -> usize {
        match &self.graph {
            GraphKind::Directed(g) => g.edge_count(),
            GraphKind::Undirected(g) => g.edge_count(),
        }
    }

    /// Outgoing edges of a directed graph, incident edges of an undirected one
    pub fn degree(&self, label: L) -> Option<usize> {
        let node = *self.index.get(&label)?;
        Some(match &self.graph {
            GraphKind::Directed(g) => g.edges(node).count(),
            GraphKind::Undirected(g) => g.edges(node).count(),
        })
    }

    /// Attributes attached to an object's node
    pub fn attributes(&self, label: L) -> Option<&[(String, f64)]> {
        let node = *self.index.get(&label)?;
        let weight = match &self.graph {
            GraphKind::Directed(g) => g.node_weight(node),
            GraphKind::Undirected(g) => g.node_weight(node),
        };
        weight.map(|n| n.attributes.as_slice())
    }

    /// Render the graph in Graphviz DOT format
    pub fn to_dot(&self) -> String {
        match &self.graph {
            GraphKind::Directed(g) => render_dot(g),
            GraphKind::Undirected(g) => render_dot(g),
        }
    }
}

fn build<L: Label, Ty: EdgeType>(
    nodes: Vec<ObjectNode<L>>,
    table: &NeighborTable<L>,
    collapse: bool,
) -> (Graph<ObjectNode<L>, EdgeDistance, Ty>, HashMap<L, NodeIndex>) {
    let mut graph = Graph::with_capacity(nodes.len(), table.len());
    let mut index = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let label = node.label;
        index.insert(label, graph.add_node(node));
    }

    for edge in table {
        // Each symmetric pair is stored once, from the smaller identifier
        if collapse && edge.object > edge.neighbor {
            continue;
        }
        if let (Some(&a), Some(&b)) = (index.get(&edge.object), index.get(&edge.neighbor)) {
            graph.add_edge(a, b, EdgeDistance(edge.distance));
        }
    }

    (graph, index)
}

fn render_dot<L: Label, Ty: EdgeType>(graph: &Graph<ObjectNode<L>, EdgeDistance, Ty>) -> String {
    format!(
        "{}",
        Dot::with_attr_getters(graph, &[], &|_, _| String::new(), &|_, (_, node)| {
            node.attributes
                .iter()
                .map(|(name, value)| format!("\"{}\"=\"{value}\"", name.replace('"', "\\\"")))
                .collect::<Vec<_>>()
                .join(", ")
        })
    )
}
