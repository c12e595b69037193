//! Downstream analysis of measured neighbor tables

/// Directed and undirected neighbor graphs with Graphviz export
pub mod graph;
