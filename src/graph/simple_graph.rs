use crate::graph::{Edge, Error, Node, Result};
use log::debug;
use std::collections::{HashMap, HashSet};

/// A simple undirected graph: no self loops and at most one edge between two nodes.
///
/// Nodes and edges are kept in insertion order, which is also the order used by `coloring`.
///
/// # Examples
///
/// ```
/// use classic_collections::graph::{Edge, SimpleGraph};
///
/// let mut graph = SimpleGraph::new();
/// graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)]);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.node_degree(1), Ok(2));
///
/// graph.coloring();
/// let colors: Vec<(usize, usize)> = graph
///     .nodes()
///     .iter()
///     .map(|node| (node.id, node.color))
///     .collect();
/// assert_eq!(colors, vec![(2, 1), (1, 2), (3, 3)]);
/// ```
pub struct SimpleGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl SimpleGraph {
    /// Constructs a new, empty `SimpleGraph`.
    pub fn new() -> Self {
        SimpleGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn position(&self, id: usize) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Returns the nodes of the graph in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges of the graph in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adds a node with identifier `id`. Returns `None` without modifying the graph if a node with
    /// that identifier already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::graph::SimpleGraph;
    ///
    /// let mut graph = SimpleGraph::new();
    /// assert_eq!(graph.add_node(1).map(|node| node.id), Some(1));
    /// assert_eq!(graph.add_node(1), None);
    /// ```
    pub fn add_node(&mut self, id: usize) -> Option<&Node> {
        if self.position(id).is_some() {
            return None;
        }
        self.nodes.push(Node::new(id));
        self.nodes.last()
    }

    /// Adds an edge, creating any missing endpoint first, `b` before `a`. Returns `false` if the
    /// edge is a self loop or already exists. Endpoints are created even when the edge itself is
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::graph::{Edge, SimpleGraph};
    ///
    /// let mut graph = SimpleGraph::new();
    /// assert!(graph.add_edge(&Edge::new(1, 2)));
    /// assert!(!graph.add_edge(&Edge::new(2, 1)));
    /// assert!(!graph.add_edge(&Edge::new(3, 3)));
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.node_count(), 3);
    /// ```
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        self.add_node(edge.b);
        self.add_node(edge.a);
        if edge.a == edge.b || self.contains_edge(edge) {
            return false;
        }
        self.edges.push(*edge);
        true
    }

    /// Adds every edge in `edges`, skipping self loops and duplicates.
    pub fn add_multiple_edges(&mut self, edges: &[Edge]) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    /// Returns the node with identifier `id`, or `None` if it does not exist.
    pub fn get_node(&self, id: usize) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Checks if an edge exists in the graph, in either orientation.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Removes a node together with every edge incident to it.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if the node does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::graph::{Edge, Error, SimpleGraph};
    ///
    /// let mut graph = SimpleGraph::new();
    /// graph.add_edge(&Edge::new(1, 2));
    /// assert_eq!(graph.remove_node(1), Ok(()));
    /// assert_eq!(graph.edge_count(), 0);
    /// assert_eq!(graph.remove_node(1), Err(Error::NodeNotFound(1)));
    /// ```
    pub fn remove_node(&mut self, id: usize) -> Result<()> {
        let index = self.position(id).ok_or(Error::NodeNotFound(id))?;
        self.edges.retain(|edge| !edge.is_incident(id));
        self.nodes.remove(index);
        Ok(())
    }

    /// Removes an edge, in either orientation. The endpoints stay in the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::EdgeNotFound` if the edge does not exist.
    pub fn remove_edge(&mut self, edge: &Edge) -> Result<()> {
        let index = self
            .edges
            .iter()
            .position(|existing| existing == edge)
            .ok_or(Error::EdgeNotFound(*edge))?;
        self.edges.remove(index);
        Ok(())
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of edges incident to a node. An isolated node has degree `0`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if the node does not exist.
    pub fn node_degree(&self, id: usize) -> Result<usize> {
        if self.position(id).is_none() {
            return Err(Error::NodeNotFound(id));
        }
        Ok(self.edges.iter().filter(|edge| edge.is_incident(id)).count())
    }

    /// Returns the maximum node degree of the graph, or `0` if the graph has no edges.
    pub fn graph_degree(&self) -> usize {
        let mut degrees: HashMap<usize, usize> = HashMap::with_capacity(self.nodes.len());
        for edge in &self.edges {
            *degrees.entry(edge.a).or_insert(0) += 1;
            *degrees.entry(edge.b).or_insert(0) += 1;
        }
        degrees.values().cloned().max().unwrap_or(0)
    }

    /// Greedily colors the graph so that no edge joins two nodes of the same color.
    ///
    /// All colors are reset first. Nodes are then visited in insertion order and each receives the
    /// smallest positive color not used by an already colored neighbour.
    pub fn coloring(&mut self) {
        let mut neighbours: HashMap<usize, Vec<usize>> = HashMap::with_capacity(self.nodes.len());
        for edge in &self.edges {
            neighbours.entry(edge.a).or_insert_with(Vec::new).push(edge.b);
            neighbours.entry(edge.b).or_insert_with(Vec::new).push(edge.a);
        }

        let mut colors: HashMap<usize, usize> = HashMap::with_capacity(self.nodes.len());
        for node in &mut self.nodes {
            let used_colors: HashSet<usize> = neighbours
                .get(&node.id)
                .into_iter()
                .flatten()
                .filter_map(|neighbour| colors.get(neighbour).cloned())
                .collect();

            let mut color = 1;
            while used_colors.contains(&color) {
                color += 1;
            }
            node.color = color;
            colors.insert(node.id, color);
        }

        debug!(
            "colored {} nodes using {} colors",
            self.nodes.len(),
            self.nodes.iter().map(|node| node.color).max().unwrap_or(0),
        );
    }

    /// Removes every node and edge from the graph.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

impl Default for SimpleGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SimpleGraph;
    use crate::graph::{Edge, Error};

    fn assert_proper_coloring(graph: &SimpleGraph) {
        for edge in graph.edges() {
            let a = graph.get_node(edge.a).unwrap();
            let b = graph.get_node(edge.b).unwrap();
            assert_ne!(a.color, 0);
            assert_ne!(a.color, b.color);
        }
    }

    #[test]
    fn test_empty() {
        let graph = SimpleGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.graph_degree(), 0);
        assert!(graph.nodes().is_empty());
    }

    #[test]
    fn test_add_node() {
        let mut graph = SimpleGraph::new();
        let node = graph.add_node(1).cloned().unwrap();
        assert_eq!(node.id, 1);
        assert_eq!(node.color, 0);
        assert_eq!(graph.add_node(1), None);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph = SimpleGraph::new();
        assert!(graph.add_edge(&Edge::new(1, 2)));
        assert!(graph.get_node(1).is_some());
        assert!(graph.get_node(2).is_some());
        assert!(graph.contains_edge(&Edge::new(2, 1)));
    }

    #[test]
    fn test_add_edge_duplicate() {
        let mut graph = SimpleGraph::new();
        assert!(graph.add_edge(&Edge::new(1, 2)));
        assert!(!graph.add_edge(&Edge::new(1, 2)));
        assert!(!graph.add_edge(&Edge::new(2, 1)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_self_loop() {
        let mut graph = SimpleGraph::new();
        assert!(!graph.add_edge(&Edge::new(3, 3)));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = SimpleGraph::new();
        graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 4)]);
        assert_eq!(graph.remove_node(2), Ok(()));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edges(), &[Edge::new(3, 4)]);
        assert_eq!(graph.remove_node(2), Err(Error::NodeNotFound(2)));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = SimpleGraph::new();
        graph.add_edge(&Edge::new(1, 2));
        assert_eq!(graph.remove_edge(&Edge::new(2, 1)), Ok(()));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            graph.remove_edge(&Edge::new(1, 2)),
            Err(Error::EdgeNotFound(Edge::new(1, 2))),
        );
    }

    #[test]
    fn test_node_degree() {
        let mut graph = SimpleGraph::new();
        graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(1, 3), Edge::new(1, 4)]);
        graph.add_node(5);
        assert_eq!(graph.node_degree(1), Ok(3));
        assert_eq!(graph.node_degree(2), Ok(1));
        assert_eq!(graph.node_degree(5), Ok(0));
        assert_eq!(graph.node_degree(6), Err(Error::NodeNotFound(6)));
        assert_eq!(graph.graph_degree(), 3);
    }

    #[test]
    fn test_coloring_triangle() {
        let mut graph = SimpleGraph::new();
        graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)]);
        graph.coloring();
        assert_proper_coloring(&graph);
        let mut colors: Vec<usize> = graph.nodes().iter().map(|node| node.color).collect();
        colors.sort();
        assert_eq!(colors, vec![1, 2, 3]);
    }

    #[test]
    fn test_coloring_bipartite() {
        let mut graph = SimpleGraph::new();
        graph.add_multiple_edges(&[
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 4),
            Edge::new(4, 1),
        ]);
        graph.coloring();
        assert_proper_coloring(&graph);
        assert_eq!(
            graph
                .nodes()
                .iter()
                .map(|node| (node.id, node.color))
                .collect::<Vec<(usize, usize)>>(),
            vec![(2, 1), (1, 2), (3, 2), (4, 1)],
        );
    }

    #[test]
    fn test_add_edge_endpoint_order() {
        let mut graph = SimpleGraph::new();
        assert!(graph.add_edge(&Edge::new(1, 2)));
        assert_eq!(
            graph.nodes().iter().map(|node| node.id).collect::<Vec<usize>>(),
            vec![2, 1],
        );

        graph.coloring();
        assert_eq!(
            graph
                .nodes()
                .iter()
                .map(|node| (node.id, node.color))
                .collect::<Vec<(usize, usize)>>(),
            vec![(2, 1), (1, 2)],
        );
    }

    #[test]
    fn test_coloring_isolated_nodes() {
        let mut graph = SimpleGraph::new();
        graph.add_node(1);
        graph.add_node(2);
        graph.coloring();
        assert!(graph.nodes().iter().all(|node| node.color == 1));
    }

    #[test]
    fn test_clear() {
        let mut graph = SimpleGraph::new();
        graph.add_edge(&Edge::new(1, 2));
        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
