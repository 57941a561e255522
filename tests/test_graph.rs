use classic_collections::graph::{Edge, Error, SimpleGraph};
use rand::Rng;
use std::collections::HashSet;

const NUM_OF_NODES: usize = 200;
const NUM_OF_EDGES: usize = 2_000;

fn assert_proper_coloring(graph: &SimpleGraph) {
    for node in graph.nodes() {
        assert!(node.color > 0);
    }
    for edge in graph.edges() {
        let a = graph.get_node(edge.a).unwrap();
        let b = graph.get_node(edge.b).unwrap();
        assert_ne!(a.color, b.color);
    }
}

#[test]
fn test_triangle_coloring() {
    let mut graph = SimpleGraph::new();
    graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)]);
    graph.coloring();
    assert_proper_coloring(&graph);
    let colors: HashSet<usize> = graph.nodes().iter().map(|node| node.color).collect();
    assert_eq!(colors.len(), 3);
}

#[test]
fn test_recoloring_after_removal() {
    let mut graph = SimpleGraph::new();
    graph.add_multiple_edges(&[Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)]);
    graph.coloring();
    assert_eq!(graph.remove_edge(&Edge::new(3, 1)), Ok(()));
    graph.coloring();
    assert_proper_coloring(&graph);
    assert_eq!(
        graph
            .nodes()
            .iter()
            .map(|node| (node.id, node.color))
            .collect::<Vec<(usize, usize)>>(),
        vec![(2, 1), (1, 2), (3, 2)],
    );
}

#[test]
fn test_removal_errors() {
    let mut graph = SimpleGraph::new();
    assert_eq!(graph.remove_node(1), Err(Error::NodeNotFound(1)));
    assert_eq!(
        graph.remove_edge(&Edge::new(1, 2)),
        Err(Error::EdgeNotFound(Edge::new(1, 2))),
    );
    assert_eq!(graph.node_degree(1), Err(Error::NodeNotFound(1)));
    assert_eq!(Error::NodeNotFound(1).to_string(), "node 1 does not exist");
}

#[test]
fn test_random_graph() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut graph = SimpleGraph::new();
    let mut expected: Vec<Edge> = Vec::new();

    for _ in 0..NUM_OF_EDGES {
        let edge = Edge::new(rng.gen_range(0, NUM_OF_NODES), rng.gen_range(0, NUM_OF_NODES));
        let is_new = edge.a != edge.b && !expected.contains(&edge);
        assert_eq!(graph.add_edge(&edge), is_new);
        if is_new {
            expected.push(edge);
        }
    }
    assert_eq!(graph.edge_count(), expected.len());

    let max_degree = (0..NUM_OF_NODES)
        .filter_map(|id| graph.node_degree(id).ok())
        .max()
        .unwrap_or(0);
    assert_eq!(graph.graph_degree(), max_degree);

    graph.coloring();
    assert_proper_coloring(&graph);
    let max_color = graph.nodes().iter().map(|node| node.color).max().unwrap_or(0);
    assert!(max_color <= graph.graph_degree() + 1);

    for id in 0..NUM_OF_NODES / 2 {
        if graph.get_node(id).is_some() {
            assert_eq!(graph.remove_node(id), Ok(()));
            assert!(graph.edges().iter().all(|edge| !edge.is_incident(id)));
        }
    }
    graph.coloring();
    assert_proper_coloring(&graph);
}
