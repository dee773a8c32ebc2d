use rand::Rng;

use super::types::{Edge, Node};

/// Side length of the square coordinate space nodes live in.
pub const LAYOUT_EXTENT: f64 = 100.0;

const NODE_SIZE_MIN: f64 = 4.0;
const NODE_SIZE_SPREAD: f64 = 8.0;
const MAX_PHASE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
	pub node_count: usize,
	pub edge_count: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_count: 20,
			edge_count: 35,
		}
	}
}

/// Random but frozen node/edge arrangement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl Layout {
	pub fn generate(config: LayoutConfig, rng: &mut impl Rng) -> Self {
		let nodes = generate_nodes(config.node_count, rng);
		let edges = generate_edges(&nodes, config.edge_count, rng);
		Self { nodes, edges }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Endpoints of an edge as `(from, to)` nodes.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		Some((self.nodes.get(edge.from)?, self.nodes.get(edge.to)?))
	}
}

fn generate_nodes(count: usize, rng: &mut impl Rng) -> Vec<Node> {
	(0..count)
		.map(|id| Node {
			id,
			x: rng.gen_range(0.0..LAYOUT_EXTENT),
			y: rng.gen_range(0.0..LAYOUT_EXTENT),
			size: NODE_SIZE_MIN + rng.gen_range(0.0..NODE_SIZE_SPREAD),
			phase: rng.gen_range(0.0..MAX_PHASE),
		})
		.collect()
}

/// Samples node pairs until `count` non-self edges exist. Needs two nodes.
fn generate_edges(nodes: &[Node], count: usize, rng: &mut impl Rng) -> Vec<Edge> {
	if nodes.len() < 2 {
		return Vec::new();
	}
	let mut edges = Vec::with_capacity(count);
	while edges.len() < count {
		let (from, to) = (rng.gen_range(0..nodes.len()), rng.gen_range(0..nodes.len()));
		if from == to {
			continue;
		}
		edges.push(Edge {
			id: edges.len(),
			from: nodes[from].id,
			to: nodes[to].id,
			phase: rng.gen_range(0.0..MAX_PHASE),
		});
	}
	edges
}
