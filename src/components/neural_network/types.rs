use std::time::Duration;

/// A dot of the decorative network, positioned in the 0..100 layout space.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	pub size: f64,
	/// Seconds before this node's pulse starts.
	pub phase: f64,
}

/// A line between two distinct nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: usize,
	pub from: usize,
	pub to: usize,
	/// Seconds before this edge fades in.
	pub phase: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketKind {
	Data,
	Secure,
}

/// A short-lived dot travelling along one edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
	pub id: u64,
	/// Index into the layout's edge list.
	pub edge: usize,
	pub kind: PacketKind,
	pub emitted_at: Duration,
}
