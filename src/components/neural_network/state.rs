use std::f64::consts::TAU;
use std::time::Duration;

use super::layout::{LAYOUT_EXTENT, Layout};
use super::types::Packet;

const PULSE_PERIOD: f64 = 3.0;
const EDGE_REVEAL: f64 = 1.0;

/// Maps layout space onto canvas pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	/// Cover a `width` x `height` viewport with the square layout, centred,
	/// cropping whatever overflows the shorter side.
	pub fn slice(width: f64, height: f64) -> Self {
		let k = width.max(height).max(0.0) / LAYOUT_EXTENT;
		Self {
			x: (width - LAYOUT_EXTENT * k) / 2.0,
			y: (height - LAYOUT_EXTENT * k) / 2.0,
			k,
		}
	}

	pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
		(self.x + x * self.k, self.y + y * self.k)
	}
}

pub struct NetworkState {
	pub layout: Layout,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	pub mounted_at: Duration,
}

impl NetworkState {
	pub fn new(layout: Layout, width: f64, height: f64, mounted_at: Duration) -> Self {
		Self {
			layout,
			transform: ViewTransform::slice(width, height),
			width,
			height,
			mounted_at,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.transform = ViewTransform::slice(width, height);
	}

	/// Seconds since the network was mounted.
	pub fn elapsed(&self, now: Duration) -> f64 {
		now.saturating_sub(self.mounted_at).as_secs_f64()
	}
}

/// How far along its edge a packet is, in `[0, 1)`. `None` once it has
/// arrived or when the lifetime is zero.
pub fn packet_progress(packet: &Packet, now: Duration, lifetime: Duration) -> Option<f64> {
	if lifetime.is_zero() {
		return None;
	}
	let t = now.saturating_sub(packet.emitted_at).as_secs_f64() / lifetime.as_secs_f64();
	(t < 1.0).then_some(t)
}

/// Fade in over the first third of the trip, hold, fade out over the last third.
pub fn packet_opacity(t: f64) -> f64 {
	const PEAK: f64 = 0.8;
	let t = t.clamp(0.0, 1.0);
	if t < 1.0 / 3.0 {
		PEAK * t * 3.0
	} else if t <= 2.0 / 3.0 {
		PEAK
	} else {
		PEAK * (1.0 - t) * 3.0
	}
}

/// Drawn fraction of an edge: zero until its phase, then growing to one.
pub fn edge_reveal(elapsed: f64, phase: f64) -> f64 {
	((elapsed - phase) / EDGE_REVEAL).clamp(0.0, 1.0)
}

/// `(scale, opacity)` of a node halo. Hidden until the phase passes, then
/// breathing between `(1.0, 0.2)` and `(1.2, 0.5)` every three seconds.
pub fn node_pulse(elapsed: f64, phase: f64) -> (f64, f64) {
	if elapsed < phase {
		return (0.0, 0.0);
	}
	let u = ((elapsed - phase) % PULSE_PERIOD) / PULSE_PERIOD;
	let s = (1.0 - (TAU * u).cos()) / 2.0;
	(1.0 + 0.2 * s, 0.2 + 0.3 * s)
}
