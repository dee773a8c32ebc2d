use std::f64::consts::PI;
use std::time::Duration;

use web_sys::CanvasRenderingContext2d;

use super::emitter::PacketEmitter;
use super::state::{
	NetworkState, edge_reveal, node_pulse, packet_opacity, packet_progress,
};
use super::types::PacketKind;

const PACKET_RADIUS: f64 = 0.6;
const EDGE_WIDTH: f64 = 0.1;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(
	state: &NetworkState,
	emitter: &PacketEmitter,
	now: Duration,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	let elapsed = state.elapsed(now);
	draw_edges(state, elapsed, ctx);
	draw_packets(state, emitter, now, ctx);
	draw_nodes(state, elapsed, ctx);
}

fn draw_edges(state: &NetworkState, elapsed: f64, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	ctx.set_line_width(EDGE_WIDTH * k);
	for edge in state.layout.edges() {
		let Some((from, to)) = state.layout.endpoints(edge) else {
			continue;
		};
		let reveal = ease_out_cubic(edge_reveal(elapsed, edge.phase));
		if reveal <= 0.0 {
			continue;
		}
		let (x1, y1) = state.transform.apply(from.x, from.y);
		let (x2, y2) = state.transform.apply(to.x, to.y);
		let (ex, ey) = (x1 + (x2 - x1) * reveal, y1 + (y2 - y1) * reveal);

		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.1 * reveal));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(ex, ey);
		ctx.stroke();
	}
}

fn draw_packets(
	state: &NetworkState,
	emitter: &PacketEmitter,
	now: Duration,
	ctx: &CanvasRenderingContext2d,
) {
	let (k, lifetime) = (state.transform.k, emitter.config().event_lifetime);
	for packet in emitter.packets() {
		let Some(t) = packet_progress(packet, now, lifetime) else {
			continue;
		};
		let Some((from, to)) = state
			.layout
			.edges()
			.get(packet.edge)
			.and_then(|edge| state.layout.endpoints(edge))
		else {
			continue;
		};
		let (x, y) = state.transform.apply(
			from.x + (to.x - from.x) * t,
			from.y + (to.y - from.y) * t,
		);
		let color = match packet.kind {
			PacketKind::Data => "#ffffff",
			PacketKind::Secure => "#34d399",
		};

		ctx.set_global_alpha(packet_opacity(t));
		ctx.set_shadow_color(color);
		ctx.set_shadow_blur(PACKET_RADIUS * k);
		ctx.begin_path();
		let _ = ctx.arc(x, y, PACKET_RADIUS * k, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
	}
	ctx.set_shadow_blur(0.0);
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &NetworkState, elapsed: f64, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for node in state.layout.nodes() {
		let (x, y) = state.transform.apply(node.x, node.y);
		let (scale, alpha) = node_pulse(elapsed, node.phase);

		if alpha > 0.0 {
			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, node.size / 10.0 * scale * k, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.1)");
			ctx.fill();
			ctx.set_global_alpha(1.0);
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, node.size / 20.0 * k, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.4)");
		ctx.fill();
	}
}
