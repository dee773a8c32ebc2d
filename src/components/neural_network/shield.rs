use std::fmt::Write as _;

use leptos::prelude::*;

const SHIELD_WIDTH: f64 = 120.0;
const SHIELD_HEIGHT: f64 = 140.0;

const OUTLINE: &str = "M60 10 L110 35 L110 75 Q110 110 60 130 Q10 110 10 75 L10 35 Z";
const CHECK: [(f64, f64); 3] = [(40.0, 70.0), (55.0, 85.0), (85.0, 50.0)];

/// Open `M .. L ..` path through `points`; empty for no points.
fn polyline(points: &[(f64, f64)]) -> String {
	let mut d = String::new();
	for (i, (x, y)) in points.iter().enumerate() {
		let cmd = if i == 0 { 'M' } else { 'L' };
		if i > 0 {
			d.push(' ');
		}
		let _ = write!(d, "{cmd}{x} {y}");
	}
	d
}

/// Shield badge centred over the network: pulsing glow, an expanding scan ring,
/// the outline drawn in, then the checkmark.
///
/// Purely declarative; all motion lives in the stylesheet's keyframes.
#[component]
pub fn ShieldOverlay() -> impl IntoView {
	let view_box = format!("0 0 {SHIELD_WIDTH} {SHIELD_HEIGHT}");
	view! {
		<div class="shield">
			<div class="shield__body">
				<div class="shield__glow" />
				<div class="shield__ring" />
				<svg
					class="shield__mark"
					width=SHIELD_WIDTH.to_string()
					height=SHIELD_HEIGHT.to_string()
					viewBox=view_box
				>
					<path
						class="shield__outline"
						d=OUTLINE
						pathLength="1"
						fill="none"
						stroke="white"
						stroke-width="1"
						stroke-opacity="0.3"
					/>
					<path class="shield__fill" d=OUTLINE fill="white" fill-opacity="0.03" />
					<path
						class="shield__check"
						d=polyline(&CHECK)
						pathLength="1"
						fill="none"
						stroke="white"
						stroke-width="2"
						stroke-opacity="0.5"
						stroke-linecap="round"
						stroke-linejoin="round"
					/>
				</svg>
			</div>
		</div>
	}
}
