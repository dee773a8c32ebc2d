use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::emitter::{EmitterConfig, PacketEmitter};
use super::layout::{Layout, LayoutConfig};
use super::render;
use super::shield::ShieldOverlay;
use super::state::NetworkState;
use crate::components::error::AnimationError;
use crate::components::schedule::{BrowserScheduler, ScheduledTask, Scheduler};

/// Ambient background: a random network with packets hopping along its edges.
#[component]
pub fn NeuralNetwork(
	#[prop(optional)] layout: LayoutConfig,
	#[prop(optional)] emitter: EmitterConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	// Frame loop, emission timer and resize listener; dropping them stops everything.
	let tasks = StoredValue::new_local(Vec::<ScheduledTask>::new());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		match start(canvas, layout, emitter) {
			Ok(started) => tasks.set_value(started),
			Err(err) => warn!("neural network left static: {err}"),
		}
	});

	on_cleanup(move || {
		tasks.try_update_value(|tasks| tasks.clear());
	});

	view! {
		<div class="neural-network" aria-hidden="true">
			<canvas
				node_ref=canvas_ref
				class="neural-network-canvas"
				style="display: block; opacity: 0.4;"
			/>
			<ShieldOverlay />
		</div>
	}
}

fn start(
	canvas: HtmlCanvasElement,
	layout: LayoutConfig,
	config: EmitterConfig,
) -> Result<Vec<ScheduledTask>, AnimationError> {
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(AnimationError::NoContext)?
		.dyn_into()
		.map_err(|_| AnimationError::NoContext)?;
	let (w, h) = fit_to_parent(&canvas);

	let scheduler = BrowserScheduler;
	let mut rng = StdRng::from_entropy();
	let network = Layout::generate(layout, &mut rng);
	info!(
		"neural network mounted: {} nodes, {} edges",
		network.nodes().len(),
		network.edges().len()
	);

	let emitter = Rc::new(RefCell::new(PacketEmitter::new(network.edges().len(), config, rng)));
	let state = Rc::new(RefCell::new(NetworkState::new(network, w, h, scheduler.now())));
	let mut tasks = Vec::with_capacity(3);

	match PacketEmitter::start(&emitter, scheduler) {
		Ok(task) => tasks.extend(task),
		Err(err) => warn!("packet emitter not started: {err}"),
	}

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	tasks.push(scheduler.on_window_resize(move || {
		let (w, h) = fit_to_parent(&canvas_resize);
		state_resize.borrow_mut().resize(w, h);
	})?);

	tasks.push(scheduler.frames(move || {
		render::render(&state.borrow(), &emitter.borrow(), scheduler.now(), &ctx);
	})?);

	Ok(tasks)
}

/// Match the canvas backing store to its parent box.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}
