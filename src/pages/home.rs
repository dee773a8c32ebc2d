use leptos::prelude::*;

use crate::components::code_window::{CodeWindow, Face};
use crate::components::neural_network::NeuralNetwork;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<section class="hero">
			<NeuralNetwork />
			<div class="hero__content">
				<h1>"Deterministic security fixes at PR time."</h1>
				<p class="subtitle">"Fixpoint patches vulnerable code before it merges."</p>
			</div>
			<div class="hero__demo">
				<CodeWindow initial=Face::Primary />
			</div>
		</section>
	}
}
