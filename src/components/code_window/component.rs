use std::time::Duration;

use leptos::prelude::*;
use log::debug;

use super::highlight::highlight;
use super::snippet;
use super::toggler::{Face, ToggleState, Toggler, TogglerConfig};
use crate::components::schedule::BrowserScheduler;

/// Editor-style window that flips between the vulnerable and the fixed listing.
///
/// With `autoplay` off the window statically shows `initial`.
#[component]
pub fn CodeWindow(
	#[prop(default = Face::Primary)] initial: Face,
	#[prop(default = true)] autoplay: bool,
	#[prop(default = Duration::from_millis(5000))] interval: Duration,
	#[prop(default = Duration::from_millis(500))] transition: Duration,
) -> impl IntoView {
	let config = TogglerConfig {
		initial,
		autoplay,
		interval,
		transition,
	};
	let state = RwSignal::new(ToggleState::settled(initial));
	let toggler = StoredValue::new_local(Toggler::start(config, BrowserScheduler, move |s| {
		state.set(s)
	}));
	debug!("code window mounted: {config:?}");

	on_cleanup(move || {
		toggler.try_update_value(Toggler::stop);
	});

	let face = move || state.get().face;
	let secure = move || face() == Face::Secondary;
	let transitioning = move || state.get().transitioning;
	let sweep = css_millis(transition);

	let code = move || {
		highlight(snippet(face()).code)
			.into_iter()
			.map(|token| {
				let class = token.kind.class();
				view! { <span class=class>{token.text}</span> }
			})
			.collect_view()
	};

	view! {
		<div class="code-window">
			<div class="code-window__frame">
				<div class="code-window__header">
					<div class="code-window__lights">
						<span class="light light--red" />
						<span class="light light--yellow" />
						<span class="light light--green" />
					</div>
					<span class=move || {
						if secure() { "badge badge--secure" } else { "badge badge--alert" }
					}>{move || snippet(face()).badge}</span>
				</div>

				<div class="code-window__body">
					<pre
						class="code-window__code"
						style:opacity=move || if transitioning() { "0" } else { "1" }
					>
						{code}
					</pre>
					<Show when=transitioning>
						<div
							class="code-window__scan-line"
							style:animation-duration=sweep.clone()
						/>
					</Show>
				</div>

				<div class="code-window__status">
					<span>{move || snippet(face()).file_name}</span>
					<span>
						{move || format!("Lines: {}", snippet(face()).line_count())}
					</span>
					<span>"UTF-8"</span>
				</div>
			</div>
			<div class=move || {
				if secure() { "code-window__glow glow--secure" } else { "code-window__glow glow--alert" }
			} />
		</div>
	}
}

/// CSS time value for `d`, whole milliseconds.
fn css_millis(d: Duration) -> String {
	format!("{}ms", d.as_millis())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scan_sweep_matches_transition() {
		assert_eq!(css_millis(Duration::from_millis(500)), "500ms");
		assert_eq!(css_millis(Duration::from_millis(1250)), "1250ms");
		assert_eq!(css_millis(Duration::from_micros(999)), "0ms");
	}
}
