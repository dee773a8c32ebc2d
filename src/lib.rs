//! Fixpoint marketing site, rendered client-side.
//!
//! The landing page pairs a canvas of randomly wired nodes, with packets
//! flowing along the edges, and a code window that keeps flipping between a
//! vulnerable listing and its fixed counterpart. Everything else is a 404.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const SITE_TITLE: &str = "Fixpoint";
const SITE_DESCRIPTION: &str = "Automated security fixes for every pull request.";

/// Route browser logging through `console_log` and surface panics in the console.
///
/// Hero effects only warn when the browser refuses a timer or a canvas, so
/// `Debug` keeps their lifecycle traces visible during development.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("{SITE_TITLE} site starting");
}

/// Document head plus the router: `/` is the hero page, anything else falls
/// through to [`NotFound`].
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text=SITE_TITLE />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content=SITE_DESCRIPTION />

		<Router>
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
				</Routes>
			</main>
		</Router>
	}
}
