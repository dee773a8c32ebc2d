use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{ScheduledTask, Scheduler};
use crate::components::error::AnimationError;

/// [`Scheduler`] backed by the page's `window` timers.
///
/// The wasm closures live inside the returned [`ScheduledTask`], so cancelling
/// clears the browser timer and frees the closure in one step.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

fn window() -> Result<Window, AnimationError> {
	web_sys::window().ok_or(AnimationError::NoWindow)
}

fn millis(d: Duration) -> i32 {
	d.as_millis().min(i32::MAX as u128) as i32
}

impl Scheduler for BrowserScheduler {
	fn now(&self) -> Duration {
		Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
	}

	fn every(
		&self,
		period: Duration,
		tick: Box<dyn Fn()>,
	) -> Result<ScheduledTask, AnimationError> {
		let window = window()?;
		let callback = Closure::<dyn Fn()>::wrap(tick);
		let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			millis(period),
		)?;
		Ok(ScheduledTask::new(move || {
			window.clear_interval_with_handle(id);
			drop(callback);
		}))
	}

	fn after(
		&self,
		delay: Duration,
		fire: Box<dyn FnOnce()>,
	) -> Result<ScheduledTask, AnimationError> {
		let window = window()?;
		let callback = Closure::once(fire);
		let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			millis(delay),
		)?;
		Ok(ScheduledTask::new(move || {
			window.clear_timeout_with_handle(id);
			drop(callback);
		}))
	}
}

impl BrowserScheduler {
	/// Run `frame` on every animation frame until the task is released.
	pub fn frames(&self, mut frame: impl FnMut() + 'static) -> Result<ScheduledTask, AnimationError> {
		let window = window()?;
		let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None::<i32>));

		let (slot_inner, pending_inner) = (slot.clone(), pending.clone());
		*slot.borrow_mut() = Some(Closure::new(move || {
			frame();
			let Ok(win) = self::window() else {
				return;
			};
			if let Some(ref cb) = *slot_inner.borrow() {
				pending_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *slot.borrow() {
			pending.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
		}

		Ok(ScheduledTask::new(move || {
			if let Some(id) = pending.take() {
				let _ = window.cancel_animation_frame(id);
			}
			// Breaks the closure's reference to its own slot.
			slot.borrow_mut().take();
		}))
	}

	/// Register `on_resize` for the window's `resize` event.
	pub fn on_window_resize(
		&self,
		on_resize: impl FnMut() + 'static,
	) -> Result<ScheduledTask, AnimationError> {
		let window = window()?;
		let callback = Closure::<dyn FnMut()>::new(on_resize);
		window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
		Ok(ScheduledTask::new(move || {
			let _ = window
				.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn millis_saturates() {
		assert_eq!(millis(Duration::from_millis(500)), 500);
		assert_eq!(millis(Duration::from_secs(u64::MAX)), i32::MAX);
	}
}
