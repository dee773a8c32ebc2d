//! Owned timer resources.
//!
//! Every periodic or deferred callback the effects register is represented by a
//! [`ScheduledTask`]. Dropping the task (or calling [`ScheduledTask::cancel`])
//! releases the registration, so a component that owns its tasks can never be
//! called back after it is torn down.

mod browser;
#[cfg(test)]
pub mod manual;

use std::time::Duration;

pub use browser::BrowserScheduler;

use super::error::AnimationError;

/// Handle to a live timer or listener registration.
pub struct ScheduledTask {
	release: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// Release the registration. Safe to call any number of times.
	pub fn cancel(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}

	pub fn is_active(&self) -> bool {
		self.release.is_some()
	}
}

impl Drop for ScheduledTask {
	fn drop(&mut self) {
		self.cancel();
	}
}

impl std::fmt::Debug for ScheduledTask {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ScheduledTask")
			.field("active", &self.is_active())
			.finish()
	}
}

/// Single-threaded timer source.
pub trait Scheduler {
	/// Monotonic-enough wall clock used to timestamp emitted events.
	fn now(&self) -> Duration;

	/// Call `tick` every `period` until the returned task is released.
	fn every(&self, period: Duration, tick: Box<dyn Fn()>)
	-> Result<ScheduledTask, AnimationError>;

	/// Call `fire` once after `delay` unless the returned task is released first.
	fn after(
		&self,
		delay: Duration,
		fire: Box<dyn FnOnce()>,
	) -> Result<ScheduledTask, AnimationError>;
}
