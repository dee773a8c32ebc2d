//! Simulated clock for driving timer-based effects in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{ScheduledTask, Scheduler};
use crate::components::error::AnimationError;

enum Callback {
	Repeat { period: Duration, tick: Rc<dyn Fn()> },
	Once(Box<dyn FnOnce()>),
}

struct Timer {
	due: Duration,
	callback: Callback,
}

#[derive(Default)]
struct Inner {
	now: Duration,
	next_id: u64,
	timers: HashMap<u64, Timer>,
}

#[derive(Clone, Default)]
pub struct ManualClock {
	inner: Rc<RefCell<Inner>>,
}

impl ManualClock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pending(&self) -> usize {
		self.inner.borrow().timers.len()
	}

	/// Move time forward, firing due timers in order of `(due, registration)`.
	/// Timers registered by a callback fire within the same call if they fall due.
	pub fn advance(&self, by: Duration) {
		let target = self.inner.borrow().now + by;
		loop {
			let next = {
				let inner = self.inner.borrow();
				inner
					.timers
					.iter()
					.filter(|(_, t)| t.due <= target)
					.min_by_key(|(id, t)| (t.due, **id))
					.map(|(id, _)| *id)
			};
			let Some(id) = next else {
				break;
			};

			let fire = {
				let mut inner = self.inner.borrow_mut();
				let Some(timer) = inner.timers.remove(&id) else {
					continue;
				};
				inner.now = timer.due;
				match timer.callback {
					Callback::Repeat { period, tick } => {
						inner.timers.insert(
							id,
							Timer {
								due: timer.due + period.max(Duration::from_millis(1)),
								callback: Callback::Repeat {
									period,
									tick: tick.clone(),
								},
							},
						);
						Box::new(move || tick()) as Box<dyn FnOnce()>
					}
					Callback::Once(fire) => fire,
				}
			};
			fire();
		}
		self.inner.borrow_mut().now = target;
	}

	fn register(&self, due: Duration, callback: Callback) -> ScheduledTask {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_id;
			inner.next_id += 1;
			inner.timers.insert(id, Timer { due, callback });
			id
		};
		let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
		ScheduledTask::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().timers.remove(&id);
			}
		})
	}
}

impl Scheduler for ManualClock {
	fn now(&self) -> Duration {
		self.inner.borrow().now
	}

	fn every(
		&self,
		period: Duration,
		tick: Box<dyn Fn()>,
	) -> Result<ScheduledTask, AnimationError> {
		let due = self.now() + period;
		Ok(self.register(
			due,
			Callback::Repeat {
				period,
				tick: Rc::from(tick),
			},
		))
	}

	fn after(
		&self,
		delay: Duration,
		fire: Box<dyn FnOnce()>,
	) -> Result<ScheduledTask, AnimationError> {
		let due = self.now() + delay;
		Ok(self.register(due, Callback::Once(fire)))
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	fn ms(v: u64) -> Duration {
		Duration::from_millis(v)
	}

	#[test]
	fn interval_fires_each_period() {
		let clock = ManualClock::new();
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let _task = clock
			.every(ms(100), Box::new(move || counter.set(counter.get() + 1)))
			.unwrap();

		clock.advance(ms(99));
		assert_eq!(hits.get(), 0);
		clock.advance(ms(1));
		assert_eq!(hits.get(), 1);
		clock.advance(ms(350));
		assert_eq!(hits.get(), 4);
		assert_eq!(clock.now(), ms(450));
	}

	#[test]
	fn released_timers_never_fire() {
		let clock = ManualClock::new();
		let fired = Rc::new(Cell::new(false));
		let flag = fired.clone();
		let mut task = clock.after(ms(10), Box::new(move || flag.set(true))).unwrap();
		task.cancel();

		clock.advance(ms(1000));
		assert!(!fired.get());
		assert_eq!(clock.pending(), 0);
	}

	#[test]
	fn nested_timeout_fires_in_same_advance() {
		let clock = ManualClock::new();
		let fired_at = Rc::new(Cell::new(None));
		let (inner_clock, slot) = (clock.clone(), fired_at.clone());
		let held: Rc<RefCell<Vec<ScheduledTask>>> = Rc::default();
		let held_inner = held.clone();
		let _task = clock
			.after(
				ms(100),
				Box::new(move || {
					let (c, s) = (inner_clock.clone(), slot.clone());
					let nested = inner_clock
						.after(ms(50), Box::new(move || s.set(Some(c.now()))))
						.unwrap();
					held_inner.borrow_mut().push(nested);
				}),
			)
			.unwrap();

		clock.advance(ms(200));
		assert_eq!(fired_at.get(), Some(ms(150)));
	}
}
