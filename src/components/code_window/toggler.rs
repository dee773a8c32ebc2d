use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::components::schedule::{ScheduledTask, Scheduler};

/// Which of the two content variants is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Face {
	#[default]
	Primary,
	Secondary,
}

impl Face {
	pub fn flipped(self) -> Self {
		match self {
			Self::Primary => Self::Secondary,
			Self::Secondary => Self::Primary,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleState {
	pub face: Face,
	pub transitioning: bool,
}

impl ToggleState {
	pub fn settled(face: Face) -> Self {
		Self {
			face,
			transitioning: false,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TogglerConfig {
	pub initial: Face,
	pub autoplay: bool,
	/// Time between the starts of two consecutive flips.
	pub interval: Duration,
	/// Length of the fade gap before the face changes.
	pub transition: Duration,
}

impl Default for TogglerConfig {
	fn default() -> Self {
		Self {
			initial: Face::Primary,
			autoplay: true,
			interval: Duration::from_millis(5000),
			transition: Duration::from_millis(500),
		}
	}
}

struct Shared {
	state: Cell<ToggleState>,
	active: Cell<bool>,
	pending: RefCell<Option<ScheduledTask>>,
	sink: Box<dyn Fn(ToggleState)>,
}

impl Shared {
	fn publish(&self, state: ToggleState) {
		self.state.set(state);
		(self.sink)(state);
	}

	fn finish_transition(&self) {
		if !self.active.get() {
			return;
		}
		let next = ToggleState::settled(self.state.get().face.flipped());
		trace!("toggler settled on {:?}", next.face);
		self.publish(next);
	}
}

/// Timer-driven two-face switcher.
///
/// Each interval tick raises `transitioning`, and once the transition delay has
/// passed the face flips and `transitioning` drops again. Every change is pushed
/// to the sink given to [`Toggler::start`].
pub struct Toggler {
	shared: Rc<Shared>,
	ticker: Option<ScheduledTask>,
}

impl Toggler {
	pub fn start<S>(config: TogglerConfig, scheduler: S, sink: impl Fn(ToggleState) + 'static) -> Self
	where
		S: Scheduler + 'static,
	{
		let shared = Rc::new(Shared {
			state: Cell::new(ToggleState::settled(config.initial)),
			active: Cell::new(true),
			pending: RefCell::new(None),
			sink: Box::new(sink),
		});
		let mut toggler = Self {
			shared,
			ticker: None,
		};

		if !config.autoplay || config.interval.is_zero() {
			debug!("toggler static on {:?}", config.initial);
			return toggler;
		}

		let scheduler = Rc::new(scheduler);
		let (weak, tick_scheduler) = (Rc::downgrade(&toggler.shared), scheduler.clone());
		let tick = move || {
			if let Some(shared) = weak.upgrade() {
				begin_transition(&shared, &*tick_scheduler, config.transition);
			}
		};

		match scheduler.every(config.interval, Box::new(tick)) {
			Ok(task) => toggler.ticker = Some(task),
			Err(err) => warn!("toggler falling back to a static face: {err}"),
		}
		toggler
	}

	pub fn state(&self) -> ToggleState {
		self.shared.state.get()
	}

	/// Cancel the interval and any pending flip. Idempotent.
	pub fn stop(&mut self) {
		self.shared.active.set(false);
		if let Some(mut ticker) = self.ticker.take() {
			ticker.cancel();
			debug!("toggler stopped");
		}
		if let Some(mut pending) = self.shared.pending.borrow_mut().take() {
			pending.cancel();
		}
	}
}

impl Drop for Toggler {
	fn drop(&mut self) {
		self.stop();
	}
}

fn begin_transition(shared: &Rc<Shared>, scheduler: &dyn Scheduler, transition: Duration) {
	let current = shared.state.get();
	if !shared.active.get() || current.transitioning {
		trace!("toggler tick skipped mid-transition");
		return;
	}
	shared.publish(ToggleState {
		transitioning: true,
		..current
	});

	let weak: Weak<Shared> = Rc::downgrade(shared);
	let settle = move || {
		if let Some(shared) = weak.upgrade() {
			shared.finish_transition();
		}
	};
	match scheduler.after(transition, Box::new(settle)) {
		// Replacing the slot releases the previous, already fired, timeout.
		Ok(task) => *shared.pending.borrow_mut() = Some(task),
		Err(err) => {
			warn!("toggler could not schedule its flip: {err}");
			shared.finish_transition();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::schedule::manual::ManualClock;

	fn ms(v: u64) -> Duration {
		Duration::from_millis(v)
	}

	fn recorder() -> (Rc<RefCell<Vec<ToggleState>>>, impl Fn(ToggleState) + 'static) {
		let log: Rc<RefCell<Vec<ToggleState>>> = Rc::default();
		let sink_log = log.clone();
		(log, move |s| sink_log.borrow_mut().push(s))
	}

	#[test]
	fn face_flips_each_interval() {
		let clock = ManualClock::new();
		let toggler = Toggler::start(TogglerConfig::default(), clock.clone(), |_| {});
		assert_eq!(toggler.state(), ToggleState::settled(Face::Primary));

		clock.advance(ms(5500));
		assert_eq!(toggler.state(), ToggleState::settled(Face::Secondary));
		clock.advance(ms(5000));
		assert_eq!(toggler.state(), ToggleState::settled(Face::Primary));

		for n in 3..=8u64 {
			clock.advance(ms(5000));
			let expected = if n % 2 == 0 { Face::Primary } else { Face::Secondary };
			assert_eq!(toggler.state().face, expected, "after tick {n}");
		}
	}

	#[test]
	fn alternation_starts_from_initial_face() {
		let clock = ManualClock::new();
		let config = TogglerConfig {
			initial: Face::Secondary,
			..TogglerConfig::default()
		};
		let toggler = Toggler::start(config, clock.clone(), |_| {});

		clock.advance(ms(5500));
		assert_eq!(toggler.state().face, Face::Primary);
		clock.advance(ms(5000));
		assert_eq!(toggler.state().face, Face::Secondary);
	}

	#[test]
	fn transitioning_only_inside_window() {
		let clock = ManualClock::new();
		let toggler = Toggler::start(TogglerConfig::default(), clock.clone(), |_| {});

		clock.advance(ms(4999));
		assert!(!toggler.state().transitioning);
		clock.advance(ms(1));
		assert_eq!(
			toggler.state(),
			ToggleState {
				face: Face::Primary,
				transitioning: true
			}
		);
		clock.advance(ms(499));
		assert!(toggler.state().transitioning);
		clock.advance(ms(1));
		assert!(!toggler.state().transitioning);
		assert_eq!(toggler.state().face, Face::Secondary);
	}

	#[test]
	fn sink_sees_every_change_in_order() {
		let clock = ManualClock::new();
		let (log, sink) = recorder();
		let _toggler = Toggler::start(TogglerConfig::default(), clock.clone(), sink);

		clock.advance(ms(10_500));
		assert_eq!(
			*log.borrow(),
			vec![
				ToggleState {
					face: Face::Primary,
					transitioning: true
				},
				ToggleState::settled(Face::Secondary),
				ToggleState {
					face: Face::Secondary,
					transitioning: true
				},
				ToggleState::settled(Face::Primary),
			]
		);
	}

	#[test]
	fn stop_freezes_state() {
		let clock = ManualClock::new();
		let (log, sink) = recorder();
		let mut toggler = Toggler::start(TogglerConfig::default(), clock.clone(), sink);

		// Stop mid-transition: the pending flip must not land.
		clock.advance(ms(5200));
		toggler.stop();
		let frozen = toggler.state();
		let seen = log.borrow().len();

		clock.advance(ms(60_000));
		assert_eq!(toggler.state(), frozen);
		assert_eq!(log.borrow().len(), seen);
		assert_eq!(clock.pending(), 0);

		toggler.stop();
		assert_eq!(toggler.state(), frozen);
	}

	#[test]
	fn dropping_releases_timers() {
		let clock = ManualClock::new();
		let (log, sink) = recorder();
		let toggler = Toggler::start(TogglerConfig::default(), clock.clone(), sink);
		clock.advance(ms(5100));
		drop(toggler);

		let seen = log.borrow().len();
		clock.advance(ms(30_000));
		assert_eq!(log.borrow().len(), seen);
		assert_eq!(clock.pending(), 0);
	}

	#[test]
	fn disabled_autoplay_schedules_nothing() {
		let clock = ManualClock::new();
		let config = TogglerConfig {
			initial: Face::Secondary,
			autoplay: false,
			..TogglerConfig::default()
		};
		let toggler = Toggler::start(config, clock.clone(), |_| {});

		assert_eq!(clock.pending(), 0);
		clock.advance(ms(60_000));
		assert_eq!(toggler.state(), ToggleState::settled(Face::Secondary));
	}

	#[test]
	fn zero_interval_degrades_to_static() {
		let clock = ManualClock::new();
		let config = TogglerConfig {
			interval: Duration::ZERO,
			..TogglerConfig::default()
		};
		let toggler = Toggler::start(config, clock.clone(), |_| {});
		assert_eq!(clock.pending(), 0);
		clock.advance(ms(60_000));
		assert_eq!(toggler.state(), ToggleState::settled(Face::Primary));
	}

	#[test]
	fn overlong_transition_skips_overlapping_ticks() {
		let clock = ManualClock::new();
		let config = TogglerConfig {
			interval: ms(100),
			transition: ms(250),
			..TogglerConfig::default()
		};
		let toggler = Toggler::start(config, clock.clone(), |_| {});

		// Tick at 100 starts a flip landing at 350; ticks at 200 and 300 are skipped.
		clock.advance(ms(349));
		assert_eq!(
			toggler.state(),
			ToggleState {
				face: Face::Primary,
				transitioning: true
			}
		);
		clock.advance(ms(1));
		assert_eq!(toggler.state(), ToggleState::settled(Face::Secondary));
	}
}
