use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};
use rand::Rng;
use rand::rngs::StdRng;

use super::types::{Packet, PacketKind};
use crate::components::error::AnimationError;
use crate::components::schedule::{ScheduledTask, Scheduler};

/// Upper bound on the history slots reserved up front.
const PREALLOC_LIMIT: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterConfig {
	pub emission_period: Duration,
	/// How long one packet takes to cross its edge.
	pub event_lifetime: Duration,
	/// Maximum number of packets retained at once.
	pub history_bound: usize,
	/// Probability that a packet is [`PacketKind::Secure`].
	pub secure_weight: f64,
}

impl Default for EmitterConfig {
	fn default() -> Self {
		Self {
			emission_period: Duration::from_millis(500),
			event_lifetime: Duration::from_millis(1000),
			history_bound: 10,
			secure_weight: 0.3,
		}
	}
}

/// Produces packets on random edges and keeps the most recent ones.
///
/// Packets are held oldest-first; once the history bound is exceeded the
/// oldest entries are dropped.
pub struct PacketEmitter<R = StdRng> {
	edge_count: usize,
	config: EmitterConfig,
	rng: R,
	next_id: u64,
	live: VecDeque<Packet>,
}

impl<R: Rng> PacketEmitter<R> {
	pub fn new(edge_count: usize, config: EmitterConfig, rng: R) -> Self {
		Self {
			edge_count,
			config,
			rng,
			next_id: 0,
			live: VecDeque::with_capacity(config.history_bound.min(PREALLOC_LIMIT)),
		}
	}

	pub fn config(&self) -> &EmitterConfig {
		&self.config
	}

	/// Whether scheduling this emitter could ever produce a visible packet.
	pub fn can_emit(&self) -> bool {
		self.edge_count > 0 && self.config.history_bound > 0 && !self.config.emission_period.is_zero()
	}

	/// Create one packet stamped with `now`. Returns `None` without touching the
	/// random source when there are no edges.
	pub fn emit(&mut self, now: Duration) -> Option<&Packet> {
		if self.edge_count == 0 {
			return None;
		}
		let edge = self.rng.gen_range(0..self.edge_count);
		let weight = self.config.secure_weight;
		let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
		let kind = if self.rng.gen_bool(weight) {
			PacketKind::Secure
		} else {
			PacketKind::Data
		};
		let packet = Packet {
			id: self.next_id,
			edge,
			kind,
			emitted_at: now,
		};
		self.next_id += 1;
		trace!("packet {} on edge {edge} ({kind:?})", packet.id);

		self.live.push_back(packet);
		while self.live.len() > self.config.history_bound {
			self.live.pop_front();
		}
		self.live.back()
	}

	/// Retained packets, oldest first.
	pub fn packets(&self) -> impl Iterator<Item = &Packet> {
		self.live.iter()
	}
}

impl<R: Rng + 'static> PacketEmitter<R> {
	/// Emit on `scheduler` every `emission_period` until the task is released.
	///
	/// Returns `Ok(None)` when the emitter can never produce a packet, in which
	/// case no timer is registered at all.
	pub fn start<S>(
		emitter: &Rc<RefCell<Self>>,
		scheduler: S,
	) -> Result<Option<ScheduledTask>, AnimationError>
	where
		S: Scheduler + 'static,
	{
		let (can_emit, period) = {
			let e = emitter.borrow();
			(e.can_emit(), e.config.emission_period)
		};
		if !can_emit {
			debug!("packet emitter idle: nothing to emit");
			return Ok(None);
		}

		let weak = Rc::downgrade(emitter);
		let scheduler = Rc::new(scheduler);
		let clock = scheduler.clone();
		let task = scheduler.every(
			period,
			Box::new(move || {
				if let Some(emitter) = weak.upgrade() {
					emitter.borrow_mut().emit(clock.now());
				}
			}),
		)?;
		debug!("packet emitter started every {period:?}");
		Ok(Some(task))
	}
}
