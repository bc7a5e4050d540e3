use log::trace;

use crate::{
    meter::{direction::ProgressDirection, progress_meter::ProgressMeter},
    types::HostTime,
};

/// The host entity that owns and ticks a meter
pub trait MeterHost {
    type Context;

    /// Value the meter's gating predicates are evaluated against
    fn host_context(&self) -> &Self::Context;

    /// Monotonic step counter used for tick-rate gating
    fn current_host_time(&self) -> HostTime;
}

/// What a single `tick` call did to the meter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The meter left its starting bound on this call
    pub started: bool,
    /// `current` moved by one increment
    pub advanced: bool,
    /// The meter was reset at its bound
    pub completed: bool,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.advanced || self.completed
    }
}

impl<C> ProgressMeter<C> {
    /// Advances the meter by one host step.
    ///
    /// On a qualifying step (`host_time % tick_rate == 0`) where `can_advance`
    /// holds, `current` moves one increment toward the bound unless it is
    /// already there. Then, on every call, a meter at or past its bound is
    /// reset if `can_reset` holds. The bound check sees the post-advance value,
    /// so a rising meter can overshoot `maximum` by up to `increment - 1` before
    /// it is reset.
    pub fn tick(&mut self, context: &C, host_time: HostTime) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if host_time % u64::from(self.tick_rate) == 0 && (self.can_advance)(context) {
            match self.direction {
                ProgressDirection::Rising if self.current < self.maximum => {
                    if self.current == 0 {
                        (self.on_start)();
                        outcome.started = true;
                    }
                    self.current = self.current.saturating_add_unsigned(self.increment);
                    (self.on_tick)();
                    outcome.advanced = true;
                }
                ProgressDirection::Falling if self.current > 0 => {
                    if self.current == self.maximum {
                        (self.on_start)();
                        outcome.started = true;
                    }
                    self.current = self.current.saturating_sub_unsigned(self.increment);
                    (self.on_tick)();
                    outcome.advanced = true;
                }
                _ => {}
            }
        }

        if self.is_at_bound() && (self.can_reset)(context) {
            self.current = match self.direction {
                ProgressDirection::Rising => 0,
                ProgressDirection::Falling => self.maximum,
            };
            (self.on_complete)();
            outcome.completed = true;
            trace!("meter `{}` completed at host time {}", self.name, host_time);
        }

        outcome
    }

    /// Ticks the meter with the context and time supplied by its host
    pub fn tick_host<H: MeterHost<Context = C>>(&mut self, host: &H) -> TickOutcome {
        self.tick(host.host_context(), host.current_host_time())
    }
}
