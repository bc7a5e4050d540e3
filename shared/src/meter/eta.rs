use crate::{
    constants::HOST_TICKS_PER_SECOND,
    meter::{direction::ProgressDirection, progress_meter::ProgressMeter},
};

/// Advisory time-to-completion projection for display.
///
/// `remaining_ticks` counts increments left; a zero or negative value means
/// completion is imminent (the meter may have overshot its bound).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eta {
    pub remaining_ticks: i64,
    pub seconds: i64,
}

impl Eta {
    /// Projects from raw meter values.
    ///
    /// A falling meter reuses the rising quotient and subtracts it from
    /// `maximum`, so `remaining_ticks = maximum - (maximum - current) / increment`.
    pub fn projection(
        current: i32,
        maximum: i32,
        increment: u32,
        tick_rate: u32,
        direction: ProgressDirection,
        ticks_per_second: u32,
    ) -> Self {
        let increment = i64::from(increment.max(1));
        let maximum = i64::from(maximum);

        let mut remaining_ticks = (maximum - i64::from(current)) / increment;
        if !direction.is_rising() {
            remaining_ticks = maximum - remaining_ticks;
        }

        let scaled = remaining_ticks.saturating_mul(i64::from(tick_rate)) as f64;
        let seconds = (scaled / f64::from(ticks_per_second.max(1))).ceil() as i64;

        Self {
            remaining_ticks,
            seconds,
        }
    }

    pub fn is_imminent(&self) -> bool {
        self.remaining_ticks <= 0
    }
}

impl<C> ProgressMeter<C> {
    pub fn eta(&self, ticks_per_second: u32) -> Eta {
        Eta::projection(
            self.current,
            self.maximum,
            self.increment,
            self.tick_rate,
            self.direction,
            ticks_per_second,
        )
    }

    /// ETA at the host's standard step rate
    pub fn eta_default(&self) -> Eta {
        self.eta(HOST_TICKS_PER_SECOND)
    }
}
