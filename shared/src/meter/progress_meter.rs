use std::fmt;

use crate::meter::{
    config::{check_at_least_one, check_maximum, MeterConfig},
    direction::ProgressDirection,
    error::MeterError,
};

/// Evaluated against the host's context to gate advancing or resetting
pub type MeterPredicate<C> = Box<dyn Fn(&C) -> bool>;
/// Side-effecting hook fired at a meter transition
pub type MeterCallback = Box<dyn FnMut()>;

/// A tick-driven progress meter owned by a host entity.
///
/// `C` is the host context handed to the gating predicates on every tick.
/// The meter holds non-`Send` closures and must stay on the thread that owns
/// its host.
pub struct ProgressMeter<C> {
    pub(super) name: String,
    pub(super) current: i32,
    pub(super) maximum: i32,
    pub(super) increment: u32,
    pub(super) tick_rate: u32,
    pub(super) direction: ProgressDirection,
    pub(super) can_advance: MeterPredicate<C>,
    pub(super) can_reset: MeterPredicate<C>,
    pub(super) on_start: MeterCallback,
    pub(super) on_tick: MeterCallback,
    pub(super) on_complete: MeterCallback,
}

impl<C> ProgressMeter<C> {
    /// Creates a rising meter with the default increment and tick rate
    pub fn new<N: Into<String>>(name: N, maximum: i32) -> Result<Self, MeterError> {
        Self::from_config(name, MeterConfig::new(maximum))
    }

    pub fn from_config<N: Into<String>>(name: N, config: MeterConfig) -> Result<Self, MeterError> {
        config.validate()?;

        let MeterConfig {
            maximum,
            increment,
            tick_rate,
            direction,
        } = config;

        Ok(Self {
            name: name.into(),
            current: 0,
            maximum,
            increment,
            tick_rate,
            direction,
            can_advance: Box::new(|_| true),
            can_reset: Box::new(|_| true),
            on_start: Box::new(|| {}),
            on_tick: Box::new(|| {}),
            on_complete: Box::new(|| {}),
        })
    }

    // Accessors

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn direction(&self) -> ProgressDirection {
        self.direction
    }

    /// `current / maximum`, clamped to `[0, 1]`. A meter with no maximum reads as empty.
    pub fn progress_fraction(&self) -> f32 {
        progress_fraction(self.current, self.maximum)
    }

    /// Whether the meter sits at (or past) the bound it is moving toward and
    /// is only waiting for its reset predicate to complete
    pub fn is_at_bound(&self) -> bool {
        match self.direction {
            ProgressDirection::Rising => self.current >= self.maximum,
            ProgressDirection::Falling => self.current <= 0,
        }
    }

    pub fn can_advance(&self, context: &C) -> bool {
        (self.can_advance)(context)
    }

    pub fn can_reset(&self, context: &C) -> bool {
        (self.can_reset)(context)
    }

    // Configuration, takes effect on the next tick

    pub fn set_maximum(&mut self, maximum: i32) -> Result<(), MeterError> {
        check_maximum(maximum)?;
        self.maximum = maximum;
        Ok(())
    }

    pub fn set_increment(&mut self, increment: u32) -> Result<(), MeterError> {
        check_at_least_one("increment", increment)?;
        self.increment = increment;
        Ok(())
    }

    pub fn set_tick_rate(&mut self, tick_rate: u32) -> Result<(), MeterError> {
        check_at_least_one("tick_rate", tick_rate)?;
        self.tick_rate = tick_rate;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: ProgressDirection) {
        self.direction = direction;
    }

    pub fn set_can_advance<F: Fn(&C) -> bool + 'static>(&mut self, predicate: F) {
        self.can_advance = Box::new(predicate);
    }

    pub fn set_can_reset<F: Fn(&C) -> bool + 'static>(&mut self, predicate: F) {
        self.can_reset = Box::new(predicate);
    }

    /// Fired when an advance moves the meter off its starting bound
    /// (`0` when rising, `maximum` when falling)
    pub fn on_start<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_start = Box::new(callback);
    }

    /// Fired after every advance
    pub fn on_tick<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_tick = Box::new(callback);
    }

    /// Fired after the meter is reset at its bound
    pub fn on_complete<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_complete = Box::new(callback);
    }
}

pub(crate) fn progress_fraction(current: i32, maximum: i32) -> f32 {
    if maximum <= 0 {
        return 0.0;
    }
    (current as f32 / maximum as f32).clamp(0.0, 1.0)
}

impl<C> fmt::Debug for ProgressMeter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressMeter")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("maximum", &self.maximum)
            .field("increment", &self.increment)
            .field("tick_rate", &self.tick_rate)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}
