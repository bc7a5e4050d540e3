use std::{cell::Cell, cell::RefCell, rc::Rc};

use machina_shared::{
    HostTime, MeterConfig, MeterHost, ProgressMeter, Session, SessionId, TickOutcome,
};

/// World state the machine's meter is gated on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineState {
    pub powered: bool,
    pub output_blocked: bool,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            powered: true,
            output_blocked: false,
        }
    }
}

/// Supplies the context and step counter a meter ticks against
#[derive(Default)]
pub struct MachineClock {
    pub state: MachineState,
    pub host_time: HostTime,
}

impl MeterHost for MachineClock {
    type Context = MachineState;

    fn host_context(&self) -> &MachineState {
        &self.state
    }

    fn current_host_time(&self) -> HostTime {
        self.host_time
    }
}

/// A processing machine: advances while powered, completes once its output
/// slot is free
pub struct TestMachine {
    pub clock: MachineClock,
    pub meter: ProgressMeter<MachineState>,
    completions: Rc<Cell<u32>>,
}

impl TestMachine {
    pub fn new(config: MeterConfig) -> Self {
        let mut meter = ProgressMeter::from_config("process", config).expect("valid meter config");
        meter.set_can_advance(|state: &MachineState| state.powered);
        meter.set_can_reset(|state: &MachineState| !state.output_blocked);

        let completions = Rc::new(Cell::new(0));
        let counter = completions.clone();
        meter.on_complete(move || counter.set(counter.get() + 1));

        Self {
            clock: MachineClock::default(),
            meter,
            completions,
        }
    }

    pub fn with_maximum(maximum: i32) -> Self {
        Self::new(MeterConfig::new(maximum))
    }

    /// Ticks the meter at the current host time, then moves time forward
    pub fn step(&mut self) -> TickOutcome {
        let outcome = self.meter.tick_host(&self.clock);
        self.clock.host_time += 1;
        outcome
    }

    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn completions(&self) -> u32 {
        self.completions.get()
    }

    pub fn state_mut(&mut self) -> &mut MachineState {
        &mut self.clock.state
    }
}

/// The machine interface a user has open on the server
pub struct MachineSession {
    session_id: SessionId,
    pub machine: Rc<RefCell<TestMachine>>,
}

impl MachineSession {
    pub fn new(session_id: SessionId, machine: &Rc<RefCell<TestMachine>>) -> Self {
        Self {
            session_id,
            machine: machine.clone(),
        }
    }
}

impl Session for MachineSession {
    fn session_id(&self) -> SessionId {
        self.session_id
    }
}
