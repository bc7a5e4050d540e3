pub mod helpers;
pub mod test_machine;

pub use helpers::*;
pub use test_machine::{MachineClock, MachineSession, MachineState, TestMachine};
pub use test_protocol::{protocol, MachinePlugin, SetIncrement, SetMaximum, SetPowered};
