use std::{cell::RefCell, rc::Rc};

use machina_shared::{
    CompoundRecord, MeterConfig, MeterRecord, ProgressDirection, ProgressMeter, TickOutcome,
};
use machina_test::TestMachine;

type Log = Rc<RefCell<Vec<&'static str>>>;

fn logged_meter(config: MeterConfig) -> (ProgressMeter<bool>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut meter = ProgressMeter::from_config("logged", config).unwrap();
    meter.set_can_reset(|ready: &bool| *ready);

    let start_log = log.clone();
    meter.on_start(move || start_log.borrow_mut().push("start"));
    let tick_log = log.clone();
    meter.on_tick(move || tick_log.borrow_mut().push("tick"));
    let complete_log = log.clone();
    meter.on_complete(move || complete_log.borrow_mut().push("complete"));

    (meter, log)
}

#[test]
fn overshoot_then_reset_in_one_call() {
    let (mut meter, log) = logged_meter(MeterConfig {
        increment: 4,
        ..MeterConfig::new(10)
    });
    meter.load(&MeterRecord {
        progress: 8,
        max_progress: 10,
    });

    let outcome = meter.tick(&true, 0);

    assert_eq!(meter.current(), 0);
    assert_eq!(*log.borrow(), vec!["tick", "complete"]);
    assert_eq!(
        outcome,
        TickOutcome {
            started: false,
            advanced: true,
            completed: true,
        }
    );
}

#[test]
fn stalled_at_bound_until_reset_allowed() {
    let (mut meter, log) = logged_meter(MeterConfig {
        increment: 4,
        ..MeterConfig::new(10)
    });
    meter.load(&MeterRecord {
        progress: 8,
        max_progress: 10,
    });

    meter.tick(&false, 0);
    assert_eq!(meter.current(), 12);

    for host_time in 1..20 {
        meter.tick(&false, host_time);
        assert_eq!(meter.current(), 12);
    }
    assert_eq!(*log.borrow(), vec!["tick"]);

    meter.tick(&true, 20);
    assert_eq!(meter.current(), 0);
    assert_eq!(*log.borrow(), vec!["tick", "complete"]);
}

#[test]
fn tick_rate_gates_advances() {
    let mut meter = ProgressMeter::<()>::from_config(
        "gated",
        MeterConfig {
            tick_rate: 3,
            ..MeterConfig::new(100)
        },
    )
    .unwrap();

    let changed: Vec<u64> = (0..=3)
        .filter(|host_time| meter.tick(&(), *host_time).advanced)
        .collect();

    assert_eq!(changed, vec![0, 3]);
    assert_eq!(meter.current(), 2);
}

#[test]
fn falling_meter_refills_and_drains() {
    let (mut meter, log) = logged_meter(MeterConfig {
        increment: 5,
        direction: ProgressDirection::Falling,
        ..MeterConfig::new(10)
    });

    // empty falling meter sits at its bound and refills
    meter.tick(&true, 0);
    assert_eq!(meter.current(), 10);
    assert_eq!(*log.borrow(), vec!["complete"]);

    meter.tick(&true, 1);
    meter.tick(&true, 2);
    assert_eq!(meter.current(), 10);
    assert_eq!(
        *log.borrow(),
        vec!["complete", "start", "tick", "tick", "complete"]
    );
}

#[test]
fn machine_completes_a_cycle_per_maximum_steps() {
    let mut machine = TestMachine::with_maximum(10);

    machine.run(30);

    assert_eq!(machine.completions(), 3);
    assert_eq!(machine.meter.current(), 0);
}

#[test]
fn unpowered_machine_still_completes_a_full_meter() {
    let mut machine = TestMachine::with_maximum(4);
    machine.run(3);
    machine.state_mut().powered = false;

    machine.run(5);
    assert_eq!(machine.meter.current(), 3);
    assert_eq!(machine.completions(), 0);

    machine.meter.load(&MeterRecord {
        progress: 4,
        max_progress: 4,
    });
    machine.step();
    assert_eq!(machine.meter.current(), 0);
    assert_eq!(machine.completions(), 1);
}

#[test]
fn blocked_output_holds_the_meter() {
    let mut machine = TestMachine::with_maximum(3);
    machine.state_mut().output_blocked = true;

    machine.run(10);
    assert_eq!(machine.meter.current(), 3);
    assert!(machine.meter.is_at_bound());

    machine.state_mut().output_blocked = false;
    machine.step();
    assert_eq!(machine.meter.current(), 0);
    assert_eq!(machine.completions(), 1);
}

#[test]
fn persistence_survives_a_reload() {
    let mut machine = TestMachine::new(MeterConfig {
        increment: 3,
        tick_rate: 2,
        ..MeterConfig::new(90)
    });
    machine.run(20);

    let mut compound = CompoundRecord::new();
    machine.meter.save_to(&mut compound);

    let mut reloaded = TestMachine::new(MeterConfig {
        increment: 3,
        tick_rate: 2,
        ..MeterConfig::new(1)
    });
    reloaded.meter.load_from(&compound);

    assert_eq!(reloaded.meter.current(), 30);
    assert_eq!(reloaded.meter.maximum(), 90);
    assert_eq!(reloaded.meter.save(), machine.meter.save());
}
