/// PROPERTY-BASED TESTS: meter invariants
///
/// Key invariants:
/// 1. A rising meter never moves down except when it completes back to 0
/// 2. Only host times divisible by the tick rate advance the meter
/// 3. Saving and loading restores exactly current and maximum
/// 4. A session-bound packet never applies to a session with another id

use std::{cell::RefCell, rc::Rc};

use proptest::prelude::*;

use machina_shared::{
    CompoundRecord, MeterConfig, MeterRecord, ProgressDirection, ProgressMeter,
};
use machina_test::{client_to_server, test_client, test_server, MachineSession, SetMaximum, TestMachine};

fn config_strategy() -> impl Strategy<Value = MeterConfig> {
    (0i32..500, 1u32..20, 1u32..8).prop_map(|(maximum, increment, tick_rate)| MeterConfig {
        maximum,
        increment,
        tick_rate,
        direction: ProgressDirection::Rising,
    })
}

proptest! {
    /// Test that a rising meter only decreases by completing
    #[test]
    fn prop_rising_meter_is_monotonic(
        config in config_strategy(),
        resets in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let mut meter = ProgressMeter::<bool>::from_config("rising", config.clone()).unwrap();
        meter.set_can_reset(|allowed: &bool| *allowed);

        for (host_time, allowed) in resets.iter().enumerate() {
            let before = meter.current();
            let outcome = meter.tick(allowed, host_time as u64);
            let after = meter.current();

            if outcome.completed {
                prop_assert_eq!(after, 0);
            } else {
                prop_assert!(after >= before);
            }
            // overshoot is bounded by one increment
            prop_assert!(i64::from(after) < i64::from(config.maximum) + i64::from(config.increment));
        }
    }

    /// Test that non-qualifying host times never advance the meter
    #[test]
    fn prop_tick_rate_gates_advances(
        config in config_strategy(),
        steps in 1u64..300,
    ) {
        let mut meter = ProgressMeter::<()>::from_config("gated", config.clone()).unwrap();

        for host_time in 0..steps {
            let outcome = meter.tick(&(), host_time);
            if host_time % u64::from(config.tick_rate) != 0 {
                prop_assert!(!outcome.advanced);
            }
        }
    }

    /// Test that a save/load round trip restores progress and leaves configuration alone
    #[test]
    fn prop_persistence_round_trip(
        progress in any::<i32>(),
        max_progress in 0i32..i32::MAX,
        config in config_strategy(),
    ) {
        let mut source = ProgressMeter::<()>::new("source", 1).unwrap();
        source.load(&MeterRecord { progress, max_progress });

        let mut compound = CompoundRecord::new();
        source.save_to(&mut compound);

        let mut target = ProgressMeter::<()>::from_config("target", config.clone()).unwrap();
        target.load_from(&compound);

        prop_assert_eq!(target.current(), progress);
        prop_assert_eq!(target.maximum(), max_progress);
        prop_assert_eq!(target.increment(), config.increment);
        prop_assert_eq!(target.tick_rate(), config.tick_rate);
    }

    /// Test that a request carrying another session id never changes the machine
    #[test]
    fn prop_mismatched_session_never_applies(
        open_id in any::<i32>(),
        carried_id in any::<i32>(),
        maximum in 1i32..10_000,
    ) {
        prop_assume!(open_id != carried_id);

        let machine = Rc::new(RefCell::new(TestMachine::with_maximum(5)));
        let mut server = test_server();
        let user = server.user_connect();
        server.open_session(&user, MachineSession::new(open_id, &machine)).unwrap();

        let mut client = test_client();
        client.open_session(carried_id);
        let outcome = client_to_server(&mut server, &user, client.send(SetMaximum(maximum)));

        prop_assert!(outcome.is_dropped());
        prop_assert_eq!(machine.borrow().meter.maximum(), 5);
    }
}
