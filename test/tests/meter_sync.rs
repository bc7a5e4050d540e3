use std::{cell::RefCell, rc::Rc};

use machina_server::ServerError;
use machina_shared::{DropReason, MeterConfig, PacketOutcome, ProgressDirection};
use machina_test::{
    client_to_server, open_machine_session, server_to_client, test_client, test_server,
    SetPowered, TestMachine,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn client_view_follows_server_meter() {
    init_logger();
    let machine = Rc::new(RefCell::new(TestMachine::with_maximum(200)));
    let mut server = test_server();
    let mut client = test_client();
    let user = open_machine_session(&mut server, &mut client, 1, &machine);

    machine.borrow_mut().run(50);
    let outcome = server_to_client(&server, &user, &mut client, &machine.borrow().meter).unwrap();
    assert_eq!(outcome, PacketOutcome::Applied);

    let view = client.meter("process").unwrap();
    assert_eq!(view.current(), 50);
    assert_eq!(view.maximum(), 200);
    assert_eq!(view.progress_fraction(), 0.25);
    assert_eq!(
        client.meter_eta("process"),
        Some(machine.borrow().meter.eta_default())
    );

    machine.borrow_mut().run(10);
    server_to_client(&server, &user, &mut client, &machine.borrow().meter).unwrap();
    assert_eq!(client.meter("process").unwrap().current(), 60);
    assert_eq!(client.meter("process").unwrap().syncs(), 2);
}

#[test]
fn falling_meter_syncs_direction() {
    let machine = Rc::new(RefCell::new(TestMachine::new(MeterConfig {
        increment: 10,
        direction: ProgressDirection::Falling,
        ..MeterConfig::new(100)
    })));
    let mut server = test_server();
    let mut client = test_client();
    let user = open_machine_session(&mut server, &mut client, 1, &machine);

    // first call refills the empty meter
    machine.borrow_mut().step();
    machine.borrow_mut().step();
    server_to_client(&server, &user, &mut client, &machine.borrow().meter).unwrap();

    let view = client.meter("process").unwrap();
    assert_eq!(view.direction(), ProgressDirection::Falling);
    assert_eq!(view.current(), 90);
}

#[test]
fn powering_down_over_the_wire_stalls_the_meter() {
    init_logger();
    let machine = Rc::new(RefCell::new(TestMachine::with_maximum(100)));
    let mut server = test_server();
    let mut client = test_client();
    let user = open_machine_session(&mut server, &mut client, 11, &machine);

    machine.borrow_mut().run(5);
    let outcome = client_to_server(&mut server, &user, client.send(SetPowered(false)));
    assert!(outcome.is_applied());
    machine.borrow_mut().run(5);

    assert_eq!(machine.borrow().meter.current(), 5);

    server_to_client(&server, &user, &mut client, &machine.borrow().meter).unwrap();
    assert_eq!(client.meter("process").unwrap().current(), 5);
}

#[test]
fn sync_in_flight_across_a_session_change_is_dropped() {
    init_logger();
    let machine = Rc::new(RefCell::new(TestMachine::with_maximum(100)));
    let mut server = test_server();
    let mut client = test_client();
    let user = open_machine_session(&mut server, &mut client, 4, &machine);

    machine.borrow_mut().run(5);
    let stale = server.sync_meter(&user, &machine.borrow().meter).unwrap();

    client.close_session();
    assert_eq!(
        client.receive(&stale).unwrap(),
        PacketOutcome::Dropped(DropReason::SessionMismatch {
            carried: 4,
            active: None,
        })
    );
    assert!(client.meter("process").is_none());

    client.open_session(9);
    assert!(matches!(
        client.receive(&stale).unwrap().drop_reason(),
        Some(DropReason::SessionMismatch {
            carried: 4,
            active: Some(9),
        })
    ));
    assert!(client.meter("process").is_none());
}

#[test]
fn sync_without_a_server_session_is_refused() {
    let machine = Rc::new(RefCell::new(TestMachine::with_maximum(100)));
    let mut server = test_server();
    let mut client = test_client();
    let user = open_machine_session(&mut server, &mut client, 2, &machine);
    server.close_session(&user).unwrap();

    assert_eq!(
        server_to_client(&server, &user, &mut client, &machine.borrow().meter),
        Err(ServerError::NoActiveSession { user_key: user })
    );
}
