use std::{cell::RefCell, rc::Rc};

use machina_server::ServerError;
use machina_shared::{DropReason, PacketError, PacketOutcome, SessionBound};
use machina_test::{
    client_to_server, test_client, test_server, MachineSession, SetIncrement, SetMaximum,
    SetPowered, TestMachine,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn shared_machine(maximum: i32) -> Rc<RefCell<TestMachine>> {
    Rc::new(RefCell::new(TestMachine::with_maximum(maximum)))
}

#[test]
fn matching_session_applies_request() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(7, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(7);

    let outcome = client_to_server(&mut server, &user, client.send(SetMaximum(250)));

    assert_eq!(outcome, PacketOutcome::Applied);
    assert_eq!(machine.borrow().meter.maximum(), 250);
}

#[test]
fn stale_session_is_dropped_without_mutation() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(7, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(5);

    let outcome = client_to_server(&mut server, &user, client.send(SetMaximum(250)));

    assert_eq!(
        outcome,
        PacketOutcome::Dropped(DropReason::SessionMismatch {
            carried: 5,
            active: Some(7),
        })
    );
    assert_eq!(machine.borrow().meter.maximum(), 100);
}

#[test]
fn request_after_server_closed_session_is_dropped() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(3, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(3);
    let bytes = client.send(SetPowered(false));
    server.close_session(&user).unwrap();

    let outcome = client_to_server(&mut server, &user, bytes);

    assert_eq!(
        outcome.drop_reason(),
        Some(&DropReason::SessionMismatch {
            carried: 3,
            active: None,
        })
    );
    assert!(machine.borrow().clock.state.powered);
}

#[test]
fn requests_only_touch_the_senders_session() {
    init_logger();
    let first_machine = shared_machine(10);
    let second_machine = shared_machine(10);
    let mut server = test_server();
    let first = server.user_connect();
    let second = server.user_connect();
    server
        .open_session(&first, MachineSession::new(1, &first_machine))
        .unwrap();
    server
        .open_session(&second, MachineSession::new(1, &second_machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(1);
    client_to_server(&mut server, &second, client.send(SetIncrement(4)));

    assert_eq!(first_machine.borrow().meter.increment(), 1);
    assert_eq!(second_machine.borrow().meter.increment(), 4);
}

#[test]
fn invalid_payload_is_dropped_before_session_resolution() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(2, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(2);

    let outcome = client_to_server(&mut server, &user, client.send(SetIncrement(0)));

    assert!(matches!(
        outcome,
        PacketOutcome::Dropped(DropReason::Invalid { .. })
    ));
    assert_eq!(machine.borrow().meter.increment(), 1);
}

#[test]
fn session_id_follows_the_kind_tag() {
    let mut client = test_client();
    client.open_session(7);

    let bytes = client.send(SetPowered(true)).unwrap();

    assert_eq!(&bytes[1..5], &7_i32.to_le_bytes());
}

#[test]
fn truncated_request_is_a_decode_error() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(7, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(7);
    let bytes = client.send(SetMaximum(250)).unwrap();

    for length in 0..bytes.len() {
        assert!(matches!(
            server.receive(&user, &bytes[..length]),
            Err(ServerError::Packet(PacketError::Decode(_)))
        ));
    }
    assert_eq!(machine.borrow().meter.maximum(), 100);
}

#[test]
fn trailing_bytes_are_rejected() {
    let machine = shared_machine(100);
    let mut server = test_server();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(7, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(7);
    let mut bytes = client.send(SetMaximum(250)).unwrap();
    bytes.push(0);

    assert!(matches!(
        server.receive(&user, &bytes),
        Err(ServerError::Packet(PacketError::TrailingBytes { .. }))
    ));
}

#[test]
fn unregistered_handler_is_dropped() {
    init_logger();
    let machine = shared_machine(100);
    let mut server = machina_server::Server::new(
        machina_server::ServerConfig::default(),
        machina_test::protocol(),
    );
    server.add_handler::<SessionBound<SetMaximum>>();
    let user = server.user_connect();
    server
        .open_session(&user, MachineSession::new(7, &machine))
        .unwrap();

    let mut client = test_client();
    client.open_session(7);

    let outcome = client_to_server(&mut server, &user, client.send(SetPowered(false)));

    assert!(matches!(
        outcome,
        PacketOutcome::Dropped(DropReason::Unhandled { .. })
    ));
}
