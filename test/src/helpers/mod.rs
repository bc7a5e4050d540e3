
pub use packet_exchange::{
    client_to_server, open_machine_session, server_to_client, test_client, test_server,
};
