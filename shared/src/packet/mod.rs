pub mod direction;
pub mod dispatcher;
pub mod error;
pub mod packet;
pub mod packet_kinds;
pub mod session;
pub mod session_bound;
