//! # Machina Server
//! The authoritative host: tracks connected users and the session each has
//! open, and runs client packets through the receive pipeline against the
//! sending user.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use machina_shared::{
        BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SignedInteger,
        SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
    };
}

mod error;
mod server;
mod user;

pub use error::ServerError;
pub use server::{Server, ServerConfig};
pub use user::{User, UserKey};
