//! # Machina Client
//! Opens sessions against the authoritative host, sends session-bound
//! requests, and keeps a read-only view of the meters the server syncs.

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

mod client;
mod client_config;
mod context;
mod error;
mod meter_view;

pub use client::Client;
pub use client_config::ClientConfig;
pub use context::{ClientContext, ClientSession};
pub use error::ClientError;
pub use meter_view::MeterView;
