use std::fmt;

use crate::types::HostType;

/// Which way a packet type travels. Fixed per packet type, never per instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketDirection {
    ClientToServer,
    ServerToClient,
}

impl PacketDirection {
    pub fn sender(&self) -> HostType {
        match self {
            PacketDirection::ClientToServer => HostType::Client,
            PacketDirection::ServerToClient => HostType::Server,
        }
    }

    pub fn receiver(&self) -> HostType {
        self.sender().invert()
    }

    pub fn can_send(&self, host_type: HostType) -> bool {
        self.sender() == host_type
    }

    pub fn can_receive(&self, host_type: HostType) -> bool {
        self.receiver() == host_type
    }
}

impl fmt::Display for PacketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketDirection::ClientToServer => write!(f, "client -> server"),
            PacketDirection::ServerToClient => write!(f, "server -> client"),
        }
    }
}
