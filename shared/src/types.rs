/// Monotonic count of host simulation steps
pub type HostTime = u64;
/// Identifies an open session (e.g. an open machine interface) on the authoritative host
pub type SessionId = i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    pub fn invert(self) -> Self {
        match self {
            HostType::Server => HostType::Client,
            HostType::Client => HostType::Server,
        }
    }
}
