/// Host simulation steps per real-time second, used for ETA projection
pub const HOST_TICKS_PER_SECOND: u32 = 20;

/// Session id carried by handler-side packet instances that do not target a live session
pub const UNBOUND_SESSION_ID: i32 = 0;
