/// Largest packet the protocol will encode or accept, in bytes
pub const MTU_SIZE_BYTES: usize = 1200;
pub const MTU_SIZE_BITS: u32 = (MTU_SIZE_BYTES as u32) * 8;
