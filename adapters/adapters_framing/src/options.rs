//! Framing options.

/// Size of the big-endian length prefix in front of every packet.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum payload size (64 MiB).
pub const DEFAULT_MAX_PACKET_SIZE: u32 = 64 * 1024 * 1024;

/// Limits applied by readers, writers and [`PacketBuffer`](crate::PacketBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingOptions {
    /// Largest payload accepted or sent, excluding the length prefix.
    pub max_packet_size: u32,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
        }
    }
}

impl FramingOptions {
    pub fn with_max_packet_size(mut self, max_packet_size: u32) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    /// Checks `len` against the maximum.
    pub(crate) fn check_len(&self, len: usize) -> crate::Result<u32> {
        match u32::try_from(len) {
            Ok(n) if n <= self.max_packet_size => Ok(n),
            _ => Err(crate::FramingError::PacketTooLarge {
                len,
                max: self.max_packet_size,
            }),
        }
    }
}
