//! Packet buffer for accumulating partial reads.
//!
//! Bytes arrive in arbitrary chunks; the buffer keeps them in one `BytesMut` and
//! hands back every packet payload that has become complete:
//! - `WaitingForHeader`: need [`LENGTH_PREFIX_SIZE`] bytes
//! - `WaitingForPayload`: prefix parsed, need `remaining` more payload bytes
//!
//! ```
//! use adapters_framing::PacketBuffer;
//!
//! let mut buffer = PacketBuffer::new();
//! assert!(buffer.push(&[0, 0, 0, 2, 131]).unwrap().is_empty());
//! let packets = buffer.push(&[106]).unwrap();
//! assert_eq!(packets[0].as_ref(), &[131, 106]);
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use entities_data_handling::Term;
use infrastructure_external_format::{decode_with, DecodeError, DecodeOptions};
use log::{trace, warn};

use crate::error::{FramingError, Result};
use crate::options::{FramingOptions, LENGTH_PREFIX_SIZE};

const INITIAL_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy)]
enum State {
    WaitingForHeader,
    WaitingForPayload { remaining: usize },
}

/// Incremental splitter of a byte stream into length-prefixed packets.
#[derive(Debug)]
pub struct PacketBuffer {
    buffer: BytesMut,
    state: State,
    options: FramingOptions,
}

impl Default for PacketBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketBuffer {
    pub fn new() -> Self {
        Self::with_options(FramingOptions::default())
    }

    pub fn with_options(options: FramingOptions) -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
            state: State::WaitingForHeader,
            options,
        }
    }

    /// Append `data` and extract all complete packet payloads.
    ///
    /// Incomplete data stays buffered for the next call. A length prefix above
    /// `max_packet_size` is an error; the buffer should be cleared or dropped after it.
    /// Packets completed before such a prefix are still returned, and the prefix stays
    /// buffered so the following call reports it.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Bytes>> {
        self.buffer.extend_from_slice(data);

        let mut packets = Vec::new();
        loop {
            match self.try_extract_one() {
                Ok(Some(packet)) => packets.push(packet),
                Ok(None) => break,
                Err(_) if !packets.is_empty() => break,
                Err(err) => return Err(err),
            }
        }
        Ok(packets)
    }

    /// Like [`push`](Self::push), decoding each payload as one term.
    ///
    /// Payloads decode independently: one malformed payload yields its own `Err` in
    /// place and does not affect the packets around it.
    pub fn push_terms(
        &mut self,
        data: &[u8],
        options: &DecodeOptions,
    ) -> Result<Vec<std::result::Result<Term, DecodeError>>> {
        let packets = self.push(data)?;
        Ok(packets
            .iter()
            .map(|packet| {
                let term = decode_with(packet, options);
                if let Err(err) = &term {
                    warn!("undecodable packet of {} bytes: {}", packet.len(), err);
                }
                term
            })
            .collect())
    }

    fn try_extract_one(&mut self) -> Result<Option<Bytes>> {
        loop {
            match self.state {
                State::WaitingForHeader => {
                    if self.buffer.len() < LENGTH_PREFIX_SIZE {
                        return Ok(None);
                    }
                    let len = u32::from_be_bytes([
                        self.buffer[0],
                        self.buffer[1],
                        self.buffer[2],
                        self.buffer[3],
                    ]);
                    if len > self.options.max_packet_size {
                        warn!(
                            "packet length {} exceeds maximum {}",
                            len, self.options.max_packet_size
                        );
                        return Err(FramingError::PacketTooLarge {
                            len: len as usize,
                            max: self.options.max_packet_size,
                        });
                    }
                    self.buffer.advance(LENGTH_PREFIX_SIZE);
                    self.state = State::WaitingForPayload {
                        remaining: len as usize,
                    };
                }
                State::WaitingForPayload { remaining } => {
                    if self.buffer.len() < remaining {
                        return Ok(None);
                    }
                    let payload = self.buffer.split_to(remaining).freeze();
                    self.state = State::WaitingForHeader;
                    trace!("extracted packet of {} bytes", payload.len());
                    return Ok(Some(payload));
                }
            }
        }
    }

    /// Number of buffered bytes not yet returned as packets.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop buffered bytes and wait for a fresh length prefix.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    /// Prefix `payload` with its length.
    pub fn encode_packet(&self, payload: &[u8]) -> Result<Bytes> {
        let len = self.options.check_len(payload.len())?;
        let mut out = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
        out.put_u32(len);
        out.put_slice(payload);
        Ok(out.freeze())
    }
}
