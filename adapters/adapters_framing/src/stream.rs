//! Blocking packet reader and writer over `std::io` streams.
//!
//! Each packet is a 4-byte big-endian length followed by that many payload bytes,
//! the framing the peer runtime uses for port programs opened with `{packet, 4}`.

use std::io::{ErrorKind, Read, Write};

use entities_data_handling::Term;
use infrastructure_external_format::{decode_with, encode_with, DecodeOptions, EncodeOptions};
use log::{trace, warn};

use crate::error::{FramingError, Result};
use crate::options::{FramingOptions, LENGTH_PREFIX_SIZE};

/// Reads length-prefixed packets from a byte stream.
#[derive(Debug)]
pub struct PacketReader<R> {
    inner: R,
    options: FramingOptions,
    decode_options: DecodeOptions,
}

impl<R: Read> PacketReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, FramingOptions::default())
    }

    pub fn with_options(inner: R, options: FramingOptions) -> Self {
        Self {
            inner,
            options,
            decode_options: DecodeOptions::default(),
        }
    }

    /// Options used by [`read_term`](Self::read_term).
    pub fn with_decode_options(mut self, decode_options: DecodeOptions) -> Self {
        self.decode_options = decode_options;
        self
    }

    /// Read the next packet payload.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly before a length prefix.
    /// End of stream anywhere else is [`FramingError::TruncatedPacket`].
    pub fn read_packet(&mut self) -> Result<Option<Vec<u8>>> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        let got = read_full(&mut self.inner, &mut prefix)?;
        if got == 0 {
            trace!("end of stream");
            return Ok(None);
        }
        if got < LENGTH_PREFIX_SIZE {
            warn!("stream ended inside length prefix");
            return Err(FramingError::TruncatedPacket {
                expected: LENGTH_PREFIX_SIZE,
                received: got,
            });
        }

        let len = u32::from_be_bytes(prefix);
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

        let len = len as usize;
        let mut payload = vec![0u8; len];
        let got = read_full(&mut self.inner, &mut payload)?;
        if got < len {
            warn!("stream ended after {} of {} payload bytes", got, len);
            return Err(FramingError::TruncatedPacket {
                expected: len,
                received: got,
            });
        }
        trace!("read packet of {} bytes", len);
        Ok(Some(payload))
    }

    /// Read the next packet and decode it as one term.
    pub fn read_term(&mut self) -> Result<Option<Term>> {
        match self.read_packet()? {
            Some(payload) => Ok(Some(decode_with(&payload, &self.decode_options)?)),
            None => Ok(None),
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Fill `buf` as far as the stream allows; returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Writes length-prefixed packets to a byte stream.
#[derive(Debug)]
pub struct PacketWriter<W: Write> {
    inner: W,
    options: FramingOptions,
    encode_options: EncodeOptions,
}

impl<W: Write> PacketWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, FramingOptions::default())
    }

    pub fn with_options(inner: W, options: FramingOptions) -> Self {
        Self {
            inner,
            options,
            encode_options: EncodeOptions::default(),
        }
    }

    pub fn with_encode_options(mut self, encode_options: EncodeOptions) -> Self {
        self.encode_options = encode_options;
        self
    }

    /// Write one packet. Nothing is written if `payload` is too large.
    pub fn write_packet(&mut self, payload: &[u8]) -> Result<()> {
        let len = self.options.check_len(payload.len()).map_err(|e| {
            warn!("refusing to send packet of {} bytes", payload.len());
            e
        })?;
        self.inner.write_all(&len.to_be_bytes())?;
        self.inner.write_all(payload)?;
        trace!("wrote packet of {} bytes", payload.len());
        Ok(())
    }

    /// Encode `term` and write it as one packet.
    pub fn write_term(&mut self, term: &Term) -> Result<()> {
        let payload = encode_with(term, &self.encode_options)?;
        self.write_packet(&payload)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
