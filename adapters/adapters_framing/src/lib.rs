//! Adapters Layer: Framing
//!
//! Carries encoded terms over a byte stream as 4-byte big-endian length-prefixed
//! packets, the framing a port program talks when opened with `{packet, 4}`.
//!
//! - [`PacketReader`] / [`PacketWriter`]: blocking, over `std::io::Read` / `Write`
//! - [`PacketBuffer`]: incremental splitting of chunks from a non-blocking source
//!
//! ```rust
//! use adapters_framing::{PacketReader, PacketWriter};
//! use entities_data_handling::Term;
//!
//! let mut writer = PacketWriter::new(Vec::new());
//! writer.write_term(&Term::atom("ping")).unwrap();
//!
//! let mut reader = PacketReader::new(std::io::Cursor::new(writer.into_inner()));
//! assert_eq!(reader.read_term().unwrap(), Some(Term::atom("ping")));
//! ```

pub mod error;
pub mod options;
pub mod packet_buffer;
pub mod stream;

pub use error::{FramingError, Result};
pub use options::{FramingOptions, DEFAULT_MAX_PACKET_SIZE, LENGTH_PREFIX_SIZE};
pub use packet_buffer::PacketBuffer;
pub use stream::{PacketReader, PacketWriter};
