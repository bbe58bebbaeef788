//! Basic low-level byte parser functionality.
//!
//! Bit sources and header files are both read byte by byte through a
//! [ByteParser], which works on any [ByteSource]: fully loaded into memory
//! ([InMemoryByteSource]) or streamed through a buffered reader
//! ([BufferedByteSource]).

pub mod buffered_byte_source;
pub mod byte_parser;
pub mod byte_source;
pub mod in_memory_byte_source;

pub use buffered_byte_source::BufferedByteSource;
pub use byte_parser::ByteParser;
pub use byte_source::ByteSource;
pub use in_memory_byte_source::InMemoryByteSource;
