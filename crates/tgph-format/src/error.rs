// File: crates/tgph-format/src/error.rs
// Summary: Decode/encode error taxonomy. Every variant is fatal; no partial container
//          list survives one, and no unrepresentable document reaches the wire.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bad magic 0x{0:08x}")]
    BadMagic(u32),

    #[error("unsupported version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown element type tag {0}")]
    UnknownElementType(u8),

    /// The buffer ended before the declared structure did. Carries the
    /// cursor offset at which the read failed.
    #[error("unexpected end of buffer at offset {0}")]
    UnexpectedEof(u64),

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        offset: u64,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Appending a value whose type disagrees with the container it names.
    #[error("container {name:?} holds {existing:?} elements, cannot append {pushed:?}")]
    TypeMismatch {
        name: String,
        existing: crate::ElementType,
        pushed: crate::ElementType,
    },

    /// A length field would overflow its fixed-width wire encoding.
    /// Refused up front: truncating the prefix while writing every byte
    /// would desync the stream and make the document undecodable.
    #[error("{what} length {len} exceeds the wire maximum {max}")]
    Oversized {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("i/o failure while encoding")]
    Io(#[from] std::io::Error),
}
