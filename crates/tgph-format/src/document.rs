// File: crates/tgph-format/src/document.rs
// Summary: TGPH document: byte-exact decode/encode of the container wire format plus the
//          bounded append recorder used by the collector.

use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;

use crate::container::{Container, ElementArray, ElementType};
use crate::error::FormatError;

/// "TGPH" read as a little-endian u32.
pub const MAGIC: u32 = 0x4850_4754;
pub const VERSION: u8 = 1;

const DEFAULT_ENTRY_LIMIT: usize = 1000;

/// A decoded (or under-construction) TGPH snapshot: an ordered list of
/// named, typed containers.
pub struct Tgph {
    pub containers: Vec<Container>,
    entry_limit: usize,
}

impl Default for Tgph {
    fn default() -> Self {
        Self { containers: Vec::new(), entry_limit: DEFAULT_ENTRY_LIMIT }
    }
}

impl Tgph {
    /// Recorder constructor: containers keep at most `entry_limit` newest
    /// elements when built through [`Tgph::append`].
    pub fn with_entry_limit(entry_limit: usize) -> Self {
        Self { containers: Vec::new(), entry_limit }
    }

    pub fn add_container(&mut self, container: Container) {
        self.containers.push(container);
    }

    /// Append one element to the container named `name`, creating it with
    /// the element's type when absent. Oldest elements are evicted past
    /// the entry limit.
    pub fn append<T: AppendElement>(&mut self, value: T, name: &str) -> Result<(), FormatError> {
        value.push_into(self, name)
    }

    /// Decode a complete snapshot from a raw byte buffer. Fatal on any
    /// malformed structure; never returns a partial container list.
    /// Trailing bytes after the last container are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut cur = Cursor::new(bytes);

        let magic = read_u32(&mut cur)?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic(magic));
        }
        let version = read_u8(&mut cur)?;
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }

        let container_count = read_u16(&mut cur)?;
        let mut containers = Vec::with_capacity(container_count as usize);
        for _ in 0..container_count {
            containers.push(decode_container(&mut cur)?);
        }

        let trailing = bytes.len() as u64 - cur.position();
        debug!(containers = containers.len(), trailing, "decoded TGPH snapshot");

        Ok(Self { containers, entry_limit: DEFAULT_ENTRY_LIMIT })
    }

    /// Serialize the snapshot in the exact wire layout. Refuses documents
    /// whose container count or string lengths cannot fit their prefix
    /// fields rather than writing a stream that can never be decoded.
    pub fn encode_into<W: Write>(&self, stream: &mut W) -> Result<(), FormatError> {
        let count = self.containers.len();
        if count > u16::MAX as usize {
            return Err(FormatError::Oversized {
                what: "container count",
                len: count,
                max: u16::MAX as usize,
            });
        }

        stream.write_u32::<LittleEndian>(MAGIC)?;
        stream.write_u8(VERSION)?;
        stream.write_u16::<LittleEndian>(count as u16)?;
        for container in &self.containers {
            encode_container(stream, container)?;
        }
        Ok(())
    }

    fn container_mut_or_insert(&mut self, name: &str, ty: ElementType) -> &mut Container {
        let pos = self.containers.iter().position(|c| c.name == name);
        let idx = match pos {
            Some(i) => i,
            None => {
                let elements = match ty {
                    ElementType::U32 => ElementArray::U32(Vec::new()),
                    ElementType::F32 => ElementArray::F32(Vec::new()),
                    ElementType::Str => ElementArray::Str(Vec::new()),
                };
                self.containers.push(Container::new(name, elements));
                self.containers.len() - 1
            }
        };
        &mut self.containers[idx]
    }
}

/// Values the recorder can append into a document.
pub trait AppendElement {
    fn push_into(self, tgph: &mut Tgph, name: &str) -> Result<(), FormatError>;
}

macro_rules! impl_append_element {
    ($ty:ty, $variant:ident, $tag:expr) => {
        impl AppendElement for $ty {
            fn push_into(self, tgph: &mut Tgph, name: &str) -> Result<(), FormatError> {
                let limit = tgph.entry_limit;
                let container = tgph.container_mut_or_insert(name, $tag);
                match &mut container.elements {
                    ElementArray::$variant(elements) => {
                        elements.push(self);
                        while elements.len() > limit {
                            elements.remove(0);
                        }
                        Ok(())
                    }
                    other => Err(FormatError::TypeMismatch {
                        name: name.to_string(),
                        existing: other.element_type(),
                        pushed: $tag,
                    }),
                }
            }
        }
    };
}

impl_append_element!(u32, U32, ElementType::U32);
impl_append_element!(f32, F32, ElementType::F32);
impl_append_element!(String, Str, ElementType::Str);

// ---- wire helpers -----------------------------------------------------------

fn read_u8(cur: &mut Cursor<&[u8]>) -> Result<u8, FormatError> {
    let at = cur.position();
    cur.read_u8().map_err(|_| FormatError::UnexpectedEof(at))
}

fn read_u16(cur: &mut Cursor<&[u8]>) -> Result<u16, FormatError> {
    let at = cur.position();
    cur.read_u16::<LittleEndian>().map_err(|_| FormatError::UnexpectedEof(at))
}

fn read_u32(cur: &mut Cursor<&[u8]>) -> Result<u32, FormatError> {
    let at = cur.position();
    cur.read_u32::<LittleEndian>().map_err(|_| FormatError::UnexpectedEof(at))
}

fn read_f32(cur: &mut Cursor<&[u8]>) -> Result<f32, FormatError> {
    let at = cur.position();
    cur.read_f32::<LittleEndian>().map_err(|_| FormatError::UnexpectedEof(at))
}

/// Length-prefixed string: u8 length, with `0xFF` escaping to a u16
/// length for strings of 255 bytes or more.
fn read_string(cur: &mut Cursor<&[u8]>) -> Result<String, FormatError> {
    let mut length = u16::from(read_u8(cur)?);
    if length == 0xff {
        length = read_u16(cur)?;
    }

    let at = cur.position();
    let start = at as usize;
    let end = start + length as usize;
    let bytes = cur
        .get_ref()
        .get(start..end)
        .ok_or(FormatError::UnexpectedEof(at))?
        .to_vec();
    cur.set_position(end as u64);

    String::from_utf8(bytes).map_err(|source| FormatError::InvalidUtf8 { offset: at, source })
}

fn write_string<W: Write>(stream: &mut W, string: &str) -> Result<(), FormatError> {
    if string.len() > u16::MAX as usize {
        return Err(FormatError::Oversized {
            what: "string",
            len: string.len(),
            max: u16::MAX as usize,
        });
    }
    if string.len() >= 255 {
        stream.write_u8(0xff)?;
        stream.write_u16::<LittleEndian>(string.len() as u16)?;
    } else {
        stream.write_u8(string.len() as u8)?;
    }
    stream.write_all(string.as_bytes())?;
    Ok(())
}

fn decode_container(cur: &mut Cursor<&[u8]>) -> Result<Container, FormatError> {
    let name = read_string(cur)?;

    let tag = read_u8(cur)?;
    let ty = ElementType::from_tag(tag).ok_or(FormatError::UnknownElementType(tag))?;
    let count = read_u32(cur)? as usize;

    let elements = match ty {
        ElementType::U32 => {
            let mut elements = Vec::with_capacity(count.min(1 << 20));
            for _ in 0..count {
                elements.push(read_u32(cur)?);
            }
            ElementArray::U32(elements)
        }
        ElementType::F32 => {
            let mut elements = Vec::with_capacity(count.min(1 << 20));
            for _ in 0..count {
                elements.push(read_f32(cur)?);
            }
            ElementArray::F32(elements)
        }
        ElementType::Str => {
            let mut elements = Vec::with_capacity(count.min(1 << 16));
            for _ in 0..count {
                elements.push(read_string(cur)?);
            }
            ElementArray::Str(elements)
        }
    };

    Ok(Container { name, elements })
}

fn encode_container<W: Write>(stream: &mut W, container: &Container) -> Result<(), FormatError> {
    if container.len() > u32::MAX as usize {
        return Err(FormatError::Oversized {
            what: "element count",
            len: container.len(),
            max: u32::MAX as usize,
        });
    }

    write_string(stream, &container.name)?;
    stream.write_u8(container.element_type().tag())?;
    stream.write_u32::<LittleEndian>(container.len() as u32)?;

    match &container.elements {
        ElementArray::U32(elements) => {
            for e in elements {
                stream.write_u32::<LittleEndian>(*e)?;
            }
        }
        ElementArray::F32(elements) => {
            for e in elements {
                stream.write_f32::<LittleEndian>(*e)?;
            }
        }
        ElementArray::Str(elements) => {
            for e in elements {
                write_string(stream, e)?;
            }
        }
    }

    Ok(())
}
