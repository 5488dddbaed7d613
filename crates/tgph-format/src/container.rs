// File: crates/tgph-format/src/container.rs
// Summary: Typed container model: element type tags and the closed element array enum.

/// Wire tag for an element array. The set is closed; an unknown tag on
/// the wire is a decode error, never a skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    U32,
    F32,
    Str,
}

impl ElementType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::U32),
            2 => Some(Self::F32),
            3 => Some(Self::Str),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Self::U32 => 1,
            Self::F32 => 2,
            Self::Str => 3,
        }
    }
}

/// Columnar element storage. All elements of a container share one variant.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementArray {
    U32(Vec<u32>),
    F32(Vec<f32>),
    Str(Vec<String>),
}

impl ElementArray {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::U32(_) => ElementType::U32,
            Self::F32(_) => ElementType::F32,
            Self::Str(_) => ElementType::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widened numeric view. String arrays have no numeric view.
    pub fn as_f64(&self) -> Option<Vec<f64>> {
        match self {
            Self::U32(v) => Some(v.iter().map(|&e| f64::from(e)).collect()),
            Self::F32(v) => Some(v.iter().map(|&e| f64::from(e)).collect()),
            Self::Str(_) => None,
        }
    }

    /// Single numeric element at `index`, widened to f64.
    pub fn get_numeric(&self, index: usize) -> Option<f64> {
        match self {
            Self::U32(v) => v.get(index).map(|&e| f64::from(e)),
            Self::F32(v) => v.get(index).map(|&e| f64::from(e)),
            Self::Str(_) => None,
        }
    }
}

/// A named, typed, fixed-length array decoded from (or destined for) the
/// wire. Immutable once decoded; the store owns all of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub name: String,
    pub elements: ElementArray,
}

impl Container {
    pub fn new(name: impl Into<String>, elements: ElementArray) -> Self {
        Self { name: name.into(), elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        self.elements.element_type()
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self.elements, ElementArray::Str(_))
    }
}
