use std::fmt::{Display, Formatter};

/// Zero-padding width for segment labels
pub const SEGMENT_ID_PAD: usize = 5;

/// Opaque segment identifier, unique within one index.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SegmentId {
    pub id: u32,
}

impl SegmentId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Zero-padded label used in logs and plan dumps.
    #[inline]
    pub fn label(&self) -> String {
        format!("{:0width$}", self.id, width = SEGMENT_ID_PAD)
    }

    /// Parse a (possibly zero-padded) numeric label into a SegmentId.
    #[inline]
    pub fn from_label(s: &str) -> Option<Self> {
        s.parse::<u32>().ok().map(Self::new)
    }
}

impl From<u32> for SegmentId {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Display for SegmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
