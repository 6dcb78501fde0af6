use core::fmt;
use core::marker::PhantomData;
use core::num::NonZeroU32;

/// Compact, stable arena handle.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id<_>>` to be pointer-optimized
/// - the tag parameter keeps species and reaction handles from being mixed up
pub struct Id<Tag> {
    raw: NonZeroU32,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Id<Tag> {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self {
            raw: NonZeroU32::new(index + 1).expect("index+1 is nonzero"),
            _tag: PhantomData,
        }
    }

    /// Create an Id from a `usize` arena position.
    pub fn from_usize(index: usize) -> Self {
        Self::from_index(u32::try_from(index).expect("arena exceeds u32 handles"))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.raw.get() - 1
    }

    /// Recover the 0-based index as a `usize` for slice access.
    pub fn as_usize(self) -> usize {
        self.index() as usize
    }
}

// Manual impls: derives would put bounds on `Tag`.
impl<Tag> Clone for Id<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for Id<Tag> {}

impl<Tag> PartialEq for Id<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<Tag> Eq for Id<Tag> {}

impl<Tag> PartialOrd for Id<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for Id<Tag> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<Tag> core::hash::Hash for Id<Tag> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<Tag: IdTag> fmt::Debug for Id<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Tag::NAME, self.index())
    }
}

impl<Tag> fmt::Display for Id<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(feature = "serde")]
impl<Tag> serde::Serialize for Id<Tag> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.index())
    }
}

#[cfg(feature = "serde")]
impl<'de, Tag> serde::Deserialize<'de> for Id<Tag> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u32::deserialize(deserializer)?;
        if index == u32::MAX {
            return Err(serde::de::Error::custom("id index out of range"));
        }
        Ok(Self::from_index(index))
    }
}

/// Names a handle family for `Debug` output.
pub trait IdTag {
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeciesTag {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionTag {}

impl IdTag for SpeciesTag {
    const NAME: &'static str = "Species";
}

impl IdTag for ReactionTag {
    const NAME: &'static str = "Reaction";
}

/// Domain-specific ID aliases (no runtime cost).
pub type SpeciesId = Id<SpeciesTag>;
pub type ReactionId = Id<ReactionTag>;
