use core::num::NonZero;

// Unit tests use a narrow handle so that filling the arena stays cheap.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Arena slot number, stored as `index + 1`.
///
/// The zero niche makes every `Option<Handle>` link the width of a bare handle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest addressable slot index.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let offset = index as RawHandle;
        Self(NonZero::<RawHandle>::MIN.saturating_add(offset))
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::{assert_eq_size, const_assert_eq};

    assert_eq_size!(Option<Handle>, RawHandle);
    const_assert_eq!(Handle::MAX, u16::MAX as usize - 1);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn index_past_max_panics() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn every_index_maps_back() {
        for index in 0..=Handle::MAX {
            assert_eq!(Handle::from_index(index).to_index(), index);
        }
        assert_ne!(Handle::from_index(0), Handle::from_index(1));
    }
}
