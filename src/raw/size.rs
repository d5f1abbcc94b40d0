use super::handle::Handle;

/// Number of nodes in a subtree.
///
/// Shares the handle's niche, so a tree can never count more nodes than its arena can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    /// Size of a subtree with the given child sizes under one root.
    #[inline]
    pub(crate) const fn joining(left: usize, right: usize) -> Self {
        Self::from_usize(1 + left + right)
    }

    #[inline]
    pub(crate) const fn incremented(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decremented(self) -> Self {
        assert!(self.to_usize() > 1, "`Size::decremented()` - a live subtree holds at least one node!");
        Self::from_usize(self.to_usize() - 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decremented()` - a live subtree holds at least one node!")]
    fn decrement_below_one() {
        let _ = Size::ONE.decremented();
    }

    #[test]
    fn joining_counts_the_root() {
        assert_eq!(Size::joining(0, 0), Size::ONE);
        assert_eq!(Size::joining(3, 4).to_usize(), 8);
        assert_eq!(Size::ONE.incremented().decremented(), Size::ONE);
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=Size::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }
    }
}
