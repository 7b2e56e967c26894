//! Fixed-width bit set of component types.

use std::fmt;

/// Maximum number of component types one ECS can declare.
pub const MAX_COMPONENTS: usize = 128;

/// Count of 64-bit words in every [`Mask`].
///
/// Type ids start at 1, so one extra word is kept for the highest id.
///
pub const MASK_WORDS: usize = MAX_COMPONENTS / 64 + 1;

/// Bit vector recording a set of component types.
///
/// Bit `i` is stored in word `i / 64` at position `i % 64`.
///
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mask {
    words: [u64; MASK_WORDS],
}

impl Mask {
    /// Number of bits every mask can hold.
    pub const BITS: usize = MASK_WORDS * 64;

    /// Creates an empty mask.
    pub const fn new() -> Self {
        Self {
            words: [0; MASK_WORDS],
        }
    }

    /// Sets bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not less than [`Mask::BITS`].
    ///
    pub fn set(&mut self, i: usize) {
        let (word, bit) = Self::locate(i);
        self.words[word] |= bit;
    }

    /// Toggles bit `i` off.
    ///
    /// The bit must be set before the call: clearing toggles it,
    /// so clearing an unset bit sets it.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not less than [`Mask::BITS`].
    ///
    pub fn clear(&mut self, i: usize) {
        let (word, bit) = Self::locate(i);
        self.words[word] ^= bit;
    }

    /// Returns `true` if bit `i` is set.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not less than [`Mask::BITS`].
    ///
    pub fn test(&self, i: usize) -> bool {
        let (word, bit) = Self::locate(i);
        self.words[word] & bit != 0
    }

    /// Returns `true` if every bit set in `self` is also set in `have`.
    ///
    /// Systems use this to select entities: a system requiring `{A, B}`
    /// runs only on entities which have both `A` and `B` enabled.
    /// An empty mask matches everything.
    ///
    pub fn matches(&self, have: &Mask) -> bool {
        self.words
            .iter()
            .zip(have.words.iter())
            .all(|(required, have)| required & have == *required)
    }

    /// Returns `true` if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Returns count of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns iterator over indices of all set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::BITS).filter(move |&i| self.test(i))
    }

    fn locate(i: usize) -> (usize, u64) {
        assert!(i < Self::BITS, "bit {} is out of mask range", i);
        (i / 64, 1 << (i % 64))
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}

impl FromIterator<usize> for Mask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Mask::new();
        iter.into_iter().for_each(|i| mask.set(i));
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(MASK_WORDS, 3);

        let mut mask = Mask::new();
        mask.set(0);
        mask.set(63);
        mask.set(64);
        mask.set(MAX_COMPONENTS);
        assert!(mask.test(63));
        assert!(mask.test(64));
        assert!(mask.test(MAX_COMPONENTS));
        assert!(!mask.test(65));
        assert_eq!(mask.count(), 4);
        assert_eq!(mask.ones().collect::<Vec<_>>(), [0, 63, 64, MAX_COMPONENTS]);
    }

    #[test]
    fn test_clear_toggles() {
        let mut mask = Mask::new();
        mask.set(5);
        mask.clear(5);
        assert!(!mask.test(5));
        assert!(mask.is_empty());

        // no guard: clearing an unset bit sets it
        mask.clear(7);
        assert!(mask.test(7));
    }

    #[test]
    fn test_matches_subset() {
        let required: Mask = [1, 2].into_iter().collect();
        let both_and_more: Mask = [1, 2, 3].into_iter().collect();
        let only_one: Mask = [1].into_iter().collect();
        let other_word: Mask = [1, 2, 70].into_iter().collect();

        assert!(required.matches(&both_and_more));
        assert!(required.matches(&other_word));
        assert!(!required.matches(&only_one));
        assert!(!required.matches(&Mask::new()));
        assert!(Mask::new().matches(&only_one));
        assert!(Mask::new().matches(&Mask::new()));
    }

    #[test]
    fn test_matches_across_words() {
        let required: Mask = [3, 100].into_iter().collect();
        let have_low: Mask = [3].into_iter().collect();
        let have_high: Mask = [100].into_iter().collect();
        let have_all: Mask = [3, 100].into_iter().collect();

        assert!(!required.matches(&have_low));
        assert!(!required.matches(&have_high));
        assert!(required.matches(&have_all));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range() {
        let mut mask = Mask::new();
        mask.set(Mask::BITS);
    }
}
