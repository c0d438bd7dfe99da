use serde::{Deserialize, Serialize};

/// A set of digits 1-9, packed into a `u16`.
///
/// Bit `d - 1` is set when digit `d` is a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitSet(u16);

const ALL_DIGITS: u16 = 0b1_1111_1111;

impl DigitSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The full set {1..9}.
    pub fn all() -> Self {
        Self(ALL_DIGITS)
    }

    /// Reconstruct from a raw bit pattern (bits above 9 are ignored).
    pub fn from_raw(raw: u16) -> Self {
        Self(raw & ALL_DIGITS)
    }

    /// The raw bit pattern.
    pub fn as_raw(&self) -> u16 {
        self.0
    }

    pub fn contains(&self, digit: u8) -> bool {
        debug_assert!((1..=9).contains(&digit));
        self.0 & (1 << (digit - 1)) != 0
    }

    pub fn insert(&mut self, digit: u8) {
        debug_assert!((1..=9).contains(&digit));
        self.0 |= 1 << (digit - 1);
    }

    pub fn remove(&mut self, digit: u8) {
        debug_assert!((1..=9).contains(&digit));
        self.0 &= !(1 << (digit - 1));
    }

    /// Number of digits in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let bits = self.0;
        (1..=9u8).filter(move |d| bits & (1 << (d - 1)) != 0)
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for d in iter {
            set.insert(d);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = DigitSet::empty();
        assert!(set.is_empty());

        set.insert(5);
        set.insert(9);
        assert!(set.contains(5));
        assert!(set.contains(9));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 2);

        set.remove(5);
        assert!(!set.contains(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_all_and_iter() {
        let all = DigitSet::all();
        assert_eq!(all.len(), 9);
        assert_eq!(all.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_raw_round_trip() {
        let set: DigitSet = [2u8, 4, 6].into_iter().collect();
        assert_eq!(DigitSet::from_raw(set.as_raw()), set);
        // Garbage bits above digit 9 are masked off
        assert_eq!(DigitSet::from_raw(0xFFFF), DigitSet::all());
    }
}
