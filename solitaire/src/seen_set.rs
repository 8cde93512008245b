/// A compact set of pile magnitudes.
///
/// The terminal-state check only needs one-pass duplicate detection over
/// values already known to lie in `[1, total_cards]`, so a bitset over that
/// range is enough and avoids hashing.
#[derive(Clone, Debug)]
pub(crate) struct SeenSet {
    words: Box<[u64]>,
}

impl SeenSet {
    /// Creates an empty set able to hold magnitudes in `[0, max]`.
    pub(crate) fn with_max(max: u32) -> Self {
        Self {
            words: vec![0u64; max as usize / 64 + 1].into_boxed_slice(),
        }
    }

    /// Inserts a magnitude, returning `false` if it was already present.
    pub(crate) fn insert(&mut self, value: u32) -> bool {
        let word = value as usize / 64;
        let mask = 1u64 << (value % 64);
        let novel = self.words[word] & mask == 0;
        self.words[word] |= mask;
        novel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_duplicates() {
        let mut set = SeenSet::with_max(45);
        assert!(set.insert(7));
        assert!(set.insert(45));
        assert!(!set.insert(7));
        assert!(!set.insert(45));
        assert!(set.insert(1));
    }

    #[test]
    fn magnitudes_past_one_word() {
        let mut set = SeenSet::with_max(120);
        assert!(set.insert(64));
        assert!(set.insert(120));
        assert!(!set.insert(64));
    }
}
