use rand::Rng;
use tracing::debug;

use crate::seen_set::SeenSet;

/// Number of piles in the final configuration of the classic game.
///
/// With 9 final piles the card total is 45.
pub const NUM_FINAL_PILES: u32 = 9;

/// The number of cards in play for a game that ends in `final_piles` piles.
///
/// Closed form of `1 + 2 + ... + final_piles`. The game is only guaranteed
/// to terminate when the card total is such a triangular number.
pub const fn card_total(final_piles: u32) -> u32 {
    final_piles * (final_piles + 1) / 2
}

/// The board for Bulgarian solitaire.
///
/// Holds the current sequence of pile sizes in a partially-filled,
/// fixed-capacity store. The capacity is the card total, which covers the
/// degenerate configuration where every pile holds a single card.
//
// Representation invariant, re-checked after every mutating operation:
//
// * `pile_count <= piles.len()`, and `piles.len()` is the card total
// * `piles[..pile_count]` are the piles; every entry is in `[1, card total]`
// * `piles[..pile_count]` sums to exactly the card total
// * `piles[pile_count..]` is zeroed between rounds (it doubles as scratch
//   space during the round transition)
#[derive(Clone, Debug)]
pub struct Board {
    piles: Box<[u32]>,
    pile_count: usize,
    final_piles: u32,
}

impl Board {
    /// Creates a board with the configuration given in `piles`, first pile
    /// first.
    ///
    /// The caller is responsible for validating its input beforehand: every
    /// element must be positive and the elements must sum to
    /// [`card_total(final_piles)`](card_total). Handing over a sequence that
    /// breaks this precondition is a bug in the caller, and trips the
    /// board's own invariant check rather than returning an error.
    pub fn from_piles(final_piles: u32, piles: &[u32]) -> Self {
        let mut store = vec![0u32; card_total(final_piles) as usize].into_boxed_slice();
        let mut pile_count = 0;
        for &pile in piles {
            if pile > 0 {
                store[pile_count] = pile;
                pile_count += 1;
            }
        }

        let board = Self {
            piles: store,
            pile_count,
            final_piles,
        };
        debug!(config = %board.config_string(), "created board from explicit configuration");
        board.assert_valid();
        board
    }

    /// Creates a board with a random initial configuration.
    ///
    /// Pile sizes are drawn uniformly from `[1, remaining]` until the card
    /// total is used up, so the sum invariant holds by construction. The
    /// random source is injected; seed it (e.g. via
    /// `StdRng::seed_from_u64`) to make a game reproducible.
    pub fn random<R: Rng>(final_piles: u32, rng: &mut R) -> Self {
        let total = card_total(final_piles);
        let mut store = vec![0u32; total as usize].into_boxed_slice();
        let mut pile_count = 0;
        let mut remaining = total;
        while remaining > 0 {
            let drawn = rng.gen_range(1..=remaining);
            store[pile_count] = drawn;
            pile_count += 1;
            remaining -= drawn;
        }

        let board = Self {
            piles: store,
            pile_count,
            final_piles,
        };
        debug!(config = %board.config_string(), "created board from random configuration");
        board.assert_valid();
        board
    }

    /// Number of piles in a terminal configuration.
    pub fn final_piles(&self) -> u32 {
        self.final_piles
    }

    /// Total number of cards on the board, constant for the whole game.
    pub fn total_cards(&self) -> u32 {
        card_total(self.final_piles)
    }

    /// The current pile sizes, first pile first.
    pub fn piles(&self) -> &[u32] {
        &self.piles[..self.pile_count]
    }

    /// Plays one round: takes one card from every pile and stacks the taken
    /// cards into a new pile at the end. Piles emptied this way disappear;
    /// the surviving piles keep their relative order.
    ///
    /// Runs in time linear in the pile count and entirely in place, using
    /// the unused tail of the store as scratch space instead of a second
    /// full-size buffer.
    pub fn play_round(&mut self) {
        let old_pile_count = self.pile_count;
        let capacity = self.piles.len();

        // One card off every pile. The new pile gets exactly one card per
        // old pile, so its size is `old_pile_count`.
        let mut emptied = 0;
        for pile in &mut self.piles[..old_pile_count] {
            *pile -= 1;
            if *pile == 0 {
                emptied += 1;
            }
        }
        let survivors = old_pile_count - emptied;

        // Compact the survivors into the tail, leaving the last slot free
        // for the new pile. The write region starts at `old_pile_count - 1`
        // at the earliest, so a write can only alias the final read, and in
        // that regime every survivor is a 1-card pile, which makes the
        // aliased copy harmless.
        let start = capacity - survivors - 1;
        let mut back = start;
        for front in 0..old_pile_count {
            if self.piles[front] != 0 {
                self.piles[back] = self.piles[front];
                back += 1;
            }
        }
        self.piles[capacity - 1] = old_pile_count as u32;

        // Shift survivors plus new pile back down to index 0 and re-zero
        // the tail for the next round.
        self.piles.copy_within(start.., 0);
        self.pile_count = survivors + 1;
        self.piles[self.pile_count..].fill(0);

        debug!(config = %self.config_string(), "played round");
        self.assert_valid();
    }

    /// Returns true iff the board is at the end of the game: exactly
    /// `final_piles` piles with sizes `1, 2, ..., final_piles` in any order.
    ///
    /// A single pass suffices: with the pile count equal to `final_piles`
    /// and the sum invariant pinning the total, zero duplicate magnitudes
    /// force the sizes to be exactly `{1, ..., final_piles}`. No sorting,
    /// no range check.
    pub fn is_done(&self) -> bool {
        if self.pile_count != self.final_piles as usize {
            return false;
        }

        let mut seen = SeenSet::with_max(self.total_cards());
        let mut duplicates = 0;
        for &pile in self.piles() {
            if !seen.insert(pile) {
                duplicates += 1;
            }
        }
        duplicates == 0
    }

    /// The current configuration as a space-separated list of pile sizes,
    /// with no leading or trailing whitespace and no brackets.
    pub fn config_string(&self) -> String {
        let sizes: Vec<String> = self.piles().iter().map(u32::to_string).collect();
        sizes.join(" ")
    }

    // Invariant self-check. Violations are programming defects, caught at
    // the operation that produced them, so this is an assertion rather than
    // a recoverable error.
    fn assert_valid(&self) {
        let total = self.total_cards();
        debug_assert!(
            self.pile_count <= self.piles.len(),
            "pile count {} exceeds store capacity {}",
            self.pile_count,
            self.piles.len()
        );
        debug_assert!(
            self.piles().iter().all(|&p| (1..=total).contains(&p)),
            "pile size out of [1, {}] in {:?}",
            total,
            self.piles()
        );
        debug_assert_eq!(
            self.piles().iter().sum::<u32>(),
            total,
            "pile sizes must sum to the card total"
        );
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.config_string())
    }
}
