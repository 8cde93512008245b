use quickcheck::{Arbitrary, Gen};

use crate::card_total;

/// A valid initial configuration: positive pile sizes that sum to the card
/// total for `final_piles`.
#[derive(Clone, Debug)]
pub(crate) struct ValidConfig {
    pub(crate) final_piles: u32,
    pub(crate) piles: Vec<u32>,
}

impl Arbitrary for ValidConfig {
    fn arbitrary(g: &mut Gen) -> Self {
        let final_piles = u32::arbitrary(g) % 9 + 1;
        let mut piles = Vec::new();
        let mut remaining = card_total(final_piles);
        while remaining > 0 {
            let drawn = u32::arbitrary(g) % remaining + 1;
            piles.push(drawn);
            remaining -= drawn;
        }
        Self { final_piles, piles }
    }
}
