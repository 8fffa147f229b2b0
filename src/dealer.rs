use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{error::TableError, hand::score, source::CardSource};

fn default_stands_on() -> u32 {
    17
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerRules {
    #[serde(default = "default_stands_on")]
    pub stands_on: u32,
}

impl Default for DealerRules {
    fn default() -> Self {
        DealerRules {
            stands_on: default_stands_on(),
        }
    }
}

impl DealerRules {
    pub fn validate(&self) -> Result<(), TableError> {
        if (1..=21).contains(&self.stands_on) {
            Ok(())
        } else {
            Err(TableError::InvalidStandThreshold(self.stands_on))
        }
    }
}

/// Plays a dealer hand out from its first card, standing on 17.
pub fn play_dealer<S: CardSource + ?Sized>(card: u8, source: &mut S) -> Vec<u8> {
    play_dealer_with_rules(card, source, &DealerRules::default())
}

pub fn play_dealer_with_rules<S: CardSource + ?Sized>(
    card: u8,
    source: &mut S,
    rules: &DealerRules,
) -> Vec<u8> {
    finish_dealer_hand(vec![card], source, rules)
}

/// Draws onto `hand` until its best total reaches `rules.stands_on`.
///
/// The best total counts a soft ace as 11, so the dealer stands on soft 17.
pub fn finish_dealer_hand<S: CardSource + ?Sized>(
    mut hand: Vec<u8>,
    source: &mut S,
    rules: &DealerRules,
) -> Vec<u8> {
    while score(&hand).best() < rules.stands_on {
        let rank = source.next_rank();
        trace!(rank, "Dealer draws");
        hand.push(rank);
    }
    debug!(cards = ?hand, total = score(&hand).best(), "Dealer stands");
    hand
}
