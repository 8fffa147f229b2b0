use serde::Serialize;
use tracing::debug;

use crate::{
    dealer::{finish_dealer_hand, DealerRules},
    hand::{score, Score},
    outcome::{compare, Outcome},
    source::CardSource,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub player_cards: Vec<u8>,
    pub dealer_cards: Vec<u8>,
    pub player_score: Score,
    pub dealer_score: Score,
    pub outcome: Outcome,
    pub multiplier: f64,
}

/// Plays the dealer out from `dealer_up` and settles the finished player hand.
///
/// The dealer always completes its hand, even against a busted player, so the
/// result shows what the dealer would have drawn.
pub fn play_round<S: CardSource + ?Sized>(
    player_cards: &[u8],
    dealer_up: u8,
    source: &mut S,
    rules: &DealerRules,
) -> RoundResult {
    let dealer_cards = finish_dealer_hand(vec![dealer_up], source, rules);
    let outcome = compare(player_cards, &dealer_cards);
    debug!(
        player = ?player_cards,
        dealer = ?dealer_cards,
        outcome = outcome.as_str(),
        "Round settled"
    );

    RoundResult {
        player_cards: player_cards.to_vec(),
        player_score: score(player_cards),
        dealer_score: score(&dealer_cards),
        dealer_cards,
        outcome,
        multiplier: outcome.multiplier(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CycleSource;

    fn cycle(ranks: &[u8]) -> CycleSource {
        CycleSource::new(ranks.to_vec()).unwrap()
    }

    #[test]
    fn test_dealer_natural_beats_twenty() {
        let result = play_round(&[10, 10], 1, &mut cycle(&[10]), &DealerRules::default());
        assert_eq!(result.dealer_cards, vec![1, 10]);
        assert_eq!(result.outcome, Outcome::Lose);
        assert_eq!(result.multiplier, 0.0);
    }

    #[test]
    fn test_player_blackjack_pays_three_to_two() {
        let result = play_round(&[1, 10], 10, &mut cycle(&[7]), &DealerRules::default());
        assert_eq!(result.dealer_cards, vec![10, 7]);
        assert_eq!(result.outcome, Outcome::Blackjack);
        assert_eq!(result.multiplier, 2.5);
    }

    #[test]
    fn test_dealer_bust_pays_player() {
        let result = play_round(&[10, 2], 10, &mut cycle(&[6, 10]), &DealerRules::default());
        assert_eq!(result.dealer_cards, vec![10, 6, 10]);
        assert!(result.dealer_score.is_bust());
        assert_eq!(result.outcome, Outcome::Win);
    }

    #[test]
    fn test_busted_player_loses_and_dealer_still_plays() {
        let result = play_round(&[10, 6, 9], 10, &mut cycle(&[6, 10]), &DealerRules::default());
        assert_eq!(result.dealer_cards, vec![10, 6, 10]);
        assert_eq!(result.player_score, Score::Single { total: 25 });
        assert_eq!(result.outcome, Outcome::Lose);
    }

    #[test]
    fn test_push_on_equal_totals() {
        let result = play_round(&[10, 8], 9, &mut cycle(&[9]), &DealerRules::default());
        assert_eq!(result.dealer_score.best(), 18);
        assert_eq!(result.outcome, Outcome::Push);
        assert_eq!(result.multiplier, 1.0);
    }
}
