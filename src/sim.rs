use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    dealer::{play_dealer_with_rules, DealerRules},
    error::TableError,
    hand::{is_blackjack, score},
    outcome::{compare, Outcome},
    request::{validate_hand, validate_rank},
    source::WeightedSource,
};

const BUST_KEY: &str = "bust";

fn default_progress_interval() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
pub struct SimulationInput {
    pub up_card: u8,
    pub iterations: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: DealerRules,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
    /// A finished hand the player stands on against every dealer hand.
    #[serde(default)]
    pub player_hand: Option<Vec<u8>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_hands: u32,
    pub final_totals: BTreeMap<String, u32>,
    pub bust_rate: f64,
    pub dealer_blackjacks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<StandStats>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandStats {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub blackjacks: u32,
    pub expected_multiplier: f64,
}

impl StandStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
        }
        self.expected_multiplier += outcome.multiplier();
    }
}

pub fn run(input: SimulationInput) -> Result<SimulationResult, TableError> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(
    input: SimulationInput,
    mut progress_cb: F,
) -> Result<SimulationResult, TableError>
where
    F: FnMut(u32, u32),
{
    validate_rank(input.up_card)?;
    input.rules.validate()?;
    if let Some(hand) = &input.player_hand {
        validate_hand(hand)?;
    }

    let mut source = match input.seed {
        Some(seed) => WeightedSource::seeded(seed),
        None => WeightedSource::from_entropy(),
    };
    let progress_interval = input.progress_interval.max(1);
    info!(
        up_card = input.up_card,
        iterations = input.iterations,
        stands_on = input.rules.stands_on,
        "Starting dealer simulation"
    );

    let mut final_totals: BTreeMap<String, u32> = BTreeMap::new();
    let mut dealer_blackjacks = 0;
    let mut busts = 0;
    let mut player_stats = input.player_hand.as_ref().map(|_| StandStats::default());

    for hand_index in 0..input.iterations {
        let dealer_cards = play_dealer_with_rules(input.up_card, &mut source, &input.rules);
        let dealer_score = score(&dealer_cards);

        let key = if dealer_score.is_bust() {
            busts += 1;
            BUST_KEY.to_string()
        } else {
            dealer_score.best().to_string()
        };
        *final_totals.entry(key).or_default() += 1;
        if is_blackjack(&dealer_cards) {
            dealer_blackjacks += 1;
        }

        if let (Some(stats), Some(player)) = (player_stats.as_mut(), input.player_hand.as_ref()) {
            stats.record(compare(player, &dealer_cards));
        }

        let completed = hand_index + 1;
        if completed % progress_interval == 0 || completed == input.iterations {
            debug!(completed, total = input.iterations, "Simulation progress");
            progress_cb(completed, input.iterations);
        }
    }

    let total_hands = input.iterations;
    let bust_rate = if total_hands > 0 {
        (busts as f64 / total_hands as f64) * 100.0
    } else {
        0.0
    };
    if let Some(stats) = player_stats.as_mut() {
        if total_hands > 0 {
            stats.expected_multiplier /= total_hands as f64;
        }
    }
    info!(total_hands, bust_rate, dealer_blackjacks, "Dealer simulation finished");

    Ok(SimulationResult {
        total_hands,
        final_totals,
        bust_rate,
        dealer_blackjacks,
        player: player_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::from_json;

    fn input(json: &str) -> SimulationInput {
        from_json(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let parsed = input(r#"{"up_card": 6, "iterations": 10}"#);
        assert_eq!(parsed.progress_interval, 10_000);
        assert_eq!(parsed.rules, DealerRules::default());
        assert!(parsed.seed.is_none());
        assert!(parsed.player_hand.is_none());
    }

    #[test]
    fn test_final_totals_cover_every_hand() {
        let result = run(input(r#"{"up_card": 6, "iterations": 5000, "seed": 3}"#)).unwrap();
        assert_eq!(result.total_hands, 5000);
        assert_eq!(result.final_totals.values().sum::<u32>(), 5000);
        for key in result.final_totals.keys() {
            assert!(
                key == BUST_KEY || (17..=21).contains(&key.parse::<u32>().unwrap()),
                "unexpected total {key}"
            );
        }
        assert!(result.bust_rate > 0.0 && result.bust_rate < 100.0);
        assert!(result.player.is_none());
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let json = r#"{"up_card": 1, "iterations": 2000, "seed": 11, "player_hand": [10, 9]}"#;
        let first = run(input(json)).unwrap();
        let second = run(input(json)).unwrap();
        assert_eq!(first.final_totals, second.final_totals);
        assert_eq!(first.dealer_blackjacks, second.dealer_blackjacks);
        let (a, b) = (first.player.unwrap(), second.player.unwrap());
        assert_eq!((a.wins, a.losses, a.pushes), (b.wins, b.losses, b.pushes));
    }

    #[test]
    fn test_player_stats() {
        let result = run(input(
            r#"{"up_card": 10, "iterations": 3000, "seed": 5, "player_hand": [1, 10]}"#,
        ))
        .unwrap();
        let stats = result.player.unwrap();
        assert_eq!(stats.wins + stats.losses + stats.pushes, 3000);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.pushes, result.dealer_blackjacks);
        assert_eq!(stats.blackjacks, stats.wins);
        assert!(stats.expected_multiplier > 2.0 && stats.expected_multiplier <= 2.5);
    }

    #[test]
    fn test_progress_callback() {
        let mut calls = Vec::new();
        run_with_progress(
            input(r#"{"up_card": 9, "iterations": 25, "seed": 1, "progress_interval": 10}"#),
            |current, total| calls.push((current, total)),
        )
        .unwrap();
        assert_eq!(calls, vec![(10, 25), (20, 25), (25, 25)]);
    }

    #[test]
    fn test_zero_iterations() {
        let result = run(input(r#"{"up_card": 9, "iterations": 0, "seed": 1}"#)).unwrap();
        assert_eq!(result.total_hands, 0);
        assert!(result.final_totals.is_empty());
        assert_eq!(result.bust_rate, 0.0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            run(input(r#"{"up_card": 0, "iterations": 1}"#)),
            Err(TableError::InvalidRank { rank: 0 })
        ));
        assert!(matches!(
            run(input(r#"{"up_card": 5, "iterations": 1, "player_hand": []}"#)),
            Err(TableError::EmptyHand)
        ));
    }
}
