/// Property-based tests for bracket progression using proptest
///
/// These tests check the round structure and advancement rules across
/// randomly generated fields, rosters and shuffle seeds.
use creature_cup::contestant::{Contestant, Stat, Stats};
use creature_cup::tournament::{
    HpDepletion, MatchDetail, Resolve, STRIKE_LOG_LIMIT, ScoreComparison, Side,
    TournamentConfig, TournamentEngine,
};
use creature_cup::{Draw, NullSink};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

// Strategy for a full stat line: five scored stats plus speed
fn stat_line_strategy() -> impl Strategy<Value = [i64; 6]> {
    prop::array::uniform6(1i64..=255)
}

fn contestant(id: u32, line: [i64; 6]) -> Arc<Contestant> {
    let stats = Stat::ALL
        .iter()
        .zip(line)
        .fold(Stats::new(), |stats, (&stat, value)| stats.with(stat, value));
    Arc::new(Contestant::new(id, format!("creature-{id}"), stats).unwrap())
}

// Strategy for a field of `min..=max` contestants with distinct IDs
fn field_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Arc<Contestant>>> {
    prop::collection::vec(stat_line_strategy(), min..=max).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| contestant(idx as u32 + 1, line))
            .collect()
    })
}

fn score(c: &Contestant) -> i64 {
    c.stat_total(&creature_cup::tournament::SCORED_STATS).unwrap()
}

proptest! {
    #[test]
    fn test_power_of_two_field_takes_log2_rounds(
        exponent in 0u32..=6,
        lines in prop::collection::vec(stat_line_strategy(), 64),
        seed in any::<u64>(),
    ) {
        let size = 1usize << exponent;
        let field: Vec<_> = lines
            .into_iter()
            .take(size)
            .enumerate()
            .map(|(idx, line)| contestant(idx as u32 + 1, line))
            .collect();

        let engine = TournamentEngine::new(TournamentConfig::new(ScoreComparison.into()));
        let outcome = engine.run(field.clone(), &mut Draw::seeded(seed), &mut NullSink).unwrap();

        prop_assert_eq!(outcome.round_count(), exponent as usize);
        prop_assert!(field.iter().any(|c| c.id == outcome.champion.id));
        for round in &outcome.rounds {
            prop_assert!(round.bye.is_none());
        }
    }

    #[test]
    fn test_higher_score_always_advances(
        field in field_strategy(2, 40),
        seed in any::<u64>(),
    ) {
        let engine = TournamentEngine::new(TournamentConfig::new(ScoreComparison.into()));
        let outcome = engine.run(field, &mut Draw::seeded(seed), &mut NullSink).unwrap();

        for record in outcome.rounds.iter().flat_map(|round| &round.matches) {
            let (winner, loser) = (record.winner(), record.loser());
            if score(winner) != score(loser) {
                prop_assert!(score(winner) > score(loser));
            } else {
                prop_assert!(winner.stat(Stat::Speed).unwrap() >= loser.stat(Stat::Speed).unwrap());
            }
        }
    }

    #[test]
    fn test_no_contestant_dropped_or_duplicated(
        field in field_strategy(1, 33),
        seed in any::<u64>(),
        use_hp in any::<bool>(),
    ) {
        let rule = if use_hp { HpDepletion.into() } else { ScoreComparison.into() };
        let engine = TournamentEngine::new(TournamentConfig::new(rule));
        let outcome = engine.run(field.clone(), &mut Draw::seeded(seed), &mut NullSink).unwrap();

        let expected_rounds = field.len().next_power_of_two().trailing_zeros() as usize;
        prop_assert_eq!(outcome.round_count(), expected_rounds);

        let mut previous: HashSet<u32> = field.iter().map(|c| c.id).collect();
        for round in &outcome.rounds {
            let entrants: HashSet<u32> = round.entrants.iter().map(|c| c.id).collect();
            prop_assert_eq!(entrants.len(), round.entrants.len());
            prop_assert_eq!(&entrants, &previous);
            prop_assert_eq!(round.bye.is_some(), round.entrants.len() % 2 == 1);

            let losers: HashSet<u32> = round.matches.iter().map(|m| m.loser().id).collect();
            let advancing: HashSet<u32> = round.advancing.iter().map(|c| c.id).collect();
            prop_assert_eq!(advancing.len(), round.advancing.len());
            prop_assert!(advancing.is_disjoint(&losers));
            prop_assert_eq!(advancing.len() + losers.len(), entrants.len());
            previous = advancing;
        }
        prop_assert_eq!(previous.len(), 1);
        prop_assert!(previous.contains(&outcome.champion.id));
    }

    #[test]
    fn test_hp_depletion_winner_survives(
        a in stat_line_strategy(),
        b in stat_line_strategy(),
    ) {
        let (first, second) = (contestant(1, a), contestant(2, b));
        let outcome = HpDepletion.resolve(&first, &second).unwrap();

        let (strikes, strike_count) = match &outcome.detail {
            MatchDetail::Hp { strikes, strike_count, remaining_hp } => {
                prop_assert!(*remaining_hp > 0);
                (strikes.clone(), *strike_count)
            }
            _ => unreachable!(),
        };

        // Only the winner lands an odd-numbered closing strike
        prop_assert_eq!(strike_count % 2 == 1, outcome.winner == Side::First);
        prop_assert_eq!(strikes.len() as u64, strike_count.min(STRIKE_LOG_LIMIT as u64));

        // Opening strikes alternate starting with the first of the pair
        let opening = if strike_count > strikes.len() as u64 {
            &strikes[..strikes.len() - 1]
        } else {
            &strikes[..]
        };
        for (idx, strike) in opening.iter().enumerate() {
            let expected = if idx % 2 == 0 { Side::First } else { Side::Second };
            prop_assert_eq!(strike.attacker, expected);
        }
        let last = strikes.last().unwrap();
        prop_assert_eq!(last.attacker, outcome.winner);
        prop_assert!(last.defender_hp <= 0);
    }

    #[test]
    fn test_hp_depletion_matches_turn_by_turn_exchange(
        a in stat_line_strategy(),
        b in stat_line_strategy(),
    ) {
        let (first, second) = (contestant(1, a), contestant(2, b));
        let outcome = HpDepletion.resolve(&first, &second).unwrap();

        // Play the exchange out one strike at a time
        let attack = [first.stat(Stat::Attack).unwrap(), second.stat(Stat::Attack).unwrap()];
        let mut hp = [first.stat(Stat::Hp).unwrap(), second.stat(Stat::Hp).unwrap()];
        let mut exchanged = 0u64;
        let winner = loop {
            hp[1] -= attack[0];
            exchanged += 1;
            if hp[1] <= 0 {
                break Side::First;
            }
            hp[0] -= attack[1];
            exchanged += 1;
            if hp[0] <= 0 {
                break Side::Second;
            }
        };
        let survivor_hp = match winner {
            Side::First => hp[0],
            Side::Second => hp[1],
        };

        prop_assert_eq!(outcome.winner, winner);
        let MatchDetail::Hp { strike_count, remaining_hp, .. } = outcome.detail else {
            unreachable!()
        };
        prop_assert_eq!(strike_count, exchanged);
        prop_assert_eq!(remaining_hp, survivor_hp);
    }
}
