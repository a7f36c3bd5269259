/// Season integration tests: full runs through the round driver.

use drama_engine::core::config::{EvolutionConfig, SeasonConfig, TierRoll};
use drama_engine::core::driver::{Advance, DriverState, RoundDriver, SimulationError};
use drama_engine::core::registry::{CharacterRegistry, PopularityEntry};
use drama_engine::core::render::{Renderer, Transcript};
use drama_engine::core::selector::PersonalityWeightedSelector;
use drama_engine::schema::event::RoundQuality;
use drama_engine::schema::flag::Flag;
use std::collections::BTreeSet;

fn reality_house(config: SeasonConfig) -> RoundDriver<Transcript> {
    RoundDriver::builder()
        .reality_house()
        .unwrap()
        .with_config(config)
        .build(Transcript::new())
        .unwrap()
}

fn all_flags(registry: &CharacterRegistry) -> BTreeSet<(String, String, Flag)> {
    let mut flags = BTreeSet::new();
    for character in registry.iter() {
        for other in character.counterparts() {
            for flag in character.sorted_flags_toward(other) {
                flags.insert((character.name.clone(), other.to_string(), flag));
            }
        }
    }
    flags
}

#[test]
fn full_season_from_files() {
    let mut driver = RoundDriver::builder()
        .cast_path("data/reality_house/cast.ron")
        .catalog_path("data/reality_house/catalog.ron")
        .config_path("data/reality_house/season.ron")
        .build(Transcript::new())
        .unwrap();
    assert_eq!(driver.total_rounds(), 10);
    assert_eq!(driver.state(), DriverState::Idle);

    let results = driver.run_to_completion().unwrap();
    assert_eq!(results.len(), 11);
    for (i, result) in results.iter().take(10).enumerate() {
        let Advance::Round(report) = result else {
            panic!("advance {} should be a round, got {:?}", i + 1, result);
        };
        assert_eq!(report.round as usize, i + 1);
    }
    let Some(Advance::Eliminated(elimination)) = results.last() else {
        panic!("season should end with an elimination");
    };

    let lowest = driver
        .registry()
        .popularity_snapshot()
        .into_iter()
        .map(|entry| entry.popularity)
        .min()
        .unwrap();
    assert_eq!(elimination.popularity, lowest);
    assert_eq!(driver.state(), DriverState::SimulationComplete);
    assert_eq!(driver.advance().unwrap(), Advance::Finished);
    assert_eq!(driver.advance().unwrap(), Advance::Finished);
}

#[test]
fn pairs_are_always_distinct() {
    let mut driver = reality_house(SeasonConfig {
        seed: 3,
        total_rounds: 60,
        ..SeasonConfig::default()
    });
    for result in driver.run_to_completion().unwrap() {
        if let Advance::Round(report) = result {
            assert_ne!(report.a, report.b, "round {}", report.round);
        }
    }
}

#[test]
fn flags_only_accumulate() {
    let mut driver = reality_house(SeasonConfig {
        seed: 11,
        total_rounds: 40,
        tier_roll: TierRoll {
            pass_at: 10,
            excellent_at: 40,
        },
        evolution: EvolutionConfig {
            spontaneous_crush: 0.3,
            ..EvolutionConfig::default()
        },
    });

    let mut previous = all_flags(driver.registry());
    while !driver.is_complete() {
        driver.advance().unwrap();
        let current = all_flags(driver.registry());
        assert!(
            current.is_superset(&previous),
            "flags disappeared: {:?}",
            previous.difference(&current).collect::<Vec<_>>()
        );
        previous = current;
    }
    assert!(!previous.is_empty());
}

#[test]
fn same_seed_replays_identically() {
    let config = SeasonConfig {
        seed: 2025,
        total_rounds: 25,
        ..SeasonConfig::default()
    };
    let mut first = reality_house(config.clone());
    let mut second = reality_house(config);

    let a = first.run_to_completion().unwrap();
    let b = second.run_to_completion().unwrap();
    assert_eq!(a, b);
    assert_eq!(
        first.registry().popularity_snapshot(),
        second.registry().popularity_snapshot()
    );
    assert_eq!(first.relationship_log(), second.relationship_log());
}

#[test]
fn different_seeds_diverge() {
    let run = |seed: u64| {
        let mut driver = reality_house(SeasonConfig {
            seed,
            total_rounds: 25,
            ..SeasonConfig::default()
        });
        driver.run_to_completion().unwrap();
        driver.into_renderer().dialogue
    };
    let baseline = run(1);
    assert!((2..8).any(|seed| run(seed) != baseline));
}

#[test]
fn failed_rounds_change_nothing() {
    let mut driver = reality_house(SeasonConfig {
        total_rounds: 6,
        tier_roll: TierRoll {
            pass_at: 100,
            excellent_at: 100,
        },
        ..SeasonConfig::default()
    });
    let before = all_flags(driver.registry());
    for result in driver.run_to_completion().unwrap() {
        if let Advance::Round(report) = result {
            assert_eq!(report.quality, RoundQuality::Fail);
            assert!(report.event.is_none());
        }
    }
    assert_eq!(all_flags(driver.registry()), before);
    assert!(driver.relationship_log().is_empty());
}

#[test]
fn standings_in_report_match_registry() {
    let mut driver = reality_house(SeasonConfig {
        seed: 8,
        total_rounds: 5,
        ..SeasonConfig::default()
    });
    for _ in 0..5 {
        let Advance::Round(report) = driver.advance().unwrap() else {
            panic!("expected a round");
        };
        assert_eq!(report.standings, driver.registry().popularity_snapshot());
        assert_eq!(
            driver.renderer().last_snapshot(),
            Some(report.standings.as_slice())
        );
    }
}

#[derive(Debug, PartialEq)]
enum Call {
    Dialogue,
    Log,
    Snapshot,
}

#[derive(Default)]
struct CallRecorder {
    calls: Vec<Call>,
}

impl Renderer for CallRecorder {
    fn display_dialogue(&mut self, _text: &str) {
        self.calls.push(Call::Dialogue);
    }

    fn display_popularity_snapshot(&mut self, _entries: &[PopularityEntry]) {
        self.calls.push(Call::Snapshot);
    }

    fn append_relationship_log(&mut self, _line: &str) {
        self.calls.push(Call::Log);
    }
}

#[test]
fn renderer_sees_dialogue_then_log_then_snapshot() {
    let mut driver = RoundDriver::builder()
        .reality_house()
        .unwrap()
        .with_config(SeasonConfig {
            total_rounds: 1,
            tier_roll: TierRoll {
                pass_at: 0,
                excellent_at: 0,
            },
            evolution: EvolutionConfig::always(),
            ..SeasonConfig::default()
        })
        .build(CallRecorder::default())
        .unwrap();

    let Advance::Round(report) = driver.advance().unwrap() else {
        panic!("expected a round");
    };
    // A fresh pair always has an unconditional event available.
    assert!(report.event.is_some());
    assert!(!report.transitions.is_empty());

    let calls = &driver.renderer().calls;
    assert_eq!(calls.first(), Some(&Call::Dialogue));
    assert_eq!(calls.last(), Some(&Call::Snapshot));
    assert_eq!(
        calls.iter().filter(|c| **c == Call::Log).count(),
        report.transitions.len()
    );
}

#[test]
fn weighted_selector_runs_a_season() {
    let mut driver = RoundDriver::builder()
        .reality_house()
        .unwrap()
        .seed(5)
        .total_rounds(15)
        .selector(PersonalityWeightedSelector::default())
        .build(Transcript::new())
        .unwrap();
    let results = driver.run_to_completion().unwrap();
    assert_eq!(results.len(), 16);
    assert!(driver.is_complete());
}

#[test]
fn bad_inputs_fail_to_build() {
    let solo = RoundDriver::builder()
        .cast_path("tests/fixtures/solo_cast.ron")
        .catalog_path("data/reality_house/catalog.ron")
        .build(Transcript::new());
    assert!(matches!(solo, Err(SimulationError::TooFewCharacters(1))));

    let empty = RoundDriver::builder()
        .cast_path("tests/fixtures/duo_cast.ron")
        .catalog_path("tests/fixtures/empty_catalog.ron")
        .build(Transcript::new());
    assert!(matches!(empty, Err(SimulationError::EmptyCatalog)));

    let duplicate = RoundDriver::builder()
        .cast_path("tests/fixtures/duo_cast.ron")
        .catalog_path("tests/fixtures/duplicate_catalog.ron")
        .build(Transcript::new());
    assert!(matches!(duplicate, Err(SimulationError::Catalog(_))));

    let missing = RoundDriver::builder()
        .cast_path("tests/fixtures/no_such_cast.ron")
        .catalog_path("data/reality_house/catalog.ron")
        .build(Transcript::new());
    assert!(matches!(missing, Err(SimulationError::Config(_))));

    let bad_odds = RoundDriver::builder()
        .reality_house()
        .unwrap()
        .config_path("tests/fixtures/bad_odds_season.ron")
        .build(Transcript::new());
    assert!(matches!(bad_odds, Err(SimulationError::Config(_))));
}

#[test]
fn two_person_cast_alternates_roles() {
    let mut driver = RoundDriver::builder()
        .cast_path("tests/fixtures/duo_cast.ron")
        .catalog_path("data/reality_house/catalog.ron")
        .seed(4)
        .total_rounds(30)
        .build(Transcript::new())
        .unwrap();
    let mut seen = BTreeSet::new();
    for result in driver.run_to_completion().unwrap() {
        if let Advance::Round(report) = result {
            seen.insert((report.a, report.b));
        }
    }
    assert_eq!(seen.len(), 2);
}
