/// Reality House example: a scripted opening followed by a seeded season.
///
/// The first act stages a few events by hand to show how effects and
/// evolution move the board. The second act hands control to the round driver.
///
/// Run with: cargo run --example reality_house

use drama_engine::core::catalog::EventCatalog;
use drama_engine::core::config::{self, EvolutionConfig, SeasonConfig};
use drama_engine::core::driver::{Advance, RoundDriver};
use drama_engine::core::effect::apply_event;
use drama_engine::core::eligibility;
use drama_engine::core::evolution::evolve;
use drama_engine::core::registry::{CharacterRegistry, PopularityEntry};
use drama_engine::core::render::Renderer;
use drama_engine::schema::event::RoundQuality;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Narrator;

impl Renderer for Narrator {
    fn display_dialogue(&mut self, text: &str) {
        println!("{}", text);
    }

    fn display_popularity_snapshot(&mut self, entries: &[PopularityEntry]) {
        print_board(entries);
    }

    fn append_relationship_log(&mut self, line: &str) {
        println!("    ({})", line);
    }
}

fn print_board(entries: &[PopularityEntry]) {
    for entry in entries {
        println!(
            "    {:<8} {:<14} {:>4}",
            entry.name,
            entry.personality.to_string(),
            entry.popularity
        );
    }
    println!();
}

fn main() {
    let catalog = EventCatalog::reality_house().expect("Failed to load catalog");
    let cast = config::reality_house_cast().expect("Failed to load cast");
    let mut registry = CharacterRegistry::from_cast(&cast).expect("Failed to build registry");
    let mut rng = StdRng::seed_from_u64(7);

    let tasha = registry.require("Tasha").expect("Missing contestant");
    let liam = registry.require("Liam").expect("Missing contestant");
    let zoe = registry.require("Zoe").expect("Missing contestant");

    println!("=== Act One: move-in day ===\n");

    // --- A light squabble ---
    let chores = catalog.get("chores_argument").expect("chores_argument exists");
    println!("{}", chores.describe("Tasha", "Liam"));
    apply_event(&mut registry, chores, tasha, liam);
    print_board(&registry.popularity_snapshot());

    // --- Zoe gets a crush the hard way ---
    let flirt = catalog.get("poolside_flirt").expect("poolside_flirt exists");
    println!("{}", flirt.describe("Zoe", "Liam"));
    apply_event(&mut registry, flirt, zoe, liam);

    let unlocked = eligibility::filter(&catalog, &registry, zoe, liam, RoundQuality::Excellent);
    let ids: Vec<&str> = unlocked.iter().map(|e| e.id.as_str()).collect();
    println!("Now open for Zoe & Liam: {}\n", ids.join(", "));

    let confession = catalog
        .get("confession_rejection")
        .expect("confession_rejection exists");
    println!("{}", confession.describe("Zoe", "Liam"));
    apply_event(&mut registry, confession, zoe, liam);
    for transition in evolve(&mut registry, zoe, liam, &EvolutionConfig::default(), &mut rng) {
        println!("    ({})", transition.line);
    }
    print_board(&registry.popularity_snapshot());

    println!("=== Act Two: the season ===\n");

    let mut driver = RoundDriver::builder()
        .reality_house()
        .expect("Failed to load Reality House data")
        .with_config(SeasonConfig {
            seed: 2026,
            total_rounds: 8,
            ..SeasonConfig::default()
        })
        .build(Narrator)
        .expect("Failed to build driver");

    while !driver.is_complete() {
        match driver.advance().expect("Round failed") {
            Advance::Round(report) => {
                println!(
                    "--- round {} ({}): {} & {} ---\n",
                    report.round, report.quality, report.a, report.b
                );
            }
            Advance::Eliminated(elimination) => {
                println!(
                    "Goodbye, {} the {}.",
                    elimination.name, elimination.personality
                );
            }
            Advance::Finished => break,
        }
    }
}
