/// Catalog Linter: checks an event catalog for events that can never fire or read badly.
///
/// Usage: catalog_linter <catalog.ron | dir> [--strict]

use clap::Parser;
use drama_engine::core::catalog::EventCatalog;
use drama_engine::core::evolution::EvolutionRule;
use drama_engine::schema::event::{EffectOp, Participant, Tier};
use drama_engine::schema::flag::Flag;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "catalog_linter")]
#[command(about = "Validate a drama event catalog")]
struct Args {
    /// A catalog file, or a directory searched for *.ron catalogs
    path: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

fn main() {
    let args = Args::parse();

    let mut files = Vec::new();
    if args.path.is_file() {
        files.push(args.path.clone());
    } else if args.path.is_dir() {
        collect_catalogs(&args.path, &mut files);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args.path.display());
        process::exit(1);
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in &files {
        println!("\n=== {} ===\n", file.display());
        let catalog = match EventCatalog::load_from_ron(file) {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("ERROR: {}", e);
                total_errors += 1;
                continue;
            }
        };
        println!("Loaded {} events", catalog.len());

        let (errors, warnings) = lint_catalog(&catalog);
        if errors.is_empty() && warnings.is_empty() {
            println!("All checks passed!");
        }
        for warning in &warnings {
            println!("WARNING: {}", warning);
        }
        for error in &errors {
            println!("ERROR: {}", error);
        }
        total_errors += errors.len();
        total_warnings += warnings.len();
    }

    println!(
        "\nSummary: {} files, {} errors, {} warnings",
        files.len(),
        total_errors,
        total_warnings
    );

    if total_errors > 0 || (args.strict && total_warnings > 0) {
        process::exit(1);
    }
}

// Only `*catalog*.ron` files; cast and season files share the extension.
fn collect_catalogs(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_catalogs(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron")
                && path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| stem.contains("catalog"))
            {
                files.push(path);
            }
        }
    }
    files.sort();
}

fn lint_catalog(catalog: &EventCatalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut producible: HashSet<Flag> = EvolutionRule::ALL.iter().map(|r| r.produces()).collect();
    for event in catalog.iter() {
        for op in &event.effect {
            if let EffectOp::AddFlag { flag, .. } = op {
                producible.insert(flag.clone());
            }
        }
    }

    for event in catalog.iter() {
        let id = &event.id;

        for participant in [Participant::A, Participant::B] {
            if !event.template.mentions(participant) {
                warnings.push(format!(
                    "Event '{}' never names participant {:?}",
                    id, participant
                ));
            }
        }

        for flag in event.requires.iter().chain(&event.blocked_by) {
            if flag.is_custom() {
                warnings.push(format!(
                    "Event '{}' uses unknown flag '{}' (typo?)",
                    id, flag
                ));
            }
        }

        for flag in &event.requires {
            if event.blocked_by.contains(flag) {
                errors.push(format!(
                    "Event '{}' both requires and is blocked by '{}' and can never fire",
                    id, flag
                ));
            }
            if !producible.contains(flag) {
                errors.push(format!(
                    "Event '{}' requires '{}' but no event or evolution rule adds it",
                    id, flag
                ));
            }
        }

        if event.tier == Tier::Major && event.requires.is_empty() {
            warnings.push(format!(
                "{} event '{}' has no requirements and can fire on a first meeting",
                event.tier, id
            ));
        }

        if event.effect.is_empty() {
            warnings.push(format!("Event '{}' has no effect", id));
        }
    }

    if !catalog.iter().any(|e| e.tier == Tier::Light && e.requires.is_empty()) {
        errors.push(
            "No light event without requirements; a fresh cast can never start any drama"
                .to_string(),
        );
    }

    (errors, warnings)
}
