//! Replays `fixtures/*.descriptor.json` through the compiler and compares the
//! result with the sibling `*.schema.json`.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;
use serde_json::Value;
use shape_schema::Options;

fn main() -> ExitCode {
    let fixtures_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures"));
    let pattern = fixtures_dir.join("*.descriptor.json");
    let Ok(entries) = glob::glob(&pattern.to_string_lossy()) else {
        eprintln!("{} bad fixture pattern {}", "error:".red().bold(), pattern.display());
        return ExitCode::FAILURE;
    };

    let mut failures = 0usize;
    let mut total = 0usize;
    for entry in entries.flatten() {
        total += 1;
        let name = entry.file_name().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        match run_fixture(&entry) {
            Ok(()) => eprintln!("✅ {name}"),
            Err(message) => {
                failures += 1;
                eprintln!("❌ {name}: {message}");
            }
        }
    }

    eprintln!("—— {} passed, {} failed ——", total - failures, failures);
    if failures == 0 && total > 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn run_fixture(descriptor_path: &Path) -> Result<(), String> {
    let expected_path = descriptor_path
        .to_string_lossy()
        .replace(".descriptor.json", ".schema.json");
    let source = std::fs::read_to_string(descriptor_path).map_err(|e| e.to_string())?;
    let descriptor = shape_schema::path_de::descriptor_from_str(&source).map_err(|e| e.to_string())?;
    let actual = shape_schema::compile(&descriptor, &Options::default())
        .map(|schema| schema.to_json())
        .map_err(|e| format!("compile failed: {e}"))?;

    let expected_src = std::fs::read_to_string(&expected_path)
        .map_err(|e| format!("missing {expected_path}: {e}"))?;
    let expected = serde_json::from_str::<Value>(&expected_src).map_err(|e| e.to_string())?;
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "schema mismatch\n  expected: {expected}\n  actual:   {actual}"
        ))
    }
}
