/// Catalog Linter: loads a catalog directory and reports quality issues.
///
/// Usage: catalog_linter <catalog_dir> [--min-hooks <n>]

use marketing_engine::core::catalog::Catalog;
use marketing_engine::core::resolver::Axes;
use marketing_engine::core::selectors;
use std::collections::HashSet;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog_dir> [--min-hooks <n>]");
        process::exit(0);
    }

    let catalog_dir = Path::new(&args[1]);
    let mut min_hooks = 3;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--min-hooks" && i + 1 < args.len() {
            i += 1;
            match args[i].parse() {
                Ok(n) => min_hooks = n,
                Err(_) => {
                    eprintln!("ERROR: --min-hooks expects a number, got '{}'", args[i]);
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    if !catalog_dir.is_dir() {
        eprintln!("ERROR: Path '{}' is not a directory", catalog_dir.display());
        process::exit(1);
    }

    // Structural validation happens at load time; any defect is fatal.
    let catalog = match Catalog::load_from_dir(catalog_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded catalog from {} ({} grid cells)",
        catalog_dir.display(),
        selectors::grid_keys().count()
    );

    let warnings = lint_catalog(&catalog, min_hooks);

    println!("\n=== Catalog Lint Report ===\n");

    if warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    println!("\nSummary: 0 errors, {} warnings", warnings.len());
}

fn lint_catalog(catalog: &Catalog, min_hooks: usize) -> Vec<String> {
    let mut warnings = Vec::new();

    for (level, content_type) in selectors::grid_keys() {
        let hooks = selectors::hooks(catalog, level, content_type);
        if hooks.len() < min_hooks {
            warnings.push(format!(
                "hooks[{}.{}] has only {} alternatives (minimum {} recommended)",
                level,
                content_type,
                hooks.len(),
                min_hooks
            ));
        }

        let mut seen = HashSet::new();
        for tag in selectors::hashtags(catalog, &Axes::exact(level, content_type)) {
            if !tag.starts_with('#') {
                warnings.push(format!(
                    "hashtags[{}.{}] entry '{}' does not start with '#'",
                    level, content_type, tag
                ));
            }
            if !seen.insert(tag.as_str()) {
                warnings.push(format!(
                    "hashtags[{}.{}] repeats '{}'",
                    level, content_type, tag
                ));
            }
        }
    }

    warnings
}
