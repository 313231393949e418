//! Watch command implementation

use crate::error::{CliError, CliResult};
use crate::ops::generate::{generate_wrapper, GenerateOptions, GenerateSettings};
use crate::ops::schemas::watch_root;
use crate::utils::config;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

const SCHEMA_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];
const DEBOUNCE: Duration = Duration::from_millis(300);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Options {
    pub generate: GenerateOptions,
}

/// A change is worth regenerating for when it touches a schema document
/// and is not our own output.
fn is_relevant_change(path: &Path, output: &Path) -> bool {
    let is_schema = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCHEMA_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
    if !is_schema {
        return false;
    }

    let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    canonical(path) != canonical(output)
}

fn regenerate(settings: &GenerateSettings) -> CliResult<()> {
    let summary = generate_wrapper(settings)?;
    println!(
        "✓ Regenerated {} ({} event{})",
        summary.output.display(),
        summary.event_count,
        if summary.event_count == 1 { "" } else { "s" }
    );
    for missing in &summary.missing_references {
        println!("  Warning: {missing}");
    }
    Ok(())
}

/// Runs the watch command, regenerating the wrapper whenever a schema changes.
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Watch mode failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let config = config::read_config()?;
    let settings = GenerateSettings::resolve(&options.generate, &config)?;

    let root = watch_root(&settings.pattern);
    if !root.is_dir() {
        return Err(CliError::Message(format!(
            "Schema directory not found: {}",
            root.display()
        )));
    }

    println!("Starting watch mode...");
    println!("Watching {} for schema changes", root.display());
    if let Err(e) = regenerate(&settings) {
        eprintln!("  Warning: Initial generation failed: {e}");
    }
    println!("\nWatching for changes... (Press Ctrl+C to stop)");

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())
        .map_err(|e| CliError::Message(format!("Failed to create file watcher: {e}")))?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| CliError::Message(format!("Failed to watch {}: {e}", root.display())))?;

    let mut last_change = Instant::now();
    let mut pending: HashSet<PathBuf> = HashSet::new();

    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => {
                if !matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) {
                    continue;
                }
                for path in event.paths {
                    if is_relevant_change(&path, &settings.output) {
                        pending.insert(path);
                        last_change = Instant::now();
                    } else {
                        tracing::trace!(path = %path.display(), "ignoring change");
                    }
                }
            }
            Ok(Err(e)) => {
                eprintln!("  Warning: File watcher error: {e}");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if pending.is_empty() || last_change.elapsed() < DEBOUNCE {
                    continue;
                }
                for path in &pending {
                    println!("\n📝 Schema changed: {}", path.display());
                }
                pending.clear();
                if let Err(e) = regenerate(&settings) {
                    eprintln!("  ✗ Generation failed: {e}");
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(CliError::Message("File watcher disconnected".to_string()));
            }
        }
    }
}
