use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// First character must be a digit for a value to count as a version.
fn looks_like_version(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn version_from_file(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let version = content.trim();
    looks_like_version(version).then(|| version.to_string())
}

/// Reads `{ ".": "x.y.z" }` from a release manifest.
fn version_from_manifest(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let pattern = r#"".": ""#;
    let value_start = contents.find(pattern)? + pattern.len();
    let value_end = contents[value_start..].find('"')?;
    let version = contents[value_start..value_start + value_end].trim();
    looks_like_version(version).then(|| version.to_string())
}

fn main() {
    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    let repo_root = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().and_then(Path::parent).map(Path::to_path_buf));

    let mut version = cargo_version.clone();
    if let Some(root) = repo_root {
        let version_path = root.join("VERSION");
        let manifest_path = root.join(".release-please-manifest.json");

        if let Some(file_version) = version_from_file(&version_path) {
            println!("cargo:rerun-if-changed={}", version_path.display());
            version = file_version;
        } else if let Some(manifest_version) = version_from_manifest(&manifest_path) {
            println!("cargo:rerun-if-changed={}", manifest_path.display());
            version = manifest_version;
        }
    }

    println!("cargo:rustc-env=HOGTYPED_VERSION={version}");

    if version != cargo_version {
        println!(
            "cargo:warning=Using version {version} from VERSION file or manifest (Cargo.toml has {cargo_version})"
        );
    }
}
