//! Stamps `STATEMENT_BUILD_SHA` for `--version` by reading .git directly.

use std::fs;
use std::path::Path;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let git_dir = Path::new(&manifest_dir).join("..").join(".git");

    let head = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head.display());

    let sha = match fs::read_to_string(&head) {
        Ok(contents) => match contents.trim().strip_prefix("ref: ") {
            Some(reference) => {
                let loose = git_dir.join(reference);
                // a new commit on the branch only touches the ref file
                println!("cargo:rerun-if-changed={}", loose.display());
                println!("cargo:rerun-if-changed={}", git_dir.join("packed-refs").display());
                resolve_ref(&git_dir, &loose, reference)
            }
            // detached HEAD holds the hash itself
            None => Some(contents.trim().to_string()),
        },
        Err(_) => None,
    };

    let short = sha
        .filter(|s| s.len() >= 7 && s.chars().all(|c| c.is_ascii_hexdigit()))
        .map(|s| s[..7].to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=STATEMENT_BUILD_SHA={}", short);
}

fn resolve_ref(git_dir: &Path, loose: &Path, reference: &str) -> Option<String> {
    if let Ok(s) = fs::read_to_string(loose) {
        return Some(s.trim().to_string());
    }
    let packed = fs::read_to_string(git_dir.join("packed-refs")).ok()?;
    packed.lines().find_map(|line| {
        let (hash, name) = line.split_once(' ')?;
        (name == reference).then(|| hash.to_string())
    })
}
