use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_HEADER: &str = "-- source --";
const RENDERED_HEADER: &str = "-- rendered --";

/// Renders every `.spin` fixture under `dir` and compares it with the sibling
/// snapshot file carrying `snap_ext`. `BLESS=1` rewrites all snapshots.
///
/// Missing snapshots are written and reported; stale ones are collected so a
/// single run lists every fixture that changed.
pub fn check_spin_snapshots<F>(dir: &Path, snap_ext: &str, mut render: F)
where
    F: FnMut(&str) -> String,
{
    let bless = std::env::var_os("BLESS").is_some();
    let mut failures = Vec::new();

    for fixture in spin_fixtures(dir) {
        let source = fs::read_to_string(&fixture)
            .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", fixture.display()));
        let rendered = tidy(&render(&source));
        let snap = fixture.with_extension(snap_ext);

        if bless {
            write_snapshot(&snap, &source, &rendered);
            continue;
        }

        match fs::read_to_string(&snap) {
            Ok(stored) if tidy(rendered_section(&stored)) == rendered => {}
            Ok(stored) => failures.push(format!(
                "{}: snapshot is stale\n--- stored\n{}--- rendered\n{}",
                snap.display(),
                tidy(rendered_section(&stored)),
                rendered
            )),
            Err(_) => {
                write_snapshot(&snap, &source, &rendered);
                failures.push(format!(
                    "{}: snapshot was missing and has been written; review it",
                    snap.display()
                ));
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} spin snapshot(s) differ (rerun with BLESS=1 to accept):\n\n{}",
        failures.len(),
        failures.join("\n")
    );
}

fn spin_fixtures(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list fixtures in {}: {e}", dir.display()));
    let mut fixtures: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "spin"))
        .collect();
    fixtures.sort();
    fixtures
}

fn write_snapshot(path: &Path, source: &str, rendered: &str) {
    let mut contents = format!("{SOURCE_HEADER}\n{source}");
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(RENDERED_HEADER);
    contents.push('\n');
    contents.push_str(rendered);
    fs::write(path, contents)
        .unwrap_or_else(|e| panic!("cannot write snapshot {}: {e}", path.display()));
}

/// Text after the rendered header, or the whole file for bare snapshots.
fn rendered_section(stored: &str) -> &str {
    match stored.split_once(RENDERED_HEADER) {
        Some((_, rest)) => rest.trim_start_matches(['\r', '\n']),
        None => stored,
    }
}

/// Drops trailing spaces per line and ends with exactly one newline.
fn tidy(text: &str) -> String {
    text.lines().map(|line| format!("{}\n", line.trim_end())).collect()
}
