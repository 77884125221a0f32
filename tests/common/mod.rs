//! Shared fixtures for session store and client tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a session directory with a complete descriptor
pub fn write_session(store: &Path, id: &str, created_at: &str, updated_at: &str) {
    write_descriptor(
        store,
        id,
        &format!(
            "id: {id}\ncwd: /home/dev/{id}\nsummary: Work on {id}\nsummary_count: 1\ncreated_at: {created_at}\nupdated_at: {updated_at}\n"
        ),
    );
}

/// Write arbitrary descriptor content for `id`
pub fn write_descriptor(store: &Path, id: &str, content: &str) {
    let dir = store.join(id);
    fs::create_dir_all(&dir).expect("Failed to create session dir");
    fs::write(dir.join("workspace.yaml"), content).expect("Failed to write descriptor");
}

/// Store with three sessions:
///
/// | id    | created    | updated          |
/// |-------|------------|------------------|
/// | one   | 2026-03-01 | 2026-03-02       |
/// | two   | 2026-03-03 | 2026-03-03 12:30 |
/// | three | 2026-02-01 | 2026-03-04       |
pub fn session_store() -> TempDir {
    let store = TempDir::new().expect("Failed to create temp dir");
    write_session(
        store.path(),
        "one",
        "2026-03-01T09:00:00.000Z",
        "2026-03-02T09:00:00.000Z",
    );
    write_session(
        store.path(),
        "two",
        "2026-03-03T09:00:00.000Z",
        "2026-03-03T12:30:00.000Z",
    );
    write_session(
        store.path(),
        "three",
        "2026-02-01T09:00:00.000Z",
        "2026-03-04T10:00:00.000Z",
    );
    store
}

/// Stand-in for the `copilot` binary.
///
/// Echoes its argv as the answer, appends a stats block and records a
/// session. Driven by environment variables:
/// `FAKE_STORE`/`FAKE_SESSION` (where to write the session, skipped if unset),
/// `FAKE_EXIT` and `FAKE_STDERR`.
#[cfg(unix)]
pub const FAKE_COPILOT: &str = r#"#!/bin/sh
printf 'args:'
for arg in "$@"; do printf ' [%s]' "$arg"; done
printf '\n\n'
printf 'Total usage est:       1 Premium request\n'
printf 'Total duration (API):  4.2s\n'
printf 'Total duration (wall): 5.0s\n'
printf 'Total code changes:    3 lines added, 1 lines removed\n'
printf 'Usage by model:\n'
printf '    gpt-5-mini           1.2k input, 45 output, 0 cache read (Est. 1 Premium request)\n'

if [ -n "$FAKE_STORE" ] && [ -n "$FAKE_SESSION" ]; then
  now=$(date -u +%Y-%m-%dT%H:%M:%S.000Z)
  mkdir -p "$FAKE_STORE/$FAKE_SESSION"
  printf 'id: %s\ncwd: %s\ncreated_at: %s\nupdated_at: %s\n' \
    "$FAKE_SESSION" "$PWD" "$now" "$now" > "$FAKE_STORE/$FAKE_SESSION/workspace.yaml"
fi

if [ -n "$FAKE_STDERR" ]; then printf '%s' "$FAKE_STDERR" >&2; fi
exit "${FAKE_EXIT:-0}"
"#;

/// Path of an executable copy of [`FAKE_COPILOT`].
///
/// Written once per test binary, before any test spawns it.
#[cfg(unix)]
pub fn fake_copilot() -> &'static Path {
    use once_cell::sync::Lazy;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    static SCRIPT: Lazy<(TempDir, PathBuf)> = Lazy::new(|| {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("copilot");
        fs::write(&path, FAKE_COPILOT).expect("Failed to write fake copilot");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake copilot executable");
        (dir, path)
    });

    &SCRIPT.1
}
