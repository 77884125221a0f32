//! Session inspection commands.
//!
//! Reads the Copilot CLI's session store directly; nothing here talks to the CLI.

use anyhow::Result;
use std::path::{Path, PathBuf};

use copilot_agent::config::Settings;
use copilot_agent::session::{SessionManager, default_session_dir};
use copilot_agent::{SessionInfo, SessionListOptions, SessionSortKey, SortOrder};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Store directory from settings, or the CLI's default location
pub fn store_dir(settings: &Settings) -> PathBuf {
    settings.session_store().unwrap_or_else(default_session_dir)
}

/// Ids longer than the column are cut on a character boundary
fn short_id(id: &str) -> String {
    const WIDTH: usize = 36;

    if id.chars().count() > WIDTH {
        let head: String = id.chars().take(WIDTH - 3).collect();
        format!("{head}...")
    } else {
        id.to_string()
    }
}

/// List stored sessions
pub async fn list(
    store: &Path,
    limit: Option<usize>,
    sort: SessionSortKey,
    asc: bool,
    json: bool,
) -> Result<()> {
    let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
    let options = SessionListOptions {
        limit,
        ..SessionListOptions::default()
    }
    .sort_by(sort, order);

    let sessions = SessionManager::with_dir(store).list_sessions(&options).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions found in {}", store.display());
        return Ok(());
    }

    println!(
        "{:<38} {:<17} {:<17} {}",
        "ID", "CREATED", "UPDATED", "SUMMARY"
    );
    println!("{}", "-".repeat(100));

    for session in &sessions {
        println!(
            "{:<38} {:<17} {:<17} {}",
            short_id(&session.id),
            session.created_at.format(TIME_FORMAT).to_string(),
            session.updated_at.format(TIME_FORMAT).to_string(),
            session.summary.lines().next().unwrap_or_default()
        );
    }

    println!();
    println!("Total: {} session(s)", sessions.len());

    Ok(())
}

/// Show details of one session
pub async fn show(store: &Path, session_id: &str, json: bool) -> Result<()> {
    let session = SessionManager::with_dir(store)
        .get_session(session_id)
        .await?;
    print_session(&session, json)
}

/// Show the most recently updated session
pub async fn latest(store: &Path, json: bool) -> Result<()> {
    match SessionManager::with_dir(store).get_most_recent_session().await {
        Some(session) => print_session(&session, json),
        None => {
            println!("No sessions found in {}", store.display());
            Ok(())
        }
    }
}

fn print_session(session: &SessionInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }

    println!("Session: {}", session.id);
    println!("  Directory: {}", session.cwd);
    println!("  Created:   {}", session.created_at.format(TIME_FORMAT));
    println!("  Updated:   {}", session.updated_at.format(TIME_FORMAT));
    if session.summary_count > 0 {
        println!("  Compacted: {} time(s)", session.summary_count);
    }
    if !session.summary.is_empty() {
        println!();
        println!("{}", session.summary.trim());
    }

    Ok(())
}
