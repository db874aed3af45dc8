//! Semantic search command
//!
//! Ranks the owner's notes against the query. When embeddings are
//! unavailable the notes are shown in their usual list order instead.

use anyhow::{bail, Result};
use colored::*;
use serde::Serialize;

use semnote::core::note::{sort_notes, Note, SortField, SortOrder};
use semnote::search::{embedder_from_config, BlankQuery, Embedder, RankError, Ranker, Ranking};
use semnote::store::NoteFilter;

use super::list::print_row;
use super::{display_title, truncate_width, Workspace};

/// Results that get a relevance bar
const CHART_TOP: usize = 5;
const BAR_WIDTH: usize = 20;

#[derive(Serialize)]
struct SearchJson<'a> {
    query: &'a str,
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    results: Vec<ResultJson<'a>>,
}

#[derive(Serialize)]
struct ResultJson<'a> {
    id: &'a str,
    title: &'a str,
    favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
}

/// Notes in display order, with scores when ranked
enum Outcome<'a> {
    Ranked(Vec<(&'a Note, f32)>),
    Unranked(Vec<&'a Note>),
    Fallback(Vec<&'a Note>, String),
}

pub fn run(query: &str, limit: Option<usize>, favorites: bool, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let limit = limit.unwrap_or(ws.config.search.default_limit);
    let filter = if favorites {
        NoteFilter::Favorites
    } else {
        NoteFilter::All
    };

    let mut notes = ws.store.list(ws.owner(), filter)?;
    sort_notes(&mut notes, SortField::Updated, SortOrder::Desc);

    let outcome = match embedder_from_config(&ws.config.embedding) {
        Ok(embedder) => rank_outcome(embedder, ws.config.search.blank_query, query, &notes)?,
        Err(e) => fallback(&notes, RankError::from(e)),
    };

    if json {
        print_json(query, &outcome, limit)
    } else {
        print_text(query, &outcome, limit);
        Ok(())
    }
}

/// Rank `notes`, keeping their order when the embedder fails
fn rank_outcome<'a, E: Embedder>(
    embedder: E,
    blank_query: BlankQuery,
    query: &str,
    notes: &'a [Note],
) -> Result<Outcome<'a>> {
    let ranking = Ranker::new(embedder)
        .with_blank_query(blank_query)
        .rank(query, notes);

    match ranking {
        Ok(Ranking::Ranked(results)) => Ok(Outcome::Ranked(
            results.into_iter().map(|r| (r.note, r.score)).collect(),
        )),
        Ok(Ranking::Unranked(notes)) => Ok(Outcome::Unranked(notes)),
        Err(RankError::InvalidQuery) => bail!("search query must not be blank"),
        Err(e) => Ok(fallback(notes, e)),
    }
}

fn fallback(notes: &[Note], err: RankError) -> Outcome<'_> {
    tracing::warn!(error = %err, "semantic ranking failed, keeping list order");
    let reason = match err {
        RankError::EmbeddingUnavailable(e) => e.to_string(),
        other => other.to_string(),
    };
    Outcome::Fallback(notes.iter().collect(), reason)
}

fn print_json(query: &str, outcome: &Outcome<'_>, limit: usize) -> Result<()> {
    let (mode, error, results) = match outcome {
        Outcome::Ranked(results) => (
            "semantic",
            None,
            results
                .iter()
                .take(limit)
                .map(|(n, s)| result_json(n, Some(*s)))
                .collect(),
        ),
        Outcome::Unranked(notes) => (
            "unranked",
            None,
            notes.iter().take(limit).map(|n| result_json(n, None)).collect(),
        ),
        Outcome::Fallback(notes, error) => (
            "fallback",
            Some(error.clone()),
            notes.iter().take(limit).map(|n| result_json(n, None)).collect(),
        ),
    };

    let out = SearchJson {
        query,
        mode,
        error,
        results,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn result_json(note: &Note, score: Option<f32>) -> ResultJson<'_> {
    ResultJson {
        id: &note.id,
        title: &note.title,
        favorite: note.favorite,
        score,
    }
}

fn print_text(query: &str, outcome: &Outcome<'_>, limit: usize) {
    let notes: Vec<&Note> = match outcome {
        Outcome::Ranked(results) => {
            print_ranked(query, results, limit);
            return;
        }
        Outcome::Unranked(notes) => notes.clone(),
        Outcome::Fallback(notes, error) => {
            println!(
                "{} Semantic search unavailable ({}), showing notes in list order",
                "!".yellow(),
                error
            );
            println!();
            notes.clone()
        }
    };

    for note in notes.iter().take(limit) {
        print_row(note);
    }
}

fn print_ranked(query: &str, results: &[(&Note, f32)], limit: usize) {
    if results.is_empty() {
        println!("{} No notes to search for: {}", "→".dimmed(), query.cyan());
        return;
    }

    let shown = &results[..results.len().min(limit)];
    println!(
        "{} {} results for: {}",
        "→".dimmed(),
        shown.len(),
        query.cyan()
    );
    println!();

    for (i, (note, score)) in shown.iter().enumerate() {
        let badge = format!("{:.2}%", score * 100.0);
        let badge = if *score > 0.8 {
            badge.green()
        } else if *score > 0.5 {
            badge.yellow()
        } else {
            badge.dimmed()
        };
        let star = if note.favorite { " ★".yellow() } else { "".normal() };

        println!(
            "{}. [{}] {}{}",
            (i + 1).to_string().bold(),
            badge,
            display_title(note).cyan(),
            star
        );
        if !note.body.is_empty() {
            println!("   {}", truncate_width(&note.body, 100).dimmed());
        }
        println!();
    }

    println!("{}", "Relevance".bold());
    for (note, score) in shown.iter().take(CHART_TOP) {
        println!(
            "  {} {}",
            relevance_bar(*score),
            truncate_width(display_title(note), 30)
        );
    }
}

/// Fixed-width bar; negative scores draw as empty
fn relevance_bar(score: f32) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
