use anyhow::Result;
use colored::*;
use serde::Serialize;

use semnote::core::note::{sort_notes, Note, SortField, SortOrder};
use semnote::store::NoteFilter;

use super::{display_title, format_time, pad_width, truncate_width, Workspace};

const TITLE_WIDTH: usize = 40;

#[derive(Serialize)]
struct ListItem<'a> {
    id: &'a str,
    title: &'a str,
    favorite: bool,
    created: String,
    updated: String,
}

pub fn run(favorites: bool, sort: SortField, asc: bool, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let filter = if favorites {
        NoteFilter::Favorites
    } else {
        NoteFilter::All
    };
    let order = if asc { SortOrder::Asc } else { SortOrder::Desc };

    let mut notes = ws.store.list(ws.owner(), filter)?;
    sort_notes(&mut notes, sort, order);

    if json {
        let items: Vec<_> = notes
            .iter()
            .map(|n| ListItem {
                id: &n.id,
                title: &n.title,
                favorite: n.favorite,
                created: n.created.to_rfc3339(),
                updated: n.updated.to_rfc3339(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if notes.is_empty() {
        let what = if favorites { "favorite notes" } else { "notes" };
        println!("{} No {} yet", "→".dimmed(), what);
        return Ok(());
    }

    for note in &notes {
        print_row(note);
    }
    println!();
    println!("{}", format!("{} notes", notes.len()).dimmed());

    Ok(())
}

pub fn print_row(note: &Note) {
    let star = if note.favorite { "★".yellow() } else { " ".normal() };
    let title = pad_width(&truncate_width(display_title(note), TITLE_WIDTH), TITLE_WIDTH);
    println!(
        "{} {} {}  {}",
        star,
        title.cyan(),
        format_time(&note.updated).dimmed(),
        note.id.dimmed()
    );
}
