//! Terminal output formatting.
//!
//! Summaries go to stderr; stdout is kept for the uid and raw JSON.

use colored::Colorize;
use dgmovie_core::Movie;
use dgmovie_graph::InsertResult;

/// Print the assigned uid for every blank node, in the order they were labelled.
pub fn print_assigned(inserted: &InsertResult) {
    println!("{}", inserted.movie_uid);

    eprintln!("{:<28} {}", "Label".bold(), "Uid".bold());
    eprintln!("{}", "-".repeat(44));
    for label in &inserted.labels {
        let uid = inserted.uids.get(label).map(String::as_str).unwrap_or("-");
        eprintln!("{:<28} {}", label, uid.cyan());
    }
    eprintln!("\n{} nodes created.", inserted.labels.len().to_string().bold());
}

/// Print a short, human-readable view of a movie.
pub fn print_movie_summary(movie: &Movie) {
    eprintln!("{} {}", movie.name.cyan().bold(), format!("({})", movie.uid).dimmed());
    if !movie.name_de.is_empty() {
        eprintln!("  {}: {}", "de".bold(), movie.name_de);
    }
    if !movie.name_tr.is_empty() {
        eprintln!("  {}: {}", "tr".bold(), movie.name_tr);
    }
    if let Some(date) = movie.initial_release_date {
        eprintln!("  {}: {}", "Released".bold(), date.format("%Y-%m-%d"));
    }

    let genres: Vec<&str> = movie.genre.iter().map(|g| g.name.as_str()).collect();
    if !genres.is_empty() {
        eprintln!("  {}: {}", "Genre".bold(), genres.join(", "));
    }

    let directors: Vec<&str> = movie.director.iter().map(|d| d.name.as_str()).collect();
    if !directors.is_empty() {
        eprintln!("  {}: {}", "Director".bold(), directors.join(", "));
    }

    if !movie.starring.is_empty() {
        eprintln!("  {}", "Starring".bold());
        for role in &movie.starring {
            let actor = role.actor.first().map(|a| a.name.as_str()).unwrap_or("?");
            let character = role.character.first().map(|c| c.name.as_str()).unwrap_or("?");
            eprintln!("    {} {} {}", actor, "as".dimmed(), character.yellow());
        }
    }
}
