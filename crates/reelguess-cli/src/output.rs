use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use reelguess_index::StoreStats;
use reelguess_runtime::{
    GridPage, GuessOutcome, PersonCreditsView, PersonDetail, TitleCredits, TitleDetail,
};
use reelguess_types::{Genre, GuessStatus};
use serde::Serialize;

/// Writes command results to stdout, as pretty JSON or as plain text.
pub struct Printer {
    format: OutputFormat,
    color: bool,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        let color = format == OutputFormat::Plain
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        Self { format, color }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// JSON of `value`, or whatever `plain` prints.
    pub fn emit<T: Serialize>(&self, value: &T, plain: impl FnOnce(&Self)) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            plain(self);
        }
        Ok(())
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn status(&self, status: GuessStatus) -> String {
        let label = format!("{:<8}", status.as_str());
        if !self.color {
            return label;
        }
        match status {
            GuessStatus::Hidden => label.dimmed().to_string(),
            GuessStatus::Revealed => label.yellow().to_string(),
            GuessStatus::Guessed => label.green().to_string(),
        }
    }
}

fn marks(favorite: bool, watchlist: bool) -> String {
    let mut marks = Vec::new();
    if favorite {
        marks.push("[fav]");
    }
    if watchlist {
        marks.push("[watch]");
    }
    marks.join(" ")
}

pub fn genres(printer: &Printer, genres: &[Genre]) {
    if genres.is_empty() {
        println!("{}", printer.muted("No genres"));
        return;
    }
    for genre in genres {
        println!("{:>6}  {}", genre.id, genre.name);
    }
}

pub fn grid(printer: &Printer, title: &str, page: &GridPage) {
    println!("{}", printer.heading(title));
    if page.items.is_empty() {
        println!("{}", printer.muted("Nothing here yet"));
        return;
    }
    for item in &page.items {
        let answer = item.title.as_deref().unwrap_or("?");
        let marks = marks(item.favorite, item.watchlist);
        println!(
            "{:<16} {} {} {}",
            item.key.to_string(),
            printer.status(item.status),
            answer,
            marks
        );
    }
    if page.total_pages > 1 {
        println!(
            "{}",
            printer.muted(&format!("page {} of {}", page.page, page.total_pages))
        );
    }
}

pub fn title(printer: &Printer, detail: &TitleDetail) {
    println!("{}  {}", printer.heading(&detail.title), printer.status(detail.status));
    if let Some(year) = detail.year {
        println!("Year:     {}", year);
    }
    println!("Rating:   {}", detail.rating);
    if !detail.genres.is_empty() {
        println!("Genres:   {}", detail.genres);
    }
    if let Some(hint) = &detail.hint {
        println!("Hint:     {}", hint);
    }
    let marks = marks(detail.favorite, detail.watchlist);
    if !marks.is_empty() {
        println!("Lists:    {}", marks);
    }
    if !detail.overview.is_empty() {
        println!();
        println!("{}", detail.overview);
    }
}

pub fn person(printer: &Printer, detail: &PersonDetail) {
    println!("{}  {}", printer.heading(&detail.name), printer.status(detail.status));
    if let Some(department) = &detail.department {
        println!("Known for: {}", department);
    }
    if let Some(hint) = &detail.hint {
        println!("Hint:      {}", hint);
    }
    let marks = marks(detail.favorite, detail.watchlist);
    if !marks.is_empty() {
        println!("Lists:     {}", marks);
    }
    if !detail.known_for.is_empty() {
        println!();
        for title in &detail.known_for {
            println!("  - {}", title);
        }
    }
}

pub fn guess(printer: &Printer, outcome: &GuessOutcome) {
    match (&outcome.answer, outcome.correct) {
        (Some(answer), true) => println!("Correct! It's {}.", printer.heading(answer)),
        (Some(answer), false) => println!("Not quite. The answer was {}.", answer),
        (None, _) => println!("Not quite. Try again."),
    }
}

pub fn title_credits(printer: &Printer, credits: &TitleCredits) {
    println!("{}", printer.heading("Cast"));
    for member in &credits.cast {
        println!("  {:<28} {}", member.name, printer.muted(&member.character));
    }
    for (department, crew) in &credits.crew {
        println!("{}", printer.heading(department));
        for member in crew {
            println!("  {:<28} {}", member.name, printer.muted(&member.job));
        }
    }
}

pub fn person_credits(printer: &Printer, credits: &PersonCreditsView) {
    if !credits.acting.is_empty() {
        println!("{}", printer.heading("Acting"));
        for credit in &credits.acting {
            let year = credit
                .title
                .release_year()
                .map(|year| year.to_string())
                .unwrap_or_else(|| "----".to_string());
            println!(
                "  {} {:<32} {}",
                year,
                credit.title.display_title(),
                printer.muted(&credit.character)
            );
        }
    }
    for (section, credits) in credits.crew.sections() {
        println!("{}", printer.heading(section));
        for credit in credits {
            println!("  {}", credit.title.display_title());
        }
    }
}

pub fn stats(printer: &Printer, stats: &StoreStats) {
    println!(
        "{}",
        printer.heading(&format!(
            "{:<8} {:>8} {:>8} {:>8} {:>6} {:>10} {:>10}",
            "kind", "tracked", "revealed", "guessed", "hints", "favorites", "watchlist"
        ))
    );
    let rows = stats
        .by_kind
        .iter()
        .map(|(kind, s)| (kind.to_string(), *s))
        .chain(std::iter::once(("total".to_string(), stats.total())));
    for (label, s) in rows {
        println!(
            "{:<8} {:>8} {:>8} {:>8} {:>6} {:>10} {:>10}",
            label, s.tracked, s.revealed, s.guessed, s.hints, s.favorites, s.watchlist
        );
    }
}
