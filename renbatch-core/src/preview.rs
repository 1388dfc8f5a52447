use crate::strategy::RenamePair;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::{Color as AnsiColor, Style};
use std::io::{self, IsTerminal};

/// How renames are shown while a plan is previewed or applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preview {
    /// One `old -> new` line per rename, written as each one happens.
    #[default]
    Lines,
    /// A single table once all renames are processed.
    Table,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "table" => Ok(Self::Table),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render a single `old -> new` line (without trailing newline).
pub fn render_line(pair: &RenamePair, use_color: bool) -> String {
    if use_color {
        format!(
            "{} {} {}",
            Style::new().fg(AnsiColor::Red).paint(&pair.old_name),
            Style::new().dimmed().paint("->"),
            Style::new().fg(AnsiColor::Green).paint(&pair.new_name),
        )
    } else {
        pair.to_string()
    }
}

pub fn render_table(pairs: &[RenamePair], dry_run: bool, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(if io::stdout().is_terminal() {
        ContentArrangement::Dynamic
    } else {
        ContentArrangement::Disabled
    });

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Old name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Old name", "New name"]);
    }

    for (index, pair) in pairs.iter().enumerate() {
        let row_number = (index + 1).to_string();
        if use_color {
            table.add_row(vec![
                Cell::new(row_number),
                Cell::new(&pair.old_name).fg(Color::Red),
                Cell::new(&pair.new_name).fg(Color::Green),
            ]);
        } else {
            table.add_row(vec![row_number, pair.old_name.clone(), pair.new_name.clone()]);
        }
    }

    let verb = if dry_run { "Would rename" } else { "Renamed" };
    format!("{table}\n{verb} {} files\n", pairs.len())
}
