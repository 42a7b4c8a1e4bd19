//! Palette shared by command output, tables and clap help.

use anstyle::{AnsiColor, Color, Effects, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Success messages and passing checks.
pub(crate) const SUCCESS: Style = fg(AnsiColor::Green);

/// Errors and failing checks.
pub(crate) const ERROR: Style = fg(AnsiColor::Red);

/// Warnings and checks that only warn.
pub(crate) const WARNING: Style = fg(AnsiColor::Yellow);

/// Section headers, table titles and column headings.
pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

/// Label names in "Label: value" pairs and the first table column.
pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

pub(crate) const HINT: Style = Style::new().effects(Effects::DIMMED);

/// Flags, subcommands and placeholders in help text.
const ACCENT: Style = fg(AnsiColor::Cyan);

/// Style for a table cell holding a check verdict.
pub(crate) fn verdict(cell: &str) -> Style {
    match cell {
        "OK" => SUCCESS,
        "WARN" => WARNING,
        "FAIL" => ERROR,
        _ => Style::new(),
    }
}

/// clap help styling built from the same palette.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let heading = SUCCESS.effects(Effects::BOLD);
    clap::builder::Styles::styled()
        .header(heading)
        .usage(heading)
        .literal(ACCENT)
        .placeholder(ACCENT)
        .error(ERROR.effects(Effects::BOLD))
        .valid(SUCCESS)
        .invalid(WARNING)
}
