//! Plain-text tournament output.

use creature_cup::{EventSink, RosterTable, TournamentEvent};

const RULE_WIDTH: usize = 80;

/// Lines printed for one event
///
/// With `verbose`, HP-depletion matches are followed by their strike log.
pub fn render_event(event: &TournamentEvent, verbose: bool) -> Vec<String> {
    match event {
        TournamentEvent::RoundStarted { .. } => vec![String::new(), event.to_string()],
        TournamentEvent::MatchResolved(record) if verbose => {
            let mut lines = vec![event.to_string()];
            lines.extend(record.strike_log().into_iter().map(|line| format!("    {line}")));
            lines
        }
        TournamentEvent::ChampionDecided { .. } => vec![
            String::new(),
            "═".repeat(RULE_WIDTH),
            event.to_string(),
            "═".repeat(RULE_WIDTH),
        ],
        _ => vec![event.to_string()],
    }
}

/// Roster as padded text columns
pub fn render_roster(table: &RosterTable) -> Vec<String> {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        "═".repeat(RULE_WIDTH),
        format!("ROSTER ({} creatures)", table.len()),
        "═".repeat(RULE_WIDTH),
        format_row(&table.columns),
        "─".repeat(RULE_WIDTH),
    ];
    lines.extend(table.rows.iter().map(|row| format_row(row)));
    lines
}

/// Prints tournament events to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_roster(&self, table: &RosterTable) {
        for line in render_roster(table) {
            println!("{line}");
        }
    }
}

impl EventSink for ConsoleReporter {
    fn record(&mut self, event: TournamentEvent) {
        for line in render_event(&event, self.verbose) {
            println!("{line}");
        }
    }
}
