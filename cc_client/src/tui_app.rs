//! Terminal dashboard for watching a tournament.
//!
//! Shows the fetched roster, the selected field as a grid, and a history
//! pane fed by tournament events. Rounds are played on demand.

use anyhow::Result;
use chrono::{DateTime, Utc};
use creature_cup::{
    Contestant, ContestantId, Draw, EventSink, Roster, RosterTable, Tournament, TournamentEngine,
    TournamentEvent, TournamentState,
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    layout::{Constraint, Layout, Margin, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span, Text},
    widgets::{
        Block, Cell, List, ListDirection, ListItem, ListState, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, TableState,
    },
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Columns needed to lay `count` contestants out in a square grid
#[must_use]
pub fn grid_width(count: usize) -> usize {
    let root = count.isqrt();
    if root * root == count { root } else { root + 1 }
}

#[derive(Clone, Copy)]
enum RecordKind {
    Alert,
    Error,
    Round,
    Match,
    Champion,
}

/// A timestamped history line with a label to help direct attention.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Alert => "ALERT".light_magenta(),
            RecordKind::Error => "ERROR".light_red(),
            RecordKind::Round => "ROUND".light_blue(),
            RecordKind::Match => "MATCH".light_yellow(),
            RecordKind::Champion => "CHAMP".light_green(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// Scrollable history, newest record first.
struct History {
    records: Vec<Record>,
    list_state: ListState,
    scroll_state: ScrollbarState,
    verbose: bool,
}

impl History {
    fn new(verbose: bool) -> Self {
        Self {
            records: Vec::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
            verbose,
        }
    }

    fn push(&mut self, kind: RecordKind, content: String) {
        self.records.insert(0, Record::new(kind, content));
        self.records.truncate(MAX_LOG_RECORDS);
        self.scroll_state =
            std::mem::take(&mut self.scroll_state).content_length(self.records.len());
    }
}

impl EventSink for History {
    fn record(&mut self, event: TournamentEvent) {
        let kind = match &event {
            TournamentEvent::RoundStarted { .. } => RecordKind::Round,
            TournamentEvent::MatchResolved(_) | TournamentEvent::Bye { .. } => RecordKind::Match,
            TournamentEvent::ChampionDecided { .. } => RecordKind::Champion,
        };

        if self.verbose
            && let TournamentEvent::MatchResolved(record) = &event
        {
            for line in record.strike_log() {
                self.push(RecordKind::Match, line);
            }
        }
        self.push(kind, event.to_string());
    }
}

/// Dashboard state: roster, field grid and tournament history.
pub struct Dashboard {
    roster_table: RosterTable,
    roster_ids: Vec<ContestantId>,
    roster_state: TableState,
    entrants: Vec<Arc<Contestant>>,
    tournament: Tournament,
    draw: Draw,
    history: History,
}

impl Dashboard {
    /// Create a dashboard over `field`, drawn from `roster`
    ///
    /// # Errors
    ///
    /// Returns an error if the tournament cannot start with this field.
    pub fn new(
        roster: &Roster,
        field: Vec<Arc<Contestant>>,
        engine: TournamentEngine,
        draw: Draw,
        verbose: bool,
    ) -> Result<Self> {
        let tournament = engine.start(field.clone())?;

        let mut history = History::new(verbose);
        history.push(
            RecordKind::Alert,
            format!(
                "{} of {} creatures entered, rule: {}",
                field.len(),
                roster.len(),
                engine.config().rule
            ),
        );
        if let TournamentState::ChampionDecided { champion } = tournament.state() {
            history.record(TournamentEvent::ChampionDecided {
                champion: champion.clone(),
                rounds: 0,
            });
        }

        Ok(Self {
            roster_table: RosterTable::from_contestants(roster.contestants()),
            roster_ids: roster.contestants().iter().map(|c| c.id).collect(),
            roster_state: TableState::default(),
            entrants: field,
            tournament,
            draw,
            history,
        })
    }

    #[must_use]
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Play the next round, recording any error in the history
    fn next_round(&mut self) {
        if self.tournament.state().is_decided() {
            self.history
                .push(RecordKind::Alert, "The tournament is over".to_string());
            return;
        }

        if let Err(e) = self.tournament.step(&mut self.draw, &mut self.history) {
            self.history.push(RecordKind::Error, e.to_string());
        }
    }

    /// Play every remaining round
    fn run_to_end(&mut self) {
        while !self.tournament.state().is_decided() {
            if let Err(e) = self.tournament.step(&mut self.draw, &mut self.history) {
                self.history.push(RecordKind::Error, e.to_string());
                break;
            }
        }
    }

    /// Apply a key press; returns `false` when the dashboard should close
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Char('n') => self.next_round(),
            KeyCode::Char('r') => self.run_to_end(),
            KeyCode::Down => self.roster_state.select_next(),
            KeyCode::Up => self.roster_state.select_previous(),
            KeyCode::PageDown => {
                self.history.list_state.select_previous();
                self.history.scroll_state.prev();
            }
            KeyCode::PageUp => {
                self.history.list_state.select_next();
                self.history.scroll_state.next();
            }
            _ => {}
        }
        true
    }

    /// Render the roster table
    fn draw_roster(&mut self, frame: &mut Frame, area: Rect) {
        let entered: HashSet<ContestantId> = self.entrants.iter().map(|c| c.id).collect();

        let rows = self
            .roster_table
            .rows
            .iter()
            .zip(&self.roster_ids)
            .map(|(cells, id)| {
                let row = Row::new(cells.iter().map(|cell| Cell::from(cell.clone())));
                if entered.contains(id) {
                    row.bold().white()
                } else {
                    row.dim()
                }
            });

        let widths = self
            .roster_table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, _)| match idx {
                0 => Constraint::Length(5),
                1 | 2 => Constraint::Fill(2),
                3 => Constraint::Fill(3),
                _ => Constraint::Fill(1),
            });

        let table = Table::new(rows, widths)
            .header(Row::new(self.roster_table.columns.clone()).bold().underlined())
            .row_highlight_style(Style::default().reversed())
            .block(Block::bordered().title(format!(" roster ({})  ", self.roster_table.len())));
        frame.render_stateful_widget(table, area, &mut self.roster_state);
    }

    /// Render the field as a `ceil(sqrt(n))`-wide grid
    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let width = grid_width(self.entrants.len()).max(1);
        let alive: HashSet<ContestantId> = self.tournament.field().iter().map(|c| c.id).collect();
        let champion = match self.tournament.state() {
            TournamentState::ChampionDecided { champion } => Some(champion.id),
            TournamentState::RoundInProgress { .. } => None,
        };

        let rows = self.entrants.chunks(width).map(|chunk| {
            Row::new(chunk.iter().map(|contestant| {
                let text = Text::from(vec![
                    Line::from(contestant.name.clone()),
                    Line::from(format!("ID: {}", contestant.id)),
                    Line::from(contestant.image_url.clone().unwrap_or_else(|| "-".to_string())),
                ]);
                let style = if champion == Some(contestant.id) {
                    Style::default().bold().light_green()
                } else if alive.contains(&contestant.id) {
                    Style::default()
                } else {
                    Style::default().dim().crossed_out()
                };
                Cell::new(text).style(style)
            }))
            .height(4)
        });

        let grid = Table::new(rows, vec![Constraint::Fill(1); width]).block(
            Block::bordered().title(format!(" field ({} left)  ", self.tournament.field().len())),
        );
        frame.render_widget(grid, area);
    }

    /// Render the history window with scrollbar
    fn draw_history(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self.history.records.iter().cloned().map(Into::into).collect();
        let list = List::new(items)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" history  "));
        frame.render_stateful_widget(list, area, &mut self.history.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.history.scroll_state,
        );
    }

    /// Render the status/help bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let status = match self.tournament.state() {
            TournamentState::RoundInProgress { round } => format!("● Round {round}").yellow(),
            TournamentState::ChampionDecided { champion } => {
                format!("● Champion: {}", champion.name).green()
            }
        };

        let help_message = vec![
            status,
            " | press ".into(),
            "n".bold().white(),
            " for the next round, ".into(),
            "r".bold().white(),
            " to run to the end, or ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Main draw function
    pub fn draw(&mut self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(1)]).areas(frame.area());
        let [roster_area, right_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(main_area);
        let [grid_area, history_area] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(right_area);

        self.draw_roster(frame, roster_area);
        self.draw_grid(frame, grid_area);
        self.draw_history(frame, history_area);
        self.draw_help_bar(frame, help_area);
    }

    /// Run the dashboard until the user exits
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && !self.handle_key(key.code)
            {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_cup::tournament::{HpDepletion, ScoreComparison};
    use creature_cup::{Stat, Stats, TournamentConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn roster(n: u32) -> Roster {
        Roster::new(
            (1..=n)
                .map(|id| {
                    let stats = Stats::new()
                        .with(Stat::Hp, 30 + id as i64)
                        .with(Stat::Attack, 10 + id as i64)
                        .with(Stat::Defense, 40)
                        .with(Stat::SpecialAttack, 40)
                        .with(Stat::SpecialDefense, 40)
                        .with(Stat::Speed, 40);
                    Contestant::new(id, format!("mon-{id}"), stats)
                        .unwrap()
                        .with_types(vec!["normal".to_string()])
                })
                .collect(),
        )
        .unwrap()
    }

    fn dashboard(n: u32, entrants: usize) -> Dashboard {
        let roster = roster(n);
        let mut draw = Draw::seeded(11);
        let field = roster.select(entrants, &mut draw).unwrap();
        let engine = TournamentEngine::new(TournamentConfig::new(HpDepletion.into()));
        Dashboard::new(&roster, field, engine, draw, false).unwrap()
    }

    fn render(dashboard: &mut Dashboard) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|frame| dashboard.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_grid_width() {
        assert_eq!(grid_width(0), 0);
        assert_eq!(grid_width(1), 1);
        assert_eq!(grid_width(4), 2);
        assert_eq!(grid_width(5), 3);
        assert_eq!(grid_width(16), 4);
        assert_eq!(grid_width(17), 5);
    }

    #[test]
    fn test_next_round_steps_once() {
        let mut dashboard = dashboard(12, 8);
        assert!(dashboard.handle_key(KeyCode::Char('n')));

        assert_eq!(dashboard.tournament().rounds().len(), 1);
        assert_eq!(dashboard.tournament().field().len(), 4);
    }

    #[test]
    fn test_run_key_finishes_tournament() {
        let mut dashboard = dashboard(12, 8);
        dashboard.handle_key(KeyCode::Char('r'));

        assert!(dashboard.tournament().state().is_decided());
        assert_eq!(dashboard.tournament().rounds().len(), 3);

        // A further step only adds an alert
        let before = dashboard.history.records.len();
        dashboard.handle_key(KeyCode::Char('n'));
        assert_eq!(dashboard.history.records.len(), before + 1);
        assert_eq!(dashboard.tournament().rounds().len(), 3);
    }

    #[test]
    fn test_quit_keys() {
        let mut dashboard = dashboard(4, 2);
        assert!(!dashboard.handle_key(KeyCode::Esc));
        assert!(!dashboard.handle_key(KeyCode::Char('q')));
        assert!(dashboard.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_history_records_events() {
        let mut dashboard = dashboard(4, 4);
        dashboard.handle_key(KeyCode::Char('r'));

        // Intro, two rounds of (header + matches), champion
        let contents: Vec<_> = dashboard
            .history
            .records
            .iter()
            .map(|r| r.content.as_str())
            .collect();
        assert_eq!(contents.len(), 1 + (1 + 2) + (1 + 1) + 1);
        assert!(contents[0].contains("is the champion after 2 round(s)!"));
        assert!(contents.last().unwrap().starts_with("4 of 4 creatures entered"));
    }

    #[test]
    fn test_verbose_history_includes_strikes() {
        let roster = roster(2);
        let field = roster.contestants().to_vec();
        let engine = TournamentEngine::new(TournamentConfig::new(HpDepletion.into()));
        let mut dashboard = Dashboard::new(&roster, field, engine, Draw::seeded(0), true).unwrap();
        dashboard.handle_key(KeyCode::Char('n'));

        assert!(
            dashboard
                .history
                .records
                .iter()
                .any(|r| r.content.contains(" attacks "))
        );
    }

    #[test]
    fn test_single_entrant_champion_on_open() {
        let dashboard = dashboard(3, 1);
        assert!(dashboard.tournament().state().is_decided());
        assert!(dashboard.history.records[0].content.contains("after 0 round(s)"));
    }

    #[test]
    fn test_render_shows_panes() {
        let roster = roster(6);
        let field = roster.contestants()[..4].to_vec();
        let engine = TournamentEngine::new(TournamentConfig::new(ScoreComparison.into()));
        let mut dashboard = Dashboard::new(&roster, field, engine, Draw::seeded(3), false).unwrap();

        let screen = render(&mut dashboard);
        assert!(screen.contains("roster (6)"));
        assert!(screen.contains("field (4 left)"));
        assert!(screen.contains("history"));
        assert!(screen.contains("mon-1"));
        assert!(screen.contains("Round 1"));

        dashboard.handle_key(KeyCode::Char('r'));
        let screen = render(&mut dashboard);
        assert!(screen.contains("field (1 left)"));
        assert!(screen.contains("Champion: "));
    }
}
