//! # Terminal User Interface (TUI)
//!
//! Interactive terminal UI using `ratatui` for browsing a finished report.
//!
//! ## Tabs
//!
//! - **Tick Handlers**, **Ref Calls**, **Custom Events** - bar chart of the
//!   top rows by average time above a scrollable detail table
//! - **Resources** - resources ranked by total CPU time with their share
//!
//! A status panel on the left summarizes the whole run.
//!
//! ## Sub-Modules
//!
//! - `category` - Per-category chart and table
//! - `resources` - Resource ranking
//! - `status` - Summary status panel
//! - `theme` - Color scheme

// TUI rendering uses long functions for layout clarity
#![allow(clippy::too_many_lines)]

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

mod category;
mod resources;
mod status;
mod theme;

use category::CategoryView;
use resources::ResourcesView;
use status::StatusPanel;
use theme::{BACKGROUND, CAUTION_AMBER, HUD_GREEN, INFO_DIM};

use crate::analysis::ProfileReport;
use crate::domain::{Category, TuiError};

// =============================================================================
// STYLE CONSTANTS
// =============================================================================

const STYLE_HEADING: Style = Style::new().fg(HUD_GREEN).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(INFO_DIM);
const STYLE_KEY: Style = Style::new().fg(CAUTION_AMBER);
const STYLE_TEXT: Style = Style::new().fg(ratatui::style::Color::White);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// =============================================================================
// TABS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Category(usize),
    Resources,
}

impl Tab {
    const COUNT: usize = Category::REPORTED.len() + 1;

    fn index(self) -> usize {
        match self {
            Tab::Category(idx) => idx,
            Tab::Resources => Category::REPORTED.len(),
        }
    }

    fn from_index(idx: usize) -> Self {
        let idx = idx % Self::COUNT;
        if idx < Category::REPORTED.len() {
            Tab::Category(idx)
        } else {
            Tab::Resources
        }
    }

    fn titles() -> Vec<&'static str> {
        Category::REPORTED.iter().map(|c| c.title()).chain(["Resources"]).collect()
    }
}

// =============================================================================
// APP
// =============================================================================

/// TUI application over a finished [`ProfileReport`].
///
/// Use `App::new()` to create and `App::run()` to start.
pub struct App {
    report: ProfileReport,
    top_rows: usize,

    status_panel: StatusPanel,
    category_views: Vec<CategoryView>,
    resources_view: ResourcesView,

    tab: Tab,
    show_help: bool,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(report: ProfileReport, top_rows: usize) -> Self {
        let status_panel = StatusPanel::new(&report);
        Self {
            category_views: Category::REPORTED.into_iter().map(CategoryView::new).collect(),
            resources_view: ResourcesView::new(),
            status_panel,
            report,
            top_rows: top_rows.max(1),
            tab: Tab::Category(0),
            show_help: false,
            should_quit: false,
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return;
        }

        match key {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::Right => self.tab = Tab::from_index(self.tab.index() + 1),
            KeyCode::BackTab | KeyCode::Left => {
                self.tab = Tab::from_index(self.tab.index() + Tab::COUNT - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c.to_digit(10).map_or(0, |d| d as usize) - 1;
                if idx < Tab::COUNT {
                    self.tab = Tab::from_index(idx);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => match self.tab {
                Tab::Category(idx) => self.category_views[idx].scroll_up(),
                Tab::Resources => self.resources_view.scroll_up(),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.tab {
                Tab::Category(idx) => {
                    let view = &mut self.category_views[idx];
                    let len = self.report.rows(view.category()).len();
                    view.scroll_down(len);
                }
                Tab::Resources => self.resources_view.scroll_down(self.report.resources.len()),
            },
            _ => {}
        }
    }

    /// Draw one frame
    fn draw(&self, f: &mut Frame) {
        f.render_widget(Block::default().style(Style::new().bg(BACKGROUND)), f.area());

        let outer_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Main panels
                Constraint::Length(1), // Key hints
            ])
            .split(f.area());

        let header = Paragraph::new(Line::from(vec![
            Span::styled("TICKSCOPE", STYLE_HEADING),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} spans", self.report.match_stats.matched), Style::new().fg(HUD_GREEN)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{:.2} ms CPU", self.report.grand_total_ms), Style::new().fg(HUD_GREEN)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} resources", self.report.resources.len()), Style::new().fg(HUD_GREEN)),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(HUD_GREEN)));
        f.render_widget(header, outer_layout[0]);

        let tabs = Tabs::new(Tab::titles())
            .select(self.tab.index())
            .style(STYLE_DIM)
            .highlight_style(STYLE_LABEL.add_modifier(Modifier::REVERSED))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(tabs, outer_layout[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(outer_layout[2]);

        self.status_panel.render(f, columns[0]);
        match self.tab {
            Tab::Category(idx) => {
                self.category_views[idx].render(f, columns[1], &self.report, self.top_rows);
            }
            Tab::Resources => self.resources_view.render(f, columns[1], &self.report),
        }

        let hints = Paragraph::new(Line::from(vec![
            Span::styled(" Tab/←→", STYLE_KEY),
            Span::styled(" Switch  ", STYLE_TEXT),
            Span::styled("↑↓", STYLE_KEY),
            Span::styled(" Select  ", STYLE_TEXT),
            Span::styled("?", STYLE_KEY),
            Span::styled(" Help  ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]));
        f.render_widget(hints, outer_layout[3]);

        if self.show_help {
            render_help_overlay(f, outer_layout[2]);
        }
    }

    /// Drive the draw/input loop on any backend until the user quits.
    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), TuiError> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns an error if terminal setup or rendering fails
    pub fn run(mut self) -> Result<(), TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

// =============================================================================
// OVERLAYS
// =============================================================================

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 70, 20);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled(
            "  Begin/end spans from the server profiler, grouped by name and owning resource.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  How to Read It", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Tick Handlers  ", STYLE_LABEL),
            Span::styled("Per-frame script work. High averages stall every tick.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Ref Calls      ", STYLE_LABEL),
            Span::styled("Calls across resource boundaries.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Custom Events  ", STYLE_LABEL),
            Span::styled("Event handlers. Watch the spike column.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Resources      ", STYLE_LABEL),
            Span::styled("Total CPU time per resource across all categories.", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Tab/←→ 1-4", STYLE_KEY),
            Span::styled(" Switch tab   ", STYLE_TEXT),
            Span::styled("↑↓ j/k", STYLE_KEY),
            Span::styled(" Select   ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(ratatui::style::Color::Black).fg(HUD_GREEN)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
