// Chart values are scaled to integer microseconds
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::theme::{severity_color, spike_color, CAUTION_AMBER, HUD_GREEN, INFO_DIM};
use crate::analysis::{ProfileReport, SummaryRow};
use crate::display::{truncate_label, MAX_LABEL_CHARS};
use crate::domain::Category;

/// Bar chart of the top rows by average time plus a scrollable detail table
pub struct CategoryView {
    category: Category,
    selected: usize,
}

impl CategoryView {
    pub fn new(category: Category) -> Self {
        Self { category, selected: 0 }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, row_count: usize) {
        if self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    pub fn selected_row<'r>(&self, report: &'r ProfileReport) -> Option<&'r SummaryRow> {
        report.rows(self.category).get(self.selected)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, report: &ProfileReport, top_rows: usize) {
        let rows = report.rows(self.category);
        if rows.is_empty() {
            let empty = Paragraph::new(Line::styled("No matched spans", Style::new().fg(INFO_DIM)))
                .block(Block::default().borders(Borders::ALL).title(self.category.title()));
            f.render_widget(empty, area);
            return;
        }

        let shown = &rows[..rows.len().min(top_rows)];
        let chart_height = u16::try_from(shown.len()).unwrap_or(u16::MAX).saturating_add(2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(chart_height), Constraint::Min(4)])
            .split(area);

        self.render_chart(f, chunks[0], shown);
        self.render_table(f, chunks[1], report, rows);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect, rows: &[SummaryRow]) {
        let bars: Vec<Bar> = rows
            .iter()
            .map(|row| {
                Bar::default()
                    .value((row.avg_ms.max(0.0) * 1_000.0).round() as u64)
                    .label(Line::from(truncate_label(&row.name, MAX_LABEL_CHARS)))
                    .text_value(format!("{:.3} ms", row.avg_ms))
                    .style(Style::new().fg(HUD_GREEN))
                    .value_style(Style::new().fg(ratatui::style::Color::Black).bg(HUD_GREEN))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("TOP {} {} (avg ms)", rows.len(), self.category.title())),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));

        f.render_widget(chart, area);
    }

    fn render_table(&self, f: &mut Frame, area: Rect, report: &ProfileReport, rows: &[SummaryRow]) {
        // Keep the selection visible: borders and header take three lines
        let visible = usize::from(area.height.saturating_sub(3)).max(1);
        let offset = self.selected.saturating_sub(visible - 1);

        let header = Row::new(vec![
            "Name", "Resource", "Avg ms", "Count", "Total ms", "Max ms", "Freq/s", "Spikes", "Share",
        ])
        .style(Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD));

        let body: Vec<Row> = rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, row)| {
                let pct = report.percent_of_total(row.total_ms);
                let style = if idx == self.selected {
                    Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::REVERSED)
                } else {
                    Style::new().fg(severity_color(pct))
                };
                let spikes = Cell::from(row.spike_count.to_string());
                let spikes = if idx == self.selected {
                    spikes
                } else {
                    spikes.style(Style::new().fg(spike_color(row.spike_count)))
                };
                Row::new(vec![
                    Cell::from(truncate_label(&row.name, MAX_LABEL_CHARS)),
                    Cell::from(row.resource.clone()),
                    Cell::from(format!("{:.3}", row.avg_ms)),
                    Cell::from(row.count.to_string()),
                    Cell::from(format!("{:.2}", row.total_ms)),
                    Cell::from(format!("{:.3}", row.max_ms)),
                    Cell::from(format!("{:.1}", row.frequency_per_sec)),
                    spikes,
                    Cell::from(format!("{pct:.1}%")),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(7),
        ];

        let table = Table::new(body, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({} names)", self.category.title(), rows.len())),
        );
        f.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = CategoryView::new(Category::Tick);
        view.scroll_up();
        assert_eq!(view.selected(), 0);

        view.scroll_down(2);
        view.scroll_down(2);
        assert_eq!(view.selected(), 1);

        view.scroll_down(0);
        assert_eq!(view.selected(), 1);
    }
}
