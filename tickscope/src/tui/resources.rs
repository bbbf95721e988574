use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{severity_color, CAUTION_AMBER, INFO_DIM};
use crate::analysis::ProfileReport;
use crate::display::{text_bar, truncate_label};

const NAME_WIDTH: usize = 28;
const GAUGE_WIDTH: usize = 20;

/// Resources ranked by total CPU time with their share of the grand total
pub struct ResourcesView {
    selected: usize,
}

impl ResourcesView {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, resource_count: usize) {
        if self.selected + 1 < resource_count {
            self.selected += 1;
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, report: &ProfileReport) {
        let visible = usize::from(area.height.saturating_sub(2)).max(1);
        let offset = self.selected.saturating_sub(visible - 1);

        let mut lines = Vec::with_capacity(visible);
        if report.resources.is_empty() {
            lines.push(Line::styled("No matched spans", Style::new().fg(INFO_DIM)));
        }

        for (idx, resource) in report.resources.iter().enumerate().skip(offset).take(visible) {
            let pct = report.percent_of_total(resource.total_ms);
            let color = severity_color(pct);
            let name_style = if idx == self.selected {
                Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::REVERSED)
            } else {
                Style::new().fg(color).add_modifier(Modifier::BOLD)
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{:>3}. ", idx + 1), Style::new().fg(INFO_DIM)),
                Span::styled(
                    format!("{:<NAME_WIDTH$}", truncate_label(&resource.resource, NAME_WIDTH - 3)),
                    name_style,
                ),
                Span::styled(text_bar(pct, 100.0, GAUGE_WIDTH), Style::new().fg(color)),
                Span::styled(format!(" {pct:>5.1}%"), Style::new().fg(color)),
                Span::styled(
                    format!("  {:.2} ms / {} spans", resource.total_ms, resource.count),
                    Style::new().fg(INFO_DIM),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("RESOURCES BY TOTAL CPU TIME ({})", report.resources.len())),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = ResourcesView::new();
        view.scroll_down(3);
        view.scroll_down(3);
        view.scroll_down(3);
        assert_eq!(view.selected(), 2);
        view.scroll_up();
        assert_eq!(view.selected(), 1);
    }
}
