use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{severity_color, CAUTION_AMBER, HUD_GREEN, INFO_DIM};
use crate::analysis::ProfileReport;
use crate::domain::Category;

/// Master status panel - run overview
pub struct StatusPanel {
    span_count: usize,
    grand_total_ms: f64,
    spike_count: usize,
    spike_threshold_ms: f64,
    dropped: usize,
    top_resource: Option<(String, f64)>,
    category_counts: Vec<(&'static str, usize)>,
}

impl StatusPanel {
    pub fn new(report: &ProfileReport) -> Self {
        let stats = &report.match_stats;
        let top_resource = report
            .resources
            .first()
            .map(|r| (r.resource.clone(), report.percent_of_total(r.total_ms)));

        Self {
            span_count: stats.matched,
            grand_total_ms: report.grand_total_ms,
            spike_count: report.spike_count(),
            spike_threshold_ms: report.spike_threshold_ms,
            dropped: stats.malformed + stats.orphan_ends + stats.superseded_begins + stats.unterminated,
            top_resource,
            category_counts: Category::REPORTED
                .iter()
                .map(|&c| (c.title(), report.rows(c).len()))
                .collect(),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (status_text, status_color) = if self.spike_count > 0 {
            ("[!] SPIKES", CAUTION_AMBER)
        } else {
            ("[-] NOMINAL", HUD_GREEN)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                status_text,
                Style::new().fg(status_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Spans   ", Style::new().fg(INFO_DIM)),
                Span::styled(self.span_count.to_string(), Style::new().fg(HUD_GREEN)),
            ]),
            Line::from(vec![
                Span::styled("CPU     ", Style::new().fg(INFO_DIM)),
                Span::styled(format!("{:.2} ms", self.grand_total_ms), Style::new().fg(HUD_GREEN)),
            ]),
            Line::from(vec![
                Span::styled("Spikes  ", Style::new().fg(INFO_DIM)),
                Span::styled(
                    format!("{} > {:.1} ms", self.spike_count, self.spike_threshold_ms),
                    Style::new().fg(status_color),
                ),
            ]),
            Line::from(vec![
                Span::styled("Dropped ", Style::new().fg(INFO_DIM)),
                Span::styled(self.dropped.to_string(), Style::new().fg(INFO_DIM)),
            ]),
            Line::from(""),
        ];

        for (title, count) in &self.category_counts {
            lines.push(Line::from(vec![
                Span::styled(format!("{title:<14}"), Style::new().fg(INFO_DIM)),
                Span::styled(count.to_string(), Style::new().fg(HUD_GREEN)),
            ]));
        }

        if let Some((resource, pct)) = &self.top_resource {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Top resource", Style::new().fg(INFO_DIM))));
            lines.push(Line::from(vec![
                Span::styled(
                    resource.clone(),
                    Style::new().fg(severity_color(*pct)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {pct:.1}%"), Style::new().fg(severity_color(*pct))),
            ]));
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("STATUS"));
        f.render_widget(paragraph, area);
    }
}
