//! # Dashboard Page
//!
//! Static stat cards, a device breakdown chart, and a recent-activity feed.

use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};

use crate::core::content::{DEVICE_BREAKDOWN, STATS, change_icon, chart_total, percentage};
use crate::core::lifecycle::{LifecycleError, LifecycleState};
use crate::tui::component::{Component, Lifecycle};
use crate::tui::components::Page;

const RECENT_ACTIVITY: &[(&str, &str)] = &[
    ("🆕", "New user registered (2 minutes ago)"),
    ("💳", "Payment received (15 minutes ago)"),
    ("📦", "Order shipped (1 hour ago)"),
];

#[derive(Default)]
pub struct DashboardPage {
    lifecycle: LifecycleState,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, STATS.len() as u32); STATS.len()])
            .split(area);

        for (stat, column) in STATS.iter().zip(columns.iter()) {
            let change_color = if stat.change >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    stat.value,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} {:+.1}%", change_icon(stat.change), stat.change),
                    Style::default().fg(change_color),
                )),
            ])
            .block(Block::bordered().title(format!(" {} {} ", stat.icon, stat.title)));
            frame.render_widget(card, *column);
        }
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(" Devices ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let total = chart_total(DEVICE_BREAKDOWN);
        let rows = Layout::vertical(vec![Constraint::Length(1); DEVICE_BREAKDOWN.len()])
            .split(inner);
        for (slice, row) in DEVICE_BREAKDOWN.iter().zip(rows.iter()) {
            let percent = percentage(slice.value, total).min(100) as u16;
            let gauge = Gauge::default()
                .percent(percent)
                .label(format!("{} {}%", slice.label, percent))
                .gauge_style(Style::default().fg(Color::Cyan));
            frame.render_widget(gauge, *row);
        }
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = RECENT_ACTIVITY
            .iter()
            .map(|(icon, text)| Line::from(format!("{} {}", icon, text)))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(" Recent Activity ")),
            area,
        );
    }
}

impl Lifecycle for DashboardPage {
    fn start(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.activate()?;
        info!("Dashboard initialized");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.deactivate()
    }
}

impl Page for DashboardPage {
    fn route(&self) -> &'static str {
        "/dashboard"
    }
}

impl Component for DashboardPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, stats_area, lower_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .areas(area);
        let [chart_area, activity_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(lower_area);

        frame.render_widget(
            Span::styled(
                "Analytics Dashboard",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            header_area,
        );
        self.render_stats(frame, stats_area);
        self.render_chart(frame, chart_area);
        self.render_activity(frame, activity_area);
    }
}
