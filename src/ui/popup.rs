use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{Alert, AlertChoice};

use super::truncate;

/// Render the fetch-failure alert with its two buttons.
pub fn render_alert(frame: &mut Frame, alert: &Alert) {
    let area = centered_rect(50, 8, frame.area());
    frame.render_widget(Clear, area);

    let button = |label: &'static str, choice: AlertChoice| {
        let style = if alert.selected == choice {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(label, style)
    };

    let detail_width = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(alert.message.as_str())),
        Line::from(Span::styled(
            truncate(&alert.detail, detail_width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            button("[ Cancel ]", AlertChoice::Cancel),
            Span::raw("   "),
            button("[ Retry ]", AlertChoice::Retry),
        ]),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(
                    format!(" {} ", alert.title),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Center);

    frame.render_widget(popup, area);
}

/// Center a `width` x `height` rect inside `outer`, shrinking to fit.
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let popup_width = width.min(outer.width);
    let popup_height = height.min(outer.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((outer.height.saturating_sub(popup_height)) / 2),
            Constraint::Length(popup_height),
            Constraint::Min(0),
        ])
        .split(outer);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((outer.width.saturating_sub(popup_width)) / 2),
            Constraint::Length(popup_width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
