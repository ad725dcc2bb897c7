mod popup;
mod product_detail;
mod product_list;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::nav::Route;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.nav.current() {
        Route::ProductList => product_list::render(frame, app, chunks[1]),
        Route::ProductDetail { .. } => product_detail::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if let Some(alert) = &app.alert {
        popup::render_alert(frame, alert);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("shelf - {}", app.nav.current().title());

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let loading = match app.nav.current() {
        Route::ProductList => app.products.state().is_loading(),
        Route::ProductDetail { .. } => app.product.state().is_loading(),
    };

    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if let Some(message) = &app.message {
        Line::from(vec![Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )])
    } else if loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = if app.alert.is_some() {
            "←/→: choose | Enter: confirm | r: retry | Esc: cancel"
        } else {
            match app.nav.current() {
                Route::ProductList => {
                    "j/k/g/G: nav | Enter: open | o: thumbnail | y: yank url | r: refresh | q: quit"
                }
                Route::ProductDetail { .. } => {
                    "h/l: images | j/k: scroll | o: open image | y: yank url | r: reload | q: back"
                }
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Full-area spinner shown while a screen's fetch is in flight.
fn render_spinner(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);

    let glyph = SPINNER[app.spinner_frame % SPINNER.len()];
    let spinner = Paragraph::new(Line::from(vec![
        Span::styled(glyph, Style::default().fg(Color::Yellow)),
        Span::raw(" Loading..."),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(spinner, rows[1]);
}

/// Cut `s` to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let head: String = s.chars().take(max - 3).collect();
    format!("{}...", head)
}

/// Greedy word wrap. Newlines in `text` start a new paragraph.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let line_len = line.chars().count();
            if !line.is_empty() && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}
