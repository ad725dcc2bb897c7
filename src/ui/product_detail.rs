use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::fetch::FetchState;
use crate::types::{format_price, ProductDetail, StockStatus};

use super::{render_spinner, truncate, wrap_text};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let product = match app.product.state() {
        FetchState::Loading => {
            let title = match app.product.params() {
                Some(id) => format!("Product #{}", id),
                None => "Product".to_string(),
            };
            render_spinner(frame, app, area, &title);
            return;
        }
        FetchState::Loaded(product) => product,
        FetchState::Idle | FetchState::Failed(_) => {
            frame.render_widget(Block::default().borders(Borders::ALL).title("Product"), area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(frame, product, chunks[0]);
    render_carousel(frame, app, product, chunks[1]);
    render_pricing(frame, product, chunks[2]);
    render_description(frame, app, product, chunks[3]);
}

fn render_header(frame: &mut Frame, product: &ProductDetail, area: Rect) {
    let heading = match &product.brand {
        Some(brand) => format!("{} - {}", brand, product.category),
        None => product.category.clone(),
    };

    let header = Paragraph::new(Line::from(Span::styled(
        heading.to_uppercase(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("#{}", product.id)),
    );

    frame.render_widget(header, area);
}

fn render_carousel(frame: &mut Frame, app: &App, product: &ProductDetail, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Images");
    let width = area.width.saturating_sub(2) as usize;

    let Some(index) = app.carousel.index() else {
        let empty = Paragraph::new("No images")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let url = product.images.get(index).map(String::as_str).unwrap_or("");
    let dots: Vec<Span> = (0..app.carousel.len())
        .map(|i| {
            if i == index {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Image {}/{}", index + 1, app.carousel.len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(truncate(url, width))),
        Line::from(""),
        Line::from(dots),
    ];

    let slide = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(slide, area);
}

fn render_pricing(frame: &mut Frame, product: &ProductDetail, area: Rect) {
    let stock = product.stock_status();
    let stock_color = match stock {
        StockStatus::InStock => Color::Green,
        StockStatus::OutOfStock => Color::Red,
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                product.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} ", product.rating),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("★", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("-{}%  ", product.discount_percentage),
                Style::default().fg(Color::Red),
            ),
            Span::styled(
                format_price(product.discounted_price()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("M.R.P.: $", Style::default().fg(Color::Gray)),
            Span::styled(
                product.price.to_string(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
        ]),
        Line::from(Span::styled(
            stock.to_string(),
            Style::default()
                .fg(stock_color)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let pricing = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(pricing, area);
}

fn render_description(frame: &mut Frame, app: &App, product: &ProductDetail, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines = wrap_text(&product.description, inner_width);

    // Clamp scroll offset to content bounds
    let max_scroll = lines.len().saturating_sub(inner_height);
    let scroll_offset = app.scroll_offset.min(max_scroll);
    app.scroll_limit.set(max_scroll);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(scroll_offset)
        .take(inner_height)
        .map(Line::from)
        .collect();

    frame.render_widget(Clear, area);

    let body = Paragraph::new(Text::from(visible)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Description",
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(body, area);
}
