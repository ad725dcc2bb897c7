use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::fetch::FetchState;
use crate::types::{format_price, ProductSummary};

use super::{render_spinner, truncate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let products = match app.products.state() {
        FetchState::Loading => {
            render_spinner(frame, app, area, "Products");
            return;
        }
        FetchState::Loaded(products) => products,
        // Nothing to show until the user refreshes or retries.
        FetchState::Idle | FetchState::Failed(_) => {
            frame.render_widget(Block::default().borders(Borders::ALL).title("Products"), area);
            return;
        }
    };

    if products.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No Products Found",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Products"));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 46; // brand(18) + space(1) + price(11) + spaces(2) + rating(12) + spaces(2)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = products
        .iter()
        .enumerate()
        .map(|(i, product)| render_row(product, i == app.product_index, flex))
        .collect();

    let mut title = format!("Products ({})", products.len());
    if let Some(at) = app.fetched_at {
        title.push_str(&format!(" - updated {}", at.format("%H:%M:%S")));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.product_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_row(product: &ProductSummary, selected: bool, flex: usize) -> ListItem<'static> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let brand = truncate(product.brand.as_deref().unwrap_or(""), 18);
    let title = truncate(&product.title, flex);

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<18}", brand),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(format!("{:<flex$}", title), title_style),
        Span::raw(" "),
        Span::styled(
            format!("{:>11}", format_price(product.discounted_price())),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Rating: {}", product.rating),
            Style::default().fg(Color::Gray),
        ),
    ]))
}
