use std::cell::Cell;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::carousel::Carousel;
use crate::event::Event;
use crate::fetch::{Fetch, Resolution, Ticket};
use crate::nav::{Navigator, Route};
use crate::source::ProductSource;
use crate::types::{ProductDetail, ProductSummary};

/// Which screen's fetch an alert belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Products,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertChoice {
    Cancel,
    Retry,
}

/// Blocking fetch-failure prompt. While one is open, only alert keys work.
#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub detail: String,
    pub target: FetchTarget,
    pub selected: AlertChoice,
}

pub struct App {
    pub nav: Navigator,

    // List screen
    pub products: Fetch<(), Vec<ProductSummary>>,
    pub product_index: usize,
    pub fetched_at: Option<DateTime<Local>>,

    // Detail screen
    pub product: Fetch<u64, ProductDetail>,
    pub carousel: Carousel,
    pub scroll_offset: usize,
    /// Furthest the description can scroll, as measured by the last render.
    pub scroll_limit: Cell<usize>,

    pub alert: Option<Alert>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    carousel_interval: Duration,
    source: Arc<dyn ProductSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn ProductSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        carousel_interval: Duration,
    ) -> Self {
        Self {
            nav: Navigator::default(),

            products: Fetch::new(),
            product_index: 0,
            fetched_at: None,

            product: Fetch::new(),
            carousel: Carousel::new(0, carousel_interval, Instant::now()),
            scroll_offset: 0,
            scroll_limit: Cell::new(0),

            alert: None,
            error: None,
            message: None,
            spinner_frame: 0,
            should_quit: false,
            carousel_interval,
            source,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadProducts,
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.alert.is_some() {
            return match key.code {
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Tab
                | KeyCode::BackTab
                | KeyCode::Char('h')
                | KeyCode::Char('l') => Action::AlertToggle,
                KeyCode::Enter => Action::AlertConfirm,
                KeyCode::Esc | KeyCode::Char('c') => Action::AlertCancel,
                KeyCode::Char('r') => Action::AlertRetry,
                _ => Action::None,
            };
        }

        match self.nav.current() {
            Route::ProductList => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
                KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
                KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
                KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
                KeyCode::Enter => Action::Select,
                KeyCode::Char('r') => Action::Refresh,
                KeyCode::Char('o') => Action::OpenImage,
                KeyCode::Char('y') => Action::YankUrl,
                _ => Action::None,
            },
            Route::ProductDetail { .. } => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace => Action::Back,
                KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
                KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
                KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
                KeyCode::Char('h') | KeyCode::Left => Action::PrevImage,
                KeyCode::Char('l') | KeyCode::Right => Action::NextImage,
                KeyCode::Char('o') => Action::OpenImage,
                KeyCode::Char('y') => Action::YankUrl,
                KeyCode::Char('r') => Action::Refresh,
                _ => Action::None,
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        let user_driven = !matches!(
            action,
            Action::Tick
                | Action::None
                | Action::ProductsLoaded(..)
                | Action::ProductLoaded(..)
        );
        if user_driven {
            self.error = None;
            self.message = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => match self.nav.current() {
                Route::ProductList => {
                    self.should_quit = true;
                }
                Route::ProductDetail { id } => {
                    self.nav.pop();
                    self.product.reset();
                    self.carousel = Carousel::new(0, self.carousel_interval, Instant::now());
                    self.scroll_offset = 0;
                    self.scroll_limit.set(0);
                    info!(id, "closed product detail");
                }
            },
            Action::ScrollUp => match self.nav.current() {
                Route::ProductList => {
                    self.product_index = self.product_index.saturating_sub(1);
                }
                Route::ProductDetail { .. } => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
            },
            Action::ScrollDown => match self.nav.current() {
                Route::ProductList => {
                    if self.product_index + 1 < self.product_count() {
                        self.product_index += 1;
                    }
                }
                Route::ProductDetail { .. } => {
                    if self.scroll_offset < self.scroll_limit.get() {
                        self.scroll_offset += 1;
                    }
                }
            },
            Action::GoToTop => match self.nav.current() {
                Route::ProductList => self.product_index = 0,
                Route::ProductDetail { .. } => self.scroll_offset = 0,
            },
            Action::GoToBottom => {
                if self.nav.current() == Route::ProductList {
                    self.product_index = self.product_count().saturating_sub(1);
                }
            }
            Action::Select => {
                if self.nav.current() != Route::ProductList {
                    return;
                }
                let selected = self
                    .products
                    .state()
                    .data()
                    .and_then(|products| products.get(self.product_index))
                    .map(|p| p.id);
                if let Some(id) = selected {
                    self.nav.push(Route::ProductDetail { id });
                    info!(id, "opened product detail");
                    self.load_product(id);
                }
            }
            Action::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                if matches!(self.nav.current(), Route::ProductDetail { .. }) {
                    self.carousel.tick(Instant::now());
                }
            }

            Action::LoadProducts => self.load_products(),
            Action::Refresh => match self.nav.current() {
                Route::ProductList => self.load_products(),
                Route::ProductDetail { id } => self.load_product(id),
            },
            Action::ProductsLoaded(ticket, result) => {
                match self.products.resolve(ticket, result) {
                    Resolution::Loaded => {
                        self.product_index = 0;
                        self.fetched_at = Some(Local::now());
                        info!(count = self.product_count(), "products loaded");
                    }
                    Resolution::Failed => self.raise_alert(FetchTarget::Products),
                    Resolution::Stale => debug!("dropped stale product list response"),
                }
            }

            Action::ProductLoaded(ticket, result) => {
                match self.product.resolve(ticket, result.map(|p| *p)) {
                    Resolution::Loaded => {
                        let slides = self
                            .product
                            .state()
                            .data()
                            .map_or(0, |p| p.images.len());
                        self.carousel =
                            Carousel::new(slides, self.carousel_interval, Instant::now());
                        self.scroll_offset = 0;
                        info!(slides, "product loaded");
                    }
                    Resolution::Failed => self.raise_alert(FetchTarget::Product),
                    Resolution::Stale => debug!("dropped stale product response"),
                }
            }
            Action::NextImage => self.carousel.next(Instant::now()),
            Action::PrevImage => self.carousel.prev(Instant::now()),
            Action::OpenImage => {
                if let Some(url) = self.current_image_url().map(str::to_string) {
                    match open::that(&url) {
                        Ok(()) => self.message = Some(format!("Opened {}", url)),
                        Err(e) => {
                            warn!(error = %e, "failed to open browser");
                            self.error = Some(format!("Failed to open browser: {}", e));
                        }
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.current_image_url().map(str::to_string) {
                    let copied = arboard::Clipboard::new()
                        .and_then(|mut clipboard| clipboard.set_text(url.clone()));
                    match copied {
                        Ok(()) => self.message = Some(format!("Copied {}", url)),
                        Err(e) => {
                            warn!(error = %e, "failed to copy to clipboard");
                            self.error = Some(format!("Failed to copy: {}", e));
                        }
                    }
                }
            }

            Action::AlertToggle => {
                if let Some(alert) = &mut self.alert {
                    alert.selected = match alert.selected {
                        AlertChoice::Cancel => AlertChoice::Retry,
                        AlertChoice::Retry => AlertChoice::Cancel,
                    };
                }
            }
            Action::AlertConfirm => match self.alert.as_ref().map(|a| a.selected) {
                Some(AlertChoice::Retry) => self.retry_alert(),
                Some(AlertChoice::Cancel) => self.cancel_alert(),
                None => {}
            },
            Action::AlertCancel => self.cancel_alert(),
            Action::AlertRetry => self.retry_alert(),
            Action::None => {}
        }
    }

    fn product_count(&self) -> usize {
        self.products.state().data().map_or(0, Vec::len)
    }

    /// Thumbnail of the selected row on the list screen. On the detail
    /// screen, the image under the carousel, falling back to the thumbnail
    /// when the product has no images.
    pub fn current_image_url(&self) -> Option<&str> {
        if self.nav.current() == Route::ProductList {
            return self
                .products
                .state()
                .data()?
                .get(self.product_index)
                .map(|p| p.thumbnail.as_str())
                .filter(|url| !url.is_empty());
        }

        let product = self.product.state().data()?;
        match self.carousel.index() {
            Some(i) => product.images.get(i).map(String::as_str),
            None if !product.thumbnail.is_empty() => Some(product.thumbnail.as_str()),
            None => None,
        }
    }

    fn raise_alert(&mut self, target: FetchTarget) {
        let detail = match target {
            FetchTarget::Products => self.products.state().error(),
            FetchTarget::Product => self.product.state().error(),
        }
        .map(ToString::to_string)
        .unwrap_or_default();
        warn!(screen = ?target, error = %detail, "fetch failed");

        self.alert = Some(Alert {
            title: "Error".to_string(),
            message: "Server Error".to_string(),
            detail,
            target,
            selected: AlertChoice::Retry,
        });
    }

    fn cancel_alert(&mut self) {
        if let Some(alert) = self.alert.take() {
            info!(screen = ?alert.target, "retry declined");
        }
    }

    fn retry_alert(&mut self) {
        let Some(alert) = self.alert.take() else {
            return;
        };
        info!(screen = ?alert.target, "retrying");
        match alert.target {
            FetchTarget::Products => {
                if let Some(((), ticket)) = self.products.retry() {
                    self.spawn_load_products(ticket);
                }
            }
            FetchTarget::Product => {
                if let Some((id, ticket)) = self.product.retry() {
                    self.spawn_load_product(id, ticket);
                }
            }
        }
    }

    fn load_products(&mut self) {
        let ticket = self.products.load(());
        self.spawn_load_products(ticket);
    }

    fn load_product(&mut self, id: u64) {
        let ticket = self.product.load(id);
        self.scroll_offset = 0;
        self.spawn_load_product(id, ticket);
    }

    fn spawn_load_products(&self, ticket: Ticket) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.list_products().await;
            tx.send(Action::ProductsLoaded(ticket, result)).ok();
        });
    }

    fn spawn_load_product(&self, id: u64, ticket: Ticket) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.get_product(id).await.map(Box::new);
            tx.send(Action::ProductLoaded(ticket, result)).ok();
        });
    }
}
