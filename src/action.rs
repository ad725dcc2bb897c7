use crate::error::Result;
use crate::fetch::Ticket;
use crate::types::{ProductDetail, ProductSummary};

#[derive(Debug)]
pub enum Action {
    Quit,
    Back,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,
    Tick,

    // Product list
    LoadProducts,
    Refresh,
    ProductsLoaded(Ticket, Result<Vec<ProductSummary>>),

    // Product detail
    ProductLoaded(Ticket, Result<Box<ProductDetail>>),
    NextImage,
    PrevImage,
    OpenImage,
    YankUrl,

    // Error alert
    AlertToggle,
    AlertConfirm,
    AlertCancel,
    AlertRetry,

    None,
}
