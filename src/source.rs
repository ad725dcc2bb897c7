use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProductDetail, ProductSummary};

/// The only I/O boundary of the app. Implementations are stateless and
/// never retry on their own; callers decide whether to try again.
#[async_trait]
pub trait ProductSource: Send + Sync + std::fmt::Debug {
    /// Fetch the whole collection in one call.
    async fn list_products(&self) -> Result<Vec<ProductSummary>>;

    async fn get_product(&self, id: u64) -> Result<ProductDetail>;
}
