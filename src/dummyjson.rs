use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ShelfError};
use crate::source::ProductSource;
use crate::types::{ProductDetail, ProductSummary};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

pub struct DummyJson {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for DummyJson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DummyJson")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DummyJson {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ShelfError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "request failed");
            ShelfError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "unexpected status");
            return Err(ShelfError::Network(format!("{} returned {}", url, status)));
        }

        response.json().await.map_err(|e| {
            warn!(url, error = %e, "unreadable body");
            ShelfError::from(e)
        })
    }
}

// DummyJSON response types. Unknown fields (sku, tags, reviews, ...) are ignored.

#[derive(Deserialize)]
struct DjProductPage {
    products: Vec<DjSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DjSummary {
    id: u64,
    #[serde(default)]
    brand: Option<String>,
    title: String,
    price: f64,
    discount_percentage: f64,
    rating: f64,
    thumbnail: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DjProduct {
    id: u64,
    #[serde(default)]
    brand: Option<String>,
    category: String,
    title: String,
    description: String,
    price: f64,
    discount_percentage: f64,
    rating: f64,
    stock: u32,
    thumbnail: String,
    #[serde(default)]
    images: Vec<String>,
}

fn check_discount(id: u64, discount_percentage: f64) -> Result<f64> {
    if (0.0..=100.0).contains(&discount_percentage) {
        Ok(discount_percentage)
    } else {
        Err(ShelfError::Decode(format!(
            "product {}: discountPercentage {} is outside 0-100",
            id, discount_percentage
        )))
    }
}

impl TryFrom<DjSummary> for ProductSummary {
    type Error = ShelfError;

    fn try_from(p: DjSummary) -> Result<Self> {
        Ok(ProductSummary {
            discount_percentage: check_discount(p.id, p.discount_percentage)?,
            id: p.id,
            brand: p.brand,
            title: p.title,
            price: p.price,
            rating: p.rating,
            thumbnail: p.thumbnail,
        })
    }
}

impl TryFrom<DjProduct> for ProductDetail {
    type Error = ShelfError;

    fn try_from(p: DjProduct) -> Result<Self> {
        Ok(ProductDetail {
            discount_percentage: check_discount(p.id, p.discount_percentage)?,
            id: p.id,
            brand: p.brand,
            category: p.category,
            title: p.title,
            description: p.description,
            price: p.price,
            rating: p.rating,
            stock: p.stock,
            thumbnail: p.thumbnail,
            images: p.images,
        })
    }
}

#[async_trait]
impl ProductSource for DummyJson {
    async fn list_products(&self) -> Result<Vec<ProductSummary>> {
        let url = self.api_url("/products");
        let page: DjProductPage = self.get_json(&url).await?;

        page.products
            .into_iter()
            .map(ProductSummary::try_from)
            .collect()
    }

    async fn get_product(&self, id: u64) -> Result<ProductDetail> {
        let url = self.api_url(&format!("/products/{}", id));
        let product: DjProduct = self.get_json(&url).await?;
        ProductDetail::try_from(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    const PAGE: &str = r#"{
        "products": [
            {"id": 1, "brand": "X", "title": "Widget", "price": 100, "discountPercentage": 10,
             "rating": 4.5, "thumbnail": "u", "sku": "W-1", "tags": ["a"]},
            {"id": 2, "title": "Apple", "price": 1.99, "discountPercentage": 0.5,
             "rating": 3.1, "thumbnail": "v"}
        ],
        "total": 2, "skip": 0, "limit": 30
    }"#;

    const PRODUCT: &str = r#"{
        "id": 1, "brand": "X", "category": "gadgets", "title": "Widget",
        "description": "A widget", "price": 100, "discountPercentage": 10,
        "rating": 4.5, "stock": 0, "thumbnail": "u", "images": ["a", "b"],
        "reviews": [{"rating": 5}]
    }"#;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn json(body: &'static str) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
        (StatusCode::OK, [("content-type", "application/json")], body)
    }

    #[test]
    fn decodes_collection_page() {
        let page: DjProductPage = serde_json::from_str(PAGE).unwrap();
        let products: Vec<ProductSummary> = page
            .products
            .into_iter()
            .map(ProductSummary::try_from)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand.as_deref(), Some("X"));
        assert_eq!(products[0].discount_percentage, 10.0);
        assert_eq!(products[1].brand, None);
    }

    #[test]
    fn missing_images_default_to_empty() {
        let raw = r#"{"id": 3, "category": "c", "title": "t", "description": "d",
                      "price": 1, "discountPercentage": 0, "rating": 1, "stock": 5,
                      "thumbnail": "u"}"#;
        let product = ProductDetail::try_from(serde_json::from_str::<DjProduct>(raw).unwrap())
            .unwrap();
        assert!(product.images.is_empty());
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let raw = r#"{"id": 3, "category": "c", "title": "t", "description": "d",
                      "price": 1, "discountPercentage": 0, "rating": 1, "stock": -1,
                      "thumbnail": "u"}"#;
        assert!(serde_json::from_str::<DjProduct>(raw).is_err());
    }

    #[test]
    fn discount_out_of_range_is_rejected() {
        let raw = r#"{"id": 9, "title": "t", "price": 1, "discountPercentage": 120, "rating": 1,
                      "thumbnail": "u"}"#;
        let err = ProductSummary::try_from(serde_json::from_str::<DjSummary>(raw).unwrap())
            .unwrap_err();
        assert!(matches!(err, ShelfError::Decode(_)));
    }

    #[test]
    fn missing_thumbnail_is_rejected() {
        let raw = r#"{"id": 9, "title": "t", "price": 1, "discountPercentage": 1, "rating": 1}"#;
        assert!(serde_json::from_str::<DjSummary>(raw).is_err());
    }

    #[tokio::test]
    async fn missing_thumbnail_over_http_is_decode_error() {
        let base = serve(Router::new().route(
            "/products/4",
            get(|| async {
                json(
                    r#"{"id": 4, "category": "c", "title": "t", "description": "d",
                        "price": 1, "discountPercentage": 0, "rating": 1, "stock": 2}"#,
                )
            }),
        ))
        .await;
        let client = DummyJson::new(&base).unwrap();

        let err = client.get_product(4).await.unwrap_err();
        assert!(matches!(err, ShelfError::Decode(_)), "{err:?}");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = DummyJson::new("https://dummyjson.com/").unwrap();
        assert_eq!(client.api_url("/products"), "https://dummyjson.com/products");
    }

    #[tokio::test]
    async fn lists_products_over_http() {
        let base = serve(Router::new().route("/products", get(|| async { json(PAGE) }))).await;
        let client = DummyJson::new(&base).unwrap();

        let products = client.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Widget");
    }

    #[tokio::test]
    async fn gets_single_product_over_http() {
        let base = serve(Router::new().route("/products/1", get(|| async { json(PRODUCT) }))).await;
        let client = DummyJson::new(&base).unwrap();

        let product = client.get_product(1).await.unwrap();
        assert_eq!(product.images, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(product.stock, 0);
        assert_eq!(product.category, "gadgets");
    }

    #[tokio::test]
    async fn server_error_is_a_network_error() {
        let base = serve(Router::new().route(
            "/products",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let client = DummyJson::new(&base).unwrap();

        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, ShelfError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_decode_error() {
        let base = serve(Router::new().route(
            "/products/7",
            get(|| async { json(r#"{"id": 7, "title": "no price"}"#) }),
        ))
        .await;
        let client = DummyJson::new(&base).unwrap();

        let err = client.get_product(7).await.unwrap_err();
        assert!(matches!(err, ShelfError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = DummyJson::new(&format!("http://{}", addr)).unwrap();
        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, ShelfError::Network(_)), "got {err:?}");
    }
}
