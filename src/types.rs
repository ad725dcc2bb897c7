use std::fmt;

/// Product as shown in the list screen
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: u64,
    pub brand: Option<String>,
    pub title: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub thumbnail: String,
}

impl ProductSummary {
    pub fn discounted_price(&self) -> f64 {
        discounted_price(self.price, self.discount_percentage)
    }
}

/// Product as shown in the detail screen. Always fetched on its own,
/// never derived from a `ProductSummary`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub id: u64,
    pub brand: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: u32,
    pub thumbnail: String,
    pub images: Vec<String>,
}

impl ProductDetail {
    pub fn discounted_price(&self) -> f64 {
        discounted_price(self.price, self.discount_percentage)
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn from_stock(stock: u32) -> Self {
        if stock > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "In Stock"),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// `price - price * discount / 100`, rounded to cents.
pub fn discounted_price(price: f64, discount_percentage: f64) -> f64 {
    let raw = price - price * discount_percentage / 100.0;
    (raw * 100.0).round() / 100.0
}

/// Format an amount as dollars with two decimals, e.g. `$90.00`.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(stock: u32) -> ProductDetail {
        ProductDetail {
            id: 1,
            brand: Some("X".to_string()),
            category: "gadgets".to_string(),
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            price: 100.0,
            discount_percentage: 10.0,
            rating: 4.5,
            stock,
            thumbnail: "u".to_string(),
            images: vec![],
        }
    }

    #[test]
    fn ten_percent_off_a_hundred() {
        assert_eq!(discounted_price(100.0, 10.0), 90.0);
        assert_eq!(format_price(discounted_price(100.0, 10.0)), "$90.00");
    }

    #[test]
    fn discounted_price_rounds_to_cents() {
        // 9.99 - 9.99 * 7.17 / 100 = 9.273717
        assert_eq!(discounted_price(9.99, 7.17), 9.27);
        assert_eq!(format_price(discounted_price(9.99, 7.17)), "$9.27");
    }

    #[test]
    fn zero_and_full_discount() {
        assert_eq!(discounted_price(42.5, 0.0), 42.5);
        assert_eq!(discounted_price(42.5, 100.0), 0.0);
    }

    #[test]
    fn stock_threshold_is_zero() {
        assert_eq!(detail(0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(detail(1).stock_status(), StockStatus::InStock);
        assert_eq!(detail(5).stock_status().to_string(), "In Stock");
        assert_eq!(detail(0).stock_status().to_string(), "Out of Stock");
    }

    #[test]
    fn summary_and_detail_agree_on_price() {
        let d = detail(3);
        let s = ProductSummary {
            id: d.id,
            brand: d.brand.clone(),
            title: d.title.clone(),
            price: d.price,
            discount_percentage: d.discount_percentage,
            rating: d.rating,
            thumbnail: d.thumbnail.clone(),
        };
        assert_eq!(s.discounted_price(), d.discounted_price());
    }
}
