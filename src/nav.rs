/// A screen plus the parameters it was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProductList,
    ProductDetail { id: u64 },
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::ProductList => "Products Page",
            Route::ProductDetail { .. } => "Product Details",
        }
    }
}

/// Stack navigator. The product list is the root and is never popped.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::ProductList],
        }
    }
}

impl Navigator {
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::ProductList)
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pop the top route. Returns `None` at the root.
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }
}
