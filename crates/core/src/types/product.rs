//! The product catalog.
//!
//! A fixed list of four products, created at compile time and never
//! mutated. Order is significant: the product grid renders in this order.

/// A purchasable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Product {
    /// Identifier used in URLs and as the cart key.
    pub id: &'static str,
    /// Human-readable name shown in the cart summary.
    pub name: &'static str,
}

static CATALOG: [Product; 4] = [
    Product {
        id: "iphone",
        name: "iphone",
    },
    Product {
        id: "imac",
        name: "iMac",
    },
    Product {
        id: "ipad",
        name: "iPad",
    },
    Product {
        id: "mac-book",
        name: "Mac Book",
    },
];

impl Product {
    /// Return every product, always in the same order.
    #[must_use]
    pub fn find_all() -> &'static [Self] {
        &CATALOG
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|product| product.id == id)
    }

    /// Display name for an id in `catalog`, falling back to the id itself.
    ///
    /// Cart ids are not validated, so a cart may hold ids the catalog
    /// does not know about.
    #[must_use]
    pub fn display_name<'a>(catalog: &[Self], id: &'a str) -> &'a str {
        catalog
            .iter()
            .find(|product| product.id == id)
            .map_or(id, |product| product.name)
    }
}
