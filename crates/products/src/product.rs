use serde::{Deserialize, Serialize};

use saleflow_core::{DomainError, DomainResult, Entity, ProductId, UserId};

/// Catalog entry: something that can be sold and purchased.
///
/// Products are reference data for the fulfillment core. They are created and
/// deleted by the product-management workflows; purchase activity never
/// mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in the smallest currency unit (e.g., cents).
    pub price: u64,
    pub user: UserId,
    pub username: String,
}

impl Product {
    /// Build a product, enforcing the catalog's construction rules.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: u64,
        user: UserId,
        username: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price == 0 {
            return Err(DomainError::validation("price must be positive"));
        }

        Ok(Self {
            id,
            name,
            price,
            user,
            username: username.into(),
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Draft for a new product (id and owner assigned by the backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: u64,
}

impl CreateProduct {
    /// Build a product draft under the same rules as [`Product::new`].
    pub fn new(name: impl Into<String>, price: u64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(Self { name, price })
    }
}

/// Catalog search predicate: name substring and price/owner bounds.
///
/// Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilters {
    pub name_contains: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub user: Option<UserId>,
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name_contains {
            if !product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        if let Some(user) = self.user {
            if product.user != user {
                return false;
            }
        }
        true
    }

    /// Apply the filter over a catalog slice, preserving catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
