use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::orders::OrderError;

/// An order. Its products are reached through association rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub promocode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub price: Option<i64>,
}

/// Field values for an order that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub promocode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub price: Option<i64>,
}

impl NewOrder {
    /// A new order created now.
    pub fn new() -> Self {
        Self {
            promocode: None,
            created_at: Utc::now(),
            price: None,
        }
    }

    pub fn with_promocode(mut self, promocode: impl Into<String>) -> Self {
        self.promocode = Some(promocode.into());
        self
    }
}

impl Default for NewOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    pub fn from_new(id: i64, new: NewOrder) -> Self {
        Self {
            id,
            promocode: new.promocode,
            created_at: new.created_at,
            price: new.price,
        }
    }
}

/// One row linking an order to a product.
///
/// The pair (`order_id`, `product_id`) is unique. `unit_price` is the price
/// recorded when the line was created and does not follow later product
/// price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProductAssociation {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub count: i64,
    pub unit_price: i64,
}

/// An association row together with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub association: OrderProductAssociation,
    pub product: Product,
}

impl OrderLine {
    /// `count * unit_price`, or `TotalOverflow` when it does not fit an `i64`.
    pub fn subtotal(&self) -> Result<i64, OrderError> {
        self.association
            .count
            .checked_mul(self.association.unit_price)
            .ok_or(OrderError::TotalOverflow {
                order_id: self.association.order_id,
            })
    }
}

/// An order with every line and the product behind each line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl OrderWithLines {
    /// Sum of `count * unit_price` across all lines.
    pub fn total(&self) -> Result<i64, OrderError> {
        self.lines.iter().try_fold(0i64, |sum, line| {
            sum.checked_add(line.subtotal()?)
                .ok_or(OrderError::TotalOverflow {
                    order_id: self.order.id,
                })
        })
    }
}

/// An association row seen from the product side, carrying its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOrderLine {
    #[serde(flatten)]
    pub association: OrderProductAssociation,
    pub order: Order,
}

/// A product with every order that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithOrders {
    #[serde(flatten)]
    pub product: Product,
    pub orders: Vec<ProductOrderLine>,
}
