use std::collections::HashMap;

use super::error::OrderError;
use super::types::{
    Order, OrderLine, OrderProductAssociation, OrderWithLines, ProductOrderLine, ProductWithOrders,
};
use crate::catalog::Product;

/// What to do to record `quantity` more units of a product on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUpsert {
    /// The pair already has a row; set its count.
    Increment { association_id: i64, count: i64 },
    /// No row yet; insert one.
    Insert { count: i64, unit_price: i64 },
}

/// Rejects quantities below one.
pub fn validate_quantity(quantity: i64) -> Result<(), OrderError> {
    if quantity < 1 {
        return Err(OrderError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Plans an add-or-increment for one (order, product) pair.
///
/// An existing row keeps its recorded `unit_price`. A new row takes the
/// product's current price.
pub fn plan_line_upsert(
    existing: Option<&OrderProductAssociation>,
    order_id: i64,
    product: &Product,
    quantity: i64,
) -> Result<LineUpsert, OrderError> {
    validate_quantity(quantity)?;
    match existing {
        Some(row) => {
            let count = row
                .count
                .checked_add(quantity)
                .ok_or(OrderError::QuantityOverflow {
                    order_id,
                    product_id: product.id,
                })?;
            Ok(LineUpsert::Increment {
                association_id: row.id,
                count,
            })
        }
        None => Ok(LineUpsert::Insert {
            count: quantity,
            unit_price: product.price,
        }),
    }
}

/// Groups association rows under their orders.
///
/// Orders come back sorted by ID and each order's lines by association ID.
/// Rows whose order is not in `orders` are dropped.
pub fn assemble_order_graphs(
    mut orders: Vec<Order>,
    rows: Vec<(OrderProductAssociation, Product)>,
) -> Vec<OrderWithLines> {
    orders.sort_by_key(|order| order.id);

    let mut by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for (association, product) in rows {
        by_order
            .entry(association.order_id)
            .or_default()
            .push(OrderLine {
                association,
                product,
            });
    }

    orders
        .into_iter()
        .map(|order| {
            let mut lines = by_order.remove(&order.id).unwrap_or_default();
            lines.sort_by_key(|line| line.association.id);
            OrderWithLines { order, lines }
        })
        .collect()
}

/// Attaches a product's association rows, each with its order.
pub fn assemble_product_orders(
    product: Product,
    rows: Vec<(OrderProductAssociation, Order)>,
) -> ProductWithOrders {
    let mut orders: Vec<ProductOrderLine> = rows
        .into_iter()
        .filter(|(association, _)| association.product_id == product.id)
        .map(|(association, order)| ProductOrderLine { association, order })
        .collect();
    orders.sort_by_key(|line| line.order.id);
    ProductWithOrders { product, orders }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
        }
    }

    fn order(id: i64) -> Order {
        Order {
            id,
            promocode: None,
            created_at: Utc::now(),
            price: None,
        }
    }

    fn row(id: i64, order_id: i64, product_id: i64, count: i64) -> OrderProductAssociation {
        OrderProductAssociation {
            id,
            order_id,
            product_id,
            count,
            unit_price: 10,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert_eq!(validate_quantity(0), Err(OrderError::InvalidQuantity(0)));
        assert_eq!(validate_quantity(-3), Err(OrderError::InvalidQuantity(-3)));
    }

    #[test]
    fn test_plan_line_upsert_inserts_with_product_price() {
        let mouse = product(1, "Mouse", 100);
        let plan = plan_line_upsert(None, 5, &mouse, 2).unwrap();
        assert_eq!(
            plan,
            LineUpsert::Insert {
                count: 2,
                unit_price: 100
            }
        );
    }

    #[test]
    fn test_plan_line_upsert_increments_existing_row() {
        let mouse = product(1, "Mouse", 100);
        let existing = row(9, 5, 1, 3);
        let plan = plan_line_upsert(Some(&existing), 5, &mouse, 4).unwrap();
        assert_eq!(
            plan,
            LineUpsert::Increment {
                association_id: 9,
                count: 7
            }
        );
    }

    #[test]
    fn test_plan_line_upsert_rejects_non_positive_quantity() {
        let mouse = product(1, "Mouse", 100);
        assert_eq!(
            plan_line_upsert(None, 5, &mouse, 0),
            Err(OrderError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_plan_line_upsert_detects_overflow() {
        let mouse = product(1, "Mouse", 100);
        let existing = row(9, 5, 1, i64::MAX);
        assert_eq!(
            plan_line_upsert(Some(&existing), 5, &mouse, 1),
            Err(OrderError::QuantityOverflow {
                order_id: 5,
                product_id: 1
            })
        );
    }

    #[test]
    fn test_assemble_order_graphs_groups_and_orders_lines() {
        let mouse = product(1, "Mouse", 100);
        let keyboard = product(2, "Keyboard", 149);
        let rows = vec![
            (row(3, 2, 1, 1), mouse.clone()),
            (row(2, 1, 2, 1), keyboard.clone()),
            (row(1, 1, 1, 2), mouse.clone()),
        ];

        let graphs = assemble_order_graphs(vec![order(2), order(1), order(3)], rows);

        assert_eq!(graphs.len(), 3);
        assert_eq!(graphs[0].order.id, 1);
        let ids: Vec<i64> = graphs[0].lines.iter().map(|l| l.association.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(graphs[0].lines[1].product.name, "Keyboard");
        assert_eq!(graphs[1].lines.len(), 1);
        assert!(graphs[2].lines.is_empty());
    }

    #[test]
    fn test_order_total() {
        let graphs = assemble_order_graphs(
            vec![order(1)],
            vec![
                (row(1, 1, 1, 2), product(1, "Mouse", 10)),
                (row(2, 1, 2, 3), product(2, "Keyboard", 10)),
            ],
        );
        assert_eq!(graphs[0].total(), Ok(50));
    }

    #[test]
    fn test_assemble_product_orders() {
        let mouse = product(1, "Mouse", 100);
        let rows = vec![(row(4, 2, 1, 1), order(2)), (row(1, 1, 1, 5), order(1))];

        let graph = assemble_product_orders(mouse, rows);

        assert_eq!(graph.product.name, "Mouse");
        let order_ids: Vec<i64> = graph.orders.iter().map(|l| l.order.id).collect();
        assert_eq!(order_ids, vec![1, 2]);
        assert_eq!(graph.orders[0].association.count, 5);
    }
}
