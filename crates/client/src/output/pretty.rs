//! Pretty output formatting.

use storefront_core::catalog::Product;
use storefront_core::orders::{
    Order, OrderError, OrderProductAssociation, OrderWithLines, ProductWithOrders,
};

use crate::client::auth::AuthReply;

/// Format a product for display.
pub fn format_product(product: &Product) -> String {
    let mut output = format!("{} ({})\n  ID: {}", product.name, product.price, product.id);
    if !product.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", product.description));
    }
    output
}

/// Format products for display.
pub fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }
    let mut output = format!("PRODUCTS ({})\n", products.len());
    output.push_str(&"-".repeat(40));
    for product in products {
        output.push_str(&format!("\n{}", format_product(product)));
        output.push('\n');
    }
    output
}

/// Format an order header for display.
pub fn format_order(order: &Order) -> String {
    let mut output = format!(
        "Order {}\n  Created: {}",
        order.id,
        order.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(code) = &order.promocode {
        output.push_str(&format!("\n  Promocode: {}", code));
    }
    output
}

/// An amount, or a marker when it does not fit an `i64`.
fn amount(value: Result<i64, OrderError>) -> String {
    match value {
        Ok(value) => value.to_string(),
        Err(_) => "overflow".to_string(),
    }
}

/// Format an order with its lines for display.
pub fn format_order_with_lines(order: &OrderWithLines) -> String {
    let mut output = format_order(&order.order);
    if order.lines.is_empty() {
        output.push_str("\n  (no products)");
        return output;
    }
    for line in &order.lines {
        output.push_str(&format!(
            "\n  - {} x{} @ {} = {}",
            line.product.name,
            line.association.count,
            line.association.unit_price,
            amount(line.subtotal())
        ));
    }
    output.push_str(&format!("\n  Total: {}", amount(order.total())));
    output
}

/// Format orders for display.
pub fn format_orders(orders: &[OrderWithLines]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }
    let mut output = format!("ORDERS ({})\n", orders.len());
    output.push_str(&"-".repeat(40));
    for order in orders {
        output.push_str(&format!("\n{}", format_order_with_lines(order)));
        output.push('\n');
    }
    output
}

/// Format an order line for display.
pub fn format_line(line: &OrderProductAssociation) -> String {
    format!(
        "Order {} / product {}: count {} @ {}",
        line.order_id, line.product_id, line.count, line.unit_price
    )
}

/// Format a product with the orders it appears on.
pub fn format_product_orders(entry: &ProductWithOrders) -> String {
    let mut output = format_product(&entry.product);
    if entry.orders.is_empty() {
        output.push_str("\n  (not on any order)");
    }
    for line in &entry.orders {
        output.push_str(&format!(
            "\n  - order {} x{} @ {}",
            line.order.id, line.association.count, line.association.unit_price
        ));
    }
    output
}

/// Format a demo auth reply for display.
pub fn format_auth_reply(reply: &AuthReply) -> String {
    let mut output = format!("{}\n  Username: {}", reply.message, reply.username);
    if let Some(password) = &reply.password {
        output.push_str(&format!("\n  Password: {}", password));
    }
    if let Some(login_at) = reply.login_at {
        output.push_str(&format!("\n  Logged in at: {}", login_at));
    }
    output
}
