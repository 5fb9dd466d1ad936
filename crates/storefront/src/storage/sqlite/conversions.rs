//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Column offsets let joined rows be split into their two entities.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use storefront_core::accounts::{Post, Profile, User};
use storefront_core::catalog::Product;
use storefront_core::orders::{Order, OrderProductAssociation};

/// Number of columns `row_to_association` reads.
pub const ASSOCIATION_COLUMNS: usize = 5;

/// Number of columns `row_to_post` reads.
pub const POST_COLUMNS: usize = 3;

/// Expected columns: id, name, description, price
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    row_to_product_at(row, 0)
}

fn row_to_product_at(row: &Row, offset: usize) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        description: row.get(offset + 2)?,
        price: row.get(offset + 3)?,
    })
}

/// Expected columns: id, promocode, created_at, price
pub fn row_to_order(row: &Row) -> rusqlite::Result<Order> {
    row_to_order_at(row, 0)
}

fn row_to_order_at(row: &Row, offset: usize) -> rusqlite::Result<Order> {
    let created_at: String = row.get(offset + 2)?;
    Ok(Order {
        id: row.get(offset)?,
        promocode: row.get(offset + 1)?,
        created_at: parse_datetime(&created_at, offset + 2)?,
        price: row.get(offset + 3)?,
    })
}

/// Expected columns: id, order_id, product_id, count, unit_price
pub fn row_to_association(row: &Row) -> rusqlite::Result<OrderProductAssociation> {
    Ok(OrderProductAssociation {
        id: row.get(0)?,
        order_id: row.get(1)?,
        product_id: row.get(2)?,
        count: row.get(3)?,
        unit_price: row.get(4)?,
    })
}

/// Association columns followed by product columns.
pub fn row_to_line_with_product(
    row: &Row,
) -> rusqlite::Result<(OrderProductAssociation, Product)> {
    Ok((
        row_to_association(row)?,
        row_to_product_at(row, ASSOCIATION_COLUMNS)?,
    ))
}

/// Association columns followed by order columns.
pub fn row_to_line_with_order(row: &Row) -> rusqlite::Result<(OrderProductAssociation, Order)> {
    Ok((
        row_to_association(row)?,
        row_to_order_at(row, ASSOCIATION_COLUMNS)?,
    ))
}

/// Expected columns: id, username
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    row_to_user_at(row, 0)
}

fn row_to_user_at(row: &Row, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(offset)?,
        username: row.get(offset + 1)?,
    })
}

/// Expected columns: id, user_id, first_name, last_name
pub fn row_to_profile(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        user_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
    })
}

/// Expected columns: id, title, user_id
pub fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        user_id: row.get(2)?,
    })
}

/// Post columns followed by user columns.
pub fn row_to_post_with_author(row: &Row) -> rusqlite::Result<(Post, User)> {
    Ok((row_to_post(row)?, row_to_user_at(row, POST_COLUMNS)?))
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
