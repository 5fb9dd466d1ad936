//! SQLite repository implementation.
//!
//! Implements the repository traits from `storefront_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use storefront_core::accounts::{
    assemble_profile_graphs, assemble_user_graphs, validate_username, NewProfile, Post,
    PostWithAuthor, Profile, ProfileWithUser, User, UserWithRelations,
};
use storefront_core::catalog::{validate_product, NewProduct, Product};
use storefront_core::orders::{
    assemble_order_graphs, assemble_product_orders, validate_quantity, NewOrder, Order,
    OrderError, OrderProductAssociation, OrderWithLines, ProductWithOrders,
};
use storefront_core::storage::{
    OrderRepository, ProductRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{
    format_datetime, row_to_association, row_to_line_with_order, row_to_line_with_product,
    row_to_order, row_to_post, row_to_post_with_author, row_to_product, row_to_profile,
    row_to_user,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::{migrations, schema};

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Collects a statement's mapped rows, stopping at the first error.
fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> std::result::Result<Vec<T>, tokio_rusqlite::Error> {
    rows.collect::<rusqlite::Result<Vec<T>>>().map_err(wrap_err)
}

/// Fails with `NotFound` unless both ends of an order line exist.
///
/// Returns the product's current price.
fn require_order_and_product(
    conn: &rusqlite::Connection,
    order_id: i64,
    product_id: i64,
) -> std::result::Result<std::result::Result<i64, RepositoryError>, tokio_rusqlite::Error> {
    let order = conn
        .query_row(schema::SELECT_ORDER_BY_ID, [order_id], row_to_order)
        .optional()
        .map_err(wrap_err)?;
    if order.is_none() {
        return Ok(Err(RepositoryError::not_found("Order", order_id)));
    }

    let price: Option<i64> = conn
        .query_row(schema::SELECT_PRODUCT_PRICE, [product_id], |row| row.get(0))
        .optional()
        .map_err(wrap_err)?;
    Ok(price.ok_or_else(|| RepositoryError::not_found("Product", product_id)))
}

/// SQLite-based repository implementation.
///
/// All calls go through a single `tokio-rusqlite` connection thread.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and applies pending migrations.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Enables foreign keys and runs the migrations.
    async fn init_schema(conn: &Connection) -> Result<()> {
        let applied = conn
            .call(|conn| {
                conn.execute_batch("PRAGMA foreign_keys = ON;")
                    .map_err(wrap_err)?;
                migrations::run(conn).map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        for version in applied {
            tracing::info!(version, "Applied schema migration");
        }
        Ok(())
    }
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_PRODUCTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_product).map_err(wrap_err)?;
                collect_rows(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product"))
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_PRODUCT_BY_ID, [id], row_to_product)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        validate_product(&product.name, product.price)?;
        let product = product.clone();

        let created = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_PRODUCT,
                    rusqlite::params![product.name, product.description, product.price],
                    row_to_product,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product"))?;

        tracing::debug!(product_id = created.id, "Inserted product");
        Ok(created)
    }

    async fn update_product(&self, product: &Product) -> Result<Product> {
        validate_product(&product.name, product.price)?;
        let product = product.clone();
        let id = product.id;

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_PRODUCT,
                    rusqlite::params![product.id, product.name, product.description, product.price],
                    row_to_product,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id))
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_PRODUCT, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id))
    }
}

// ============================================================================
// OrderRepository implementation
// ============================================================================

#[async_trait]
impl OrderRepository for SqliteRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let promocode = order.promocode.clone();
        let created_at = format_datetime(&order.created_at);
        let price = order.price;

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_ORDER,
                    rusqlite::params![promocode, created_at, price],
                    row_to_order,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Order"))
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_ORDER_BY_ID, [id], row_to_order)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id))
    }

    async fn get_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>> {
        self.conn
            .call(move |conn| {
                let Some(order) = conn
                    .query_row(schema::SELECT_ORDER_BY_ID, [id], row_to_order)
                    .optional()
                    .map_err(wrap_err)?
                else {
                    return Ok(None);
                };

                let mut stmt = conn
                    .prepare(schema::SELECT_LINES_WITH_PRODUCTS_FOR_ORDER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([id], row_to_line_with_product)
                    .map_err(wrap_err)?;
                let lines = collect_rows(rows)?;

                Ok(assemble_order_graphs(vec![order], lines).pop())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id))
    }

    async fn get_orders_with_products(&self) -> Result<Vec<OrderWithLines>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_ORDERS).map_err(wrap_err)?;
                let orders = collect_rows(stmt.query_map([], row_to_order).map_err(wrap_err)?)?;

                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_LINES_WITH_PRODUCTS)
                    .map_err(wrap_err)?;
                let lines = collect_rows(
                    stmt.query_map([], row_to_line_with_product)
                        .map_err(wrap_err)?,
                )?;

                Ok(assemble_order_graphs(orders, lines))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Order"))
    }

    async fn get_product_with_orders(&self, product_id: i64) -> Result<Option<ProductWithOrders>> {
        self.conn
            .call(move |conn| {
                let Some(product) = conn
                    .query_row(schema::SELECT_PRODUCT_BY_ID, [product_id], row_to_product)
                    .optional()
                    .map_err(wrap_err)?
                else {
                    return Ok(None);
                };

                let mut stmt = conn
                    .prepare(schema::SELECT_LINES_WITH_ORDERS_FOR_PRODUCT)
                    .map_err(wrap_err)?;
                let rows = collect_rows(
                    stmt.query_map([product_id], row_to_line_with_order)
                        .map_err(wrap_err)?,
                )?;

                Ok(Some(assemble_product_orders(product, rows)))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", product_id))
    }

    async fn add_or_increment_line(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderProductAssociation> {
        validate_quantity(quantity)?;

        let line = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let unit_price = match require_order_and_product(&tx, order_id, product_id)? {
                    Ok(price) => price,
                    Err(e) => return Ok(Err(e)),
                };
                // The upsert's WHERE skips an increment past i64::MAX and returns no row
                let line = tx
                    .query_row(
                        schema::UPSERT_LINE,
                        rusqlite::params![order_id, product_id, quantity, unit_price],
                        row_to_association,
                    )
                    .optional()
                    .map_err(wrap_err)?;
                let Some(line) = line else {
                    let overflow = OrderError::QuantityOverflow {
                        order_id,
                        product_id,
                    };
                    return Ok(Err(overflow.into()));
                };
                tx.commit().map_err(wrap_err)?;
                Ok(Ok(line))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "OrderProductAssociation"))??;

        tracing::debug!(
            order_id,
            product_id,
            count = line.count,
            "Upserted order line"
        );
        Ok(line)
    }

    async fn add_line(
        &self,
        order_id: i64,
        product_id: i64,
        count: i64,
        unit_price: i64,
    ) -> Result<OrderProductAssociation> {
        validate_quantity(count)?;
        if unit_price < 0 {
            return Err(RepositoryError::InvalidData(format!(
                "Unit price cannot be negative: {unit_price}"
            )));
        }

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                if let Err(e) = require_order_and_product(&tx, order_id, product_id)? {
                    return Ok(Err(e));
                }
                let line = tx
                    .query_row(
                        schema::INSERT_LINE,
                        rusqlite::params![order_id, product_id, count, unit_price],
                        row_to_association,
                    )
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(Ok(line))
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(
                    e,
                    "OrderProductAssociation",
                    format!("order {order_id}, product {product_id}"),
                )
            })?
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_ORDER, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, username: &str) -> Result<User> {
        validate_username(username).map_err(RepositoryError::InvalidData)?;
        let username = username.to_string();
        let id = username.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::INSERT_USER, [&username], row_to_user)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.to_string();
        let id = username.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_BY_USERNAME, [&username], row_to_user)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        let profile = profile.clone();
        let user_id = profile.user_id;

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_PROFILE,
                    rusqlite::params![profile.user_id, profile.first_name, profile.last_name],
                    row_to_profile,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Profile", format!("user {user_id}")))
    }

    async fn create_posts(&self, user_id: i64, titles: &[String]) -> Result<Vec<Post>> {
        let titles = titles.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut posts = Vec::with_capacity(titles.len());
                {
                    let mut stmt = tx.prepare(schema::INSERT_POST).map_err(wrap_err)?;
                    for title in &titles {
                        let post = stmt
                            .query_row(rusqlite::params![title, user_id], row_to_post)
                            .map_err(wrap_err)?;
                        posts.push(post);
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(posts)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post"))
    }

    async fn get_users_with_relations(&self) -> Result<Vec<UserWithRelations>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_USERS).map_err(wrap_err)?;
                let users = collect_rows(stmt.query_map([], row_to_user).map_err(wrap_err)?)?;

                let mut stmt = conn.prepare(schema::SELECT_ALL_PROFILES).map_err(wrap_err)?;
                let profiles =
                    collect_rows(stmt.query_map([], row_to_profile).map_err(wrap_err)?)?;

                let mut stmt = conn.prepare(schema::SELECT_ALL_POSTS).map_err(wrap_err)?;
                let posts = collect_rows(stmt.query_map([], row_to_post).map_err(wrap_err)?)?;

                Ok(assemble_user_graphs(users, profiles, posts))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn get_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POSTS_WITH_AUTHORS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_post_with_author)
                    .map_err(wrap_err)?;
                let posts = collect_rows(rows)?
                    .into_iter()
                    .map(|(post, user)| PostWithAuthor { post, user })
                    .collect();
                Ok(posts)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post"))
    }

    async fn get_profiles_with_users_and_posts(
        &self,
        username: &str,
    ) -> Result<Vec<ProfileWithUser>> {
        let username = username.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PROFILES_FOR_USERNAME)
                    .map_err(wrap_err)?;
                let profiles = collect_rows(
                    stmt.query_map([&username], row_to_profile)
                        .map_err(wrap_err)?,
                )?;

                let user = conn
                    .query_row(schema::SELECT_USER_BY_USERNAME, [&username], row_to_user)
                    .optional()
                    .map_err(wrap_err)?;

                let mut stmt = conn
                    .prepare(schema::SELECT_POSTS_FOR_USERNAME)
                    .map_err(wrap_err)?;
                let posts =
                    collect_rows(stmt.query_map([&username], row_to_post).map_err(wrap_err)?)?;

                Ok(assemble_profile_graphs(
                    profiles,
                    user.into_iter().collect(),
                    posts,
                ))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Profile"))
    }
}
