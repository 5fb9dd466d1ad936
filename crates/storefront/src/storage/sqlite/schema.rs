//! SQLite schema migrations and SQL query constants.
//!
//! Pure data, no I/O. The migration runner lives in `migrations.rs`.

/// Table that records which migrations have been applied.
pub const CREATE_SCHEMA_MIGRATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL
)
"#;

pub const SELECT_APPLIED_MIGRATIONS: &str =
    "SELECT version FROM schema_migrations ORDER BY version";

pub const INSERT_MIGRATION: &str =
    "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)";

/// Initial tables. The association table has no `count` column yet.
pub const MIGRATION_0001_INITIAL: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE
);

CREATE TABLE profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL UNIQUE,
    first_name TEXT,
    last_name TEXT,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price INTEGER NOT NULL
);

CREATE TABLE orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    promocode TEXT,
    created_at TEXT NOT NULL,
    price INTEGER
);

CREATE TABLE order_product_association (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL,
    unit_price INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

CREATE UNIQUE INDEX idx_unique_order_product
    ON order_product_association(order_id, product_id);
CREATE INDEX idx_posts_user_id ON posts(user_id);
CREATE INDEX idx_association_product_id ON order_product_association(product_id);
"#;

/// Adds the line quantity. Existing rows get a count of 1.
pub const MIGRATION_0002_ADD_COUNT: &str = r#"
ALTER TABLE order_product_association
    ADD COLUMN count INTEGER NOT NULL DEFAULT 1 CHECK (count >= 1);
"#;

// ============================================================================
// Products
// ============================================================================

pub const SELECT_ALL_PRODUCTS: &str = r#"
SELECT id, name, description, price
FROM products
ORDER BY id
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, description, price
FROM products
WHERE id = ?1
"#;

pub const SELECT_PRODUCT_PRICE: &str = "SELECT price FROM products WHERE id = ?1";

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, description, price)
VALUES (?1, ?2, ?3)
RETURNING id, name, description, price
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = ?2, description = ?3, price = ?4
WHERE id = ?1
RETURNING id, name, description, price
"#;

pub const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = ?1";

// ============================================================================
// Orders and lines
// ============================================================================

pub const INSERT_ORDER: &str = r#"
INSERT INTO orders (promocode, created_at, price)
VALUES (?1, ?2, ?3)
RETURNING id, promocode, created_at, price
"#;

pub const SELECT_ORDER_BY_ID: &str = r#"
SELECT id, promocode, created_at, price
FROM orders
WHERE id = ?1
"#;

pub const SELECT_ALL_ORDERS: &str = r#"
SELECT id, promocode, created_at, price
FROM orders
ORDER BY id
"#;

pub const DELETE_ORDER: &str = "DELETE FROM orders WHERE id = ?1";

/// Every line with its product, for assembling all order graphs at once.
pub const SELECT_ALL_LINES_WITH_PRODUCTS: &str = r#"
SELECT a.id, a.order_id, a.product_id, a.count, a.unit_price,
       p.id, p.name, p.description, p.price
FROM order_product_association a
JOIN products p ON p.id = a.product_id
ORDER BY a.id
"#;

pub const SELECT_LINES_WITH_PRODUCTS_FOR_ORDER: &str = r#"
SELECT a.id, a.order_id, a.product_id, a.count, a.unit_price,
       p.id, p.name, p.description, p.price
FROM order_product_association a
JOIN products p ON p.id = a.product_id
WHERE a.order_id = ?1
ORDER BY a.id
"#;

pub const SELECT_LINES_WITH_ORDERS_FOR_PRODUCT: &str = r#"
SELECT a.id, a.order_id, a.product_id, a.count, a.unit_price,
       o.id, o.promocode, o.created_at, o.price
FROM order_product_association a
JOIN orders o ON o.id = a.order_id
WHERE a.product_id = ?1
ORDER BY o.id
"#;

/// Atomic add-or-increment. `unit_price` only applies when a row is inserted.
pub const UPSERT_LINE: &str = r#"
INSERT INTO order_product_association (order_id, product_id, count, unit_price)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (order_id, product_id) DO UPDATE SET count = count + excluded.count
WHERE order_product_association.count <= 9223372036854775807 - excluded.count
RETURNING id, order_id, product_id, count, unit_price
"#;

pub const INSERT_LINE: &str = r#"
INSERT INTO order_product_association (order_id, product_id, count, unit_price)
VALUES (?1, ?2, ?3, ?4)
RETURNING id, order_id, product_id, count, unit_price
"#;

// ============================================================================
// Users, profiles and posts
// ============================================================================

pub const INSERT_USER: &str = r#"
INSERT INTO users (username)
VALUES (?1)
RETURNING id, username
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, username
FROM users
WHERE username = ?1
"#;

pub const SELECT_ALL_USERS: &str = "SELECT id, username FROM users ORDER BY id";

pub const INSERT_PROFILE: &str = r#"
INSERT INTO profiles (user_id, first_name, last_name)
VALUES (?1, ?2, ?3)
RETURNING id, user_id, first_name, last_name
"#;

pub const SELECT_ALL_PROFILES: &str = r#"
SELECT id, user_id, first_name, last_name
FROM profiles
ORDER BY id
"#;

pub const SELECT_PROFILES_FOR_USERNAME: &str = r#"
SELECT pr.id, pr.user_id, pr.first_name, pr.last_name
FROM profiles pr
JOIN users u ON u.id = pr.user_id
WHERE u.username = ?1
ORDER BY pr.id
"#;

pub const INSERT_POST: &str = r#"
INSERT INTO posts (title, user_id)
VALUES (?1, ?2)
RETURNING id, title, user_id
"#;

pub const SELECT_ALL_POSTS: &str = "SELECT id, title, user_id FROM posts ORDER BY id";

pub const SELECT_POSTS_FOR_USERNAME: &str = r#"
SELECT p.id, p.title, p.user_id
FROM posts p
JOIN users u ON u.id = p.user_id
WHERE u.username = ?1
ORDER BY p.id
"#;

pub const SELECT_POSTS_WITH_AUTHORS: &str = r#"
SELECT p.id, p.title, p.user_id, u.id, u.username
FROM posts p
JOIN users u ON u.id = p.user_id
ORDER BY p.id
"#;
