use async_trait::async_trait;

use crate::accounts::{
    NewProfile, Post, PostWithAuthor, Profile, ProfileWithUser, User, UserWithRelations,
};
use crate::catalog::{NewProduct, Product};
use crate::orders::{NewOrder, Order, OrderProductAssociation, OrderWithLines, ProductWithOrders};

use super::Result;

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Lists every product ordered by ID.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Gets a product by its ID.
    async fn get_product(&self, id: i64) -> Result<Option<Product>>;

    /// Creates a product and returns it with its assigned ID.
    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    /// Persists an already-updated product.
    async fn update_product(&self, product: &Product) -> Result<Product>;

    /// Deletes a product and its order lines.
    async fn delete_product(&self, id: i64) -> Result<()>;
}

/// Repository for orders and their product lines.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Creates an order and returns it with its assigned ID.
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    /// Gets an order without its lines.
    async fn get_order(&self, id: i64) -> Result<Option<Order>>;

    /// Gets an order with every line and product.
    async fn get_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>>;

    /// Gets every order with its lines and products, in a fixed number of queries.
    async fn get_orders_with_products(&self) -> Result<Vec<OrderWithLines>>;

    /// Gets a product with every order that contains it.
    async fn get_product_with_orders(&self, product_id: i64) -> Result<Option<ProductWithOrders>>;

    /// Adds `quantity` units of a product to an order.
    ///
    /// Increments the existing line for the pair, or inserts one priced at the
    /// product's current price.
    async fn add_or_increment_line(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderProductAssociation>;

    /// Inserts a line with an explicit unit price.
    ///
    /// Fails with `AlreadyExists` when the pair already has a line.
    async fn add_line(
        &self,
        order_id: i64,
        product_id: i64,
        count: i64,
        unit_price: i64,
    ) -> Result<OrderProductAssociation>;

    /// Deletes an order and its lines.
    async fn delete_order(&self, id: i64) -> Result<()>;
}

/// Repository for users, profiles and posts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user. Usernames are unique.
    async fn create_user(&self, username: &str) -> Result<User>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Creates the profile of an existing user.
    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile>;

    /// Creates posts for a user. Either every post is stored or none is.
    async fn create_posts(&self, user_id: i64, titles: &[String]) -> Result<Vec<Post>>;

    /// Gets every user with their profile and posts.
    async fn get_users_with_relations(&self) -> Result<Vec<UserWithRelations>>;

    /// Gets every post with its author.
    async fn get_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>>;

    /// Gets the profiles of the user with this username, with the user and their posts.
    async fn get_profiles_with_users_and_posts(
        &self,
        username: &str,
    ) -> Result<Vec<ProfileWithUser>>;
}
