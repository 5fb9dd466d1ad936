//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_core::accounts::{
    assemble_profile_graphs, assemble_user_graphs, validate_username, NewProfile, Post,
    PostWithAuthor, Profile, ProfileWithUser, User, UserWithRelations,
};
use storefront_core::catalog::{validate_product, NewProduct, Product};
use storefront_core::orders::{
    assemble_order_graphs, assemble_product_orders, plan_line_upsert, validate_quantity,
    LineUpsert, NewOrder, Order, OrderProductAssociation, OrderWithLines, ProductWithOrders,
};
use storefront_core::storage::{
    OrderRepository, ProductRepository, RepositoryError, Result, UserRepository,
};

/// One auto-incrementing table. IDs are never reused, even after deletes.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    products: Table<Product>,
    orders: Table<Order>,
    lines: Table<OrderProductAssociation>,
    users: Table<User>,
    profiles: Table<Profile>,
    posts: Table<Post>,
}

impl Tables {
    fn find_line(&self, order_id: i64, product_id: i64) -> Option<&OrderProductAssociation> {
        self.lines
            .rows
            .values()
            .find(|l| l.order_id == order_id && l.product_id == product_id)
    }

    fn require_order(&self, order_id: i64) -> Result<()> {
        if self.orders.rows.contains_key(&order_id) {
            Ok(())
        } else {
            Err(RepositoryError::not_found("Order", order_id))
        }
    }

    fn require_product(&self, product_id: i64) -> Result<&Product> {
        self.products
            .rows
            .get(&product_id)
            .ok_or_else(|| RepositoryError::not_found("Product", product_id))
    }

    fn lines_with_products(&self) -> Vec<(OrderProductAssociation, Product)> {
        self.lines
            .rows
            .values()
            .filter_map(|line| {
                let product = self.products.rows.get(&line.product_id)?;
                Some((line.clone(), product.clone()))
            })
            .collect()
    }

    fn user_exists(&self, user_id: i64) -> Result<()> {
        if self.users.rows.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepositoryError::InvalidData(format!(
                "Foreign key constraint violation: user {user_id} does not exist"
            )))
        }
    }
}

/// In-memory storage backend.
///
/// Mirrors the SQLite backend's constraints: unique usernames, one profile
/// per user, one line per (order, product) pair and cascading deletes.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.tables.read().await.products.all())
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.tables.read().await.products.rows.get(&id).cloned())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        validate_product(&product.name, product.price)?;
        let mut tables = self.tables.write().await;
        let id = tables.products.next_id();
        let created = Product::from_new(id, product.clone());
        tables.products.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update_product(&self, product: &Product) -> Result<Product> {
        validate_product(&product.name, product.price)?;
        let mut tables = self.tables.write().await;
        match tables.products.rows.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product.clone())
            }
            None => Err(RepositoryError::not_found("Product", product.id)),
        }
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.products.rows.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Product", id));
        }
        tables.lines.rows.retain(|_, line| line.product_id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let mut tables = self.tables.write().await;
        let id = tables.orders.next_id();
        let created = Order::from_new(id, order.clone());
        tables.orders.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        Ok(self.tables.read().await.orders.rows.get(&id).cloned())
    }

    async fn get_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>> {
        let tables = self.tables.read().await;
        let Some(order) = tables.orders.rows.get(&id).cloned() else {
            return Ok(None);
        };
        let lines = tables
            .lines_with_products()
            .into_iter()
            .filter(|(line, _)| line.order_id == id)
            .collect();
        Ok(assemble_order_graphs(vec![order], lines).pop())
    }

    async fn get_orders_with_products(&self) -> Result<Vec<OrderWithLines>> {
        let tables = self.tables.read().await;
        Ok(assemble_order_graphs(
            tables.orders.all(),
            tables.lines_with_products(),
        ))
    }

    async fn get_product_with_orders(&self, product_id: i64) -> Result<Option<ProductWithOrders>> {
        let tables = self.tables.read().await;
        let Some(product) = tables.products.rows.get(&product_id).cloned() else {
            return Ok(None);
        };
        let rows = tables
            .lines
            .rows
            .values()
            .filter(|line| line.product_id == product_id)
            .filter_map(|line| {
                let order = tables.orders.rows.get(&line.order_id)?;
                Some((line.clone(), order.clone()))
            })
            .collect();
        Ok(Some(assemble_product_orders(product, rows)))
    }

    async fn add_or_increment_line(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderProductAssociation> {
        validate_quantity(quantity)?;
        let mut tables = self.tables.write().await;
        tables.require_order(order_id)?;
        let product = tables.require_product(product_id)?.clone();

        let plan = plan_line_upsert(
            tables.find_line(order_id, product_id),
            order_id,
            &product,
            quantity,
        )?;

        match plan {
            LineUpsert::Increment {
                association_id,
                count,
            } => {
                let line = tables
                    .lines
                    .rows
                    .get_mut(&association_id)
                    .ok_or_else(|| {
                        RepositoryError::not_found("OrderProductAssociation", association_id)
                    })?;
                line.count = count;
                Ok(line.clone())
            }
            LineUpsert::Insert { count, unit_price } => {
                let id = tables.lines.next_id();
                let line = OrderProductAssociation {
                    id,
                    order_id,
                    product_id,
                    count,
                    unit_price,
                };
                tables.lines.rows.insert(id, line.clone());
                Ok(line)
            }
        }
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
        let mut tables = self.tables.write().await;
        tables.require_order(order_id)?;
        tables.require_product(product_id)?;
        if tables.find_line(order_id, product_id).is_some() {
            return Err(RepositoryError::already_exists(
                "OrderProductAssociation",
                format!("order {order_id}, product {product_id}"),
            ));
        }

        let id = tables.lines.next_id();
        let line = OrderProductAssociation {
            id,
            order_id,
            product_id,
            count,
            unit_price,
        };
        tables.lines.rows.insert(id, line.clone());
        Ok(line)
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.orders.rows.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Order", id));
        }
        tables.lines.rows.retain(|_, line| line.order_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, username: &str) -> Result<User> {
        validate_username(username).map_err(RepositoryError::InvalidData)?;
        let mut tables = self.tables.write().await;
        if tables.users.rows.values().any(|u| u.username == username) {
            return Err(RepositoryError::already_exists("User", username));
        }
        let id = tables.users.next_id();
        let user = User {
            id,
            username: username.to_string(),
        };
        tables.users.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        let mut tables = self.tables.write().await;
        tables.user_exists(profile.user_id)?;
        if tables
            .profiles
            .rows
            .values()
            .any(|p| p.user_id == profile.user_id)
        {
            return Err(RepositoryError::already_exists(
                "Profile",
                format!("user {}", profile.user_id),
            ));
        }
        let id = tables.profiles.next_id();
        let created = Profile::from_new(id, profile.clone());
        tables.profiles.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn create_posts(&self, user_id: i64, titles: &[String]) -> Result<Vec<Post>> {
        let mut tables = self.tables.write().await;
        tables.user_exists(user_id)?;
        let mut posts = Vec::with_capacity(titles.len());
        for title in titles {
            let id = tables.posts.next_id();
            let post = Post {
                id,
                title: title.clone(),
                user_id,
            };
            tables.posts.rows.insert(id, post.clone());
            posts.push(post);
        }
        Ok(posts)
    }

    async fn get_users_with_relations(&self) -> Result<Vec<UserWithRelations>> {
        let tables = self.tables.read().await;
        Ok(assemble_user_graphs(
            tables.users.all(),
            tables.profiles.all(),
            tables.posts.all(),
        ))
    }

    async fn get_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .rows
            .values()
            .filter_map(|post| {
                let user = tables.users.rows.get(&post.user_id)?;
                Some(PostWithAuthor {
                    post: post.clone(),
                    user: user.clone(),
                })
            })
            .collect())
    }

    async fn get_profiles_with_users_and_posts(
        &self,
        username: &str,
    ) -> Result<Vec<ProfileWithUser>> {
        let tables = self.tables.read().await;
        let users: Vec<User> = tables
            .users
            .rows
            .values()
            .filter(|u| u.username == username)
            .cloned()
            .collect();
        let Some(user_id) = users.first().map(|u| u.id) else {
            return Ok(Vec::new());
        };
        let profiles = tables
            .profiles
            .rows
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        let posts = tables
            .posts
            .rows
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(assemble_profile_graphs(profiles, users, posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::orders::OrderError;

    async fn product(repo: &InMemoryRepository, name: &str, price: i64) -> Product {
        repo.create_product(&NewProduct::new(name, "", price))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let first = product(&repo, "Mouse", 100).await;
        repo.delete_product(first.id).await.unwrap();

        let second = product(&repo, "Keyboard", 149).await;
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryRepository::new();
        let ghost = Product {
            id: 42,
            name: "Ghost".to_string(),
            description: String::new(),
            price: 1,
        };
        let result = repo.update_product(&ghost).await;
        assert_eq!(result, Err(RepositoryError::not_found("Product", 42)));
    }

    #[tokio::test]
    async fn test_add_or_increment_line() {
        let repo = InMemoryRepository::new();
        let mouse = product(&repo, "Mouse", 100).await;
        let order = repo.create_order(&NewOrder::new()).await.unwrap();

        let first = repo
            .add_or_increment_line(order.id, mouse.id, 1)
            .await
            .unwrap();
        let second = repo
            .add_or_increment_line(order.id, mouse.id, 4)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.count, 5);
        assert_eq!(second.unit_price, 100);
    }

    #[tokio::test]
    async fn test_line_operations_require_both_ends() {
        let repo = InMemoryRepository::new();
        let mouse = product(&repo, "Mouse", 100).await;
        let order = repo.create_order(&NewOrder::new()).await.unwrap();

        assert_eq!(
            repo.add_or_increment_line(7, mouse.id, 1).await,
            Err(RepositoryError::not_found("Order", 7))
        );
        assert_eq!(
            repo.add_line(order.id, 7, 1, 0).await,
            Err(RepositoryError::not_found("Product", 7))
        );
        assert!(matches!(
            repo.add_or_increment_line(order.id, mouse.id, -1).await,
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_add_line_rejects_duplicate_pair() {
        let repo = InMemoryRepository::new();
        let gift = product(&repo, "Gift", 0).await;
        let order = repo.create_order(&NewOrder::new()).await.unwrap();

        repo.add_line(order.id, gift.id, 1, 0).await.unwrap();
        let result = repo.add_line(order.id, gift.id, 1, 0).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_increment_past_i64_max_is_quantity_overflow() {
        let repo = InMemoryRepository::new();
        let mouse = product(&repo, "Mouse", 100).await;
        let order = repo.create_order(&NewOrder::new()).await.unwrap();
        repo.add_or_increment_line(order.id, mouse.id, i64::MAX)
            .await
            .unwrap();

        let result = repo.add_or_increment_line(order.id, mouse.id, 1).await;
        assert_eq!(
            result,
            Err(RepositoryError::from(OrderError::QuantityOverflow {
                order_id: order.id,
                product_id: mouse.id,
            }))
        );
    }

    #[tokio::test]
    async fn test_delete_product_keeps_orders_and_other_lines() {
        let repo = InMemoryRepository::new();
        let mouse = product(&repo, "Mouse", 100).await;
        let keyboard = product(&repo, "Keyboard", 149).await;
        for _ in 0..3 {
            let order = repo.create_order(&NewOrder::new()).await.unwrap();
            repo.add_or_increment_line(order.id, mouse.id, 1)
                .await
                .unwrap();
            repo.add_or_increment_line(order.id, keyboard.id, 1)
                .await
                .unwrap();
        }

        repo.delete_product(mouse.id).await.unwrap();

        let tables = repo.tables.read().await;
        assert_eq!(tables.orders.rows.len(), 3);
        assert!(tables.lines.rows.values().all(|l| l.product_id == keyboard.id));
        assert_eq!(tables.lines.rows.len(), 3);
    }

    #[tokio::test]
    async fn test_deletes_cascade_to_lines() {
        let repo = InMemoryRepository::new();
        let mouse = product(&repo, "Mouse", 100).await;
        let keyboard = product(&repo, "Keyboard", 149).await;
        let one = repo.create_order(&NewOrder::new()).await.unwrap();
        let two = repo.create_order(&NewOrder::new()).await.unwrap();
        for order in [&one, &two] {
            repo.add_or_increment_line(order.id, mouse.id, 1)
                .await
                .unwrap();
            repo.add_or_increment_line(order.id, keyboard.id, 1)
                .await
                .unwrap();
        }

        repo.delete_product(mouse.id).await.unwrap();
        repo.delete_order(two.id).await.unwrap();

        let graphs = repo.get_orders_with_products().await.unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].lines.len(), 1);
        assert_eq!(graphs[0].lines[0].product.id, keyboard.id);

        let reverse = repo
            .get_product_with_orders(keyboard.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reverse.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_user_constraints() {
        let repo = InMemoryRepository::new();
        let sam = repo.create_user("sam").await.unwrap();

        assert!(matches!(
            repo.create_user("sam").await,
            Err(RepositoryError::AlreadyExists { .. })
        ));
        assert!(matches!(
            repo.create_user("  ").await,
            Err(RepositoryError::InvalidData(_))
        ));

        repo.create_profile(&NewProfile::new(sam.id)).await.unwrap();
        assert!(matches!(
            repo.create_profile(&NewProfile::new(sam.id)).await,
            Err(RepositoryError::AlreadyExists { .. })
        ));
        assert!(matches!(
            repo.create_posts(99, &["Orphan".to_string()]).await,
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_profiles_for_username() {
        let repo = InMemoryRepository::new();
        let john = repo.create_user("john").await.unwrap();
        let sam = repo.create_user("sam").await.unwrap();
        repo.create_profile(&NewProfile::new(john.id).with_first_name("John"))
            .await
            .unwrap();
        repo.create_profile(&NewProfile::new(sam.id)).await.unwrap();
        repo.create_posts(john.id, &["SQLA 2.0".to_string()])
            .await
            .unwrap();

        let profiles = repo
            .get_profiles_with_users_and_posts("john")
            .await
            .unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].user.username, "john");
        assert_eq!(profiles[0].posts[0].title, "SQLA 2.0");

        assert!(repo
            .get_profiles_with_users_and_posts("nobody")
            .await
            .unwrap()
            .is_empty());
    }
}
