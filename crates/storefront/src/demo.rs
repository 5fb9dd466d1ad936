//! Seed-and-print scenarios run from the command line.
//!
//! Each scenario writes through the repositories, reads the resulting graph
//! back and renders it as text.

use clap::ValueEnum;

use storefront_core::accounts::{
    NewProfile, PostWithAuthor, ProfileWithUser, User, UserWithRelations,
};
use storefront_core::catalog::NewProduct;
use storefront_core::orders::{NewOrder, OrderWithLines};
use storefront_core::storage::{RepositoryError, UserRepository};

use crate::state::AppState;

/// Which scenario `storefront demo` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Users with profiles and posts, loaded every way the repository offers.
    Relations,
    /// Two orders over three products, shown with counts and unit prices.
    M2m,
    /// Adds a free gift line to every existing order.
    Gift,
}

/// Runs a scenario and returns the rendered report.
pub async fn run(scenario: Scenario, state: &AppState) -> anyhow::Result<String> {
    tracing::info!(?scenario, "Running demo scenario");
    match scenario {
        Scenario::Relations => relations(state).await,
        Scenario::M2m => m2m(state).await,
        Scenario::Gift => gift(state).await,
    }
}

async fn get_or_create_user(users: &dyn UserRepository, username: &str) -> anyhow::Result<User> {
    match users.get_user_by_username(username).await? {
        Some(user) => Ok(user),
        None => Ok(users.create_user(username).await?),
    }
}

async fn relations(state: &AppState) -> anyhow::Result<String> {
    let users = state.users.as_ref();
    let sam = get_or_create_user(users, "sam").await?;
    let john = get_or_create_user(users, "john").await?;

    for user in [&sam, &john] {
        match users
            .create_profile(&NewProfile::new(user.id).with_first_name(&user.username))
            .await
        {
            Ok(_) => {}
            Err(RepositoryError::AlreadyExists { .. }) => {
                tracing::debug!(username = %user.username, "Profile already present");
            }
            Err(e) => return Err(e.into()),
        }
    }

    users
        .create_posts(sam.id, &["SQLA 2.0".to_string(), "SQLA Joins".to_string()])
        .await?;
    users
        .create_posts(
            john.id,
            &["FastAPI Intro".to_string(), "FastAPI Advanced".to_string()],
        )
        .await?;

    let mut out = String::new();
    out.push_str(&render_users(&users.get_users_with_relations().await?));
    out.push_str(&render_posts(&users.get_posts_with_authors().await?));
    out.push_str(&render_profiles(
        &users.get_profiles_with_users_and_posts("john").await?,
    ));
    Ok(out)
}

async fn m2m(state: &AppState) -> anyhow::Result<String> {
    let order_one = state.orders.create_order(&NewOrder::new()).await?;
    let order_promo = state
        .orders
        .create_order(&NewOrder::new().with_promocode("promo"))
        .await?;

    let mouse = state
        .products
        .create_product(&NewProduct::new("Mouse", "Gaming mouse", 100))
        .await?;
    let keyboard = state
        .products
        .create_product(&NewProduct::new("Keyboard", "Gaming keyboard", 149))
        .await?;
    let display = state
        .products
        .create_product(&NewProduct::new("Display", "Gaming display", 299))
        .await?;

    for (order_id, product_id) in [
        (order_one.id, mouse.id),
        (order_one.id, keyboard.id),
        (order_promo.id, keyboard.id),
        (order_promo.id, display.id),
    ] {
        state
            .orders
            .add_or_increment_line(order_id, product_id, 1)
            .await?;
    }

    render_orders(&state.orders.get_orders_with_products().await?)
}

async fn gift(state: &AppState) -> anyhow::Result<String> {
    let orders = state.orders.get_orders_with_products().await?;
    let gift = state
        .products
        .create_product(&NewProduct::new("Gift", "Gift for you", 0))
        .await?;

    for order in &orders {
        state.orders.add_line(order.order.id, gift.id, 1, 0).await?;
    }
    tracing::info!(orders = orders.len(), product_id = gift.id, "Added gift lines");

    render_orders(&state.orders.get_orders_with_products().await?)
}

fn render_users(users: &[UserWithRelations]) -> String {
    let mut out = String::new();
    for entry in users {
        let first_name = entry
            .profile
            .as_ref()
            .and_then(|p| p.first_name.as_deref())
            .unwrap_or("-");
        out.push_str(&format!(
            "user {} {} (first name: {first_name})\n",
            entry.user.id, entry.user.username
        ));
        for post in &entry.posts {
            out.push_str(&format!("- {} {}\n", post.id, post.title));
        }
    }
    out
}

fn render_posts(posts: &[PostWithAuthor]) -> String {
    posts
        .iter()
        .map(|p| format!("post {} {} by {}\n", p.post.id, p.post.title, p.user.username))
        .collect()
}

fn render_profiles(profiles: &[ProfileWithUser]) -> String {
    let mut out = String::new();
    for entry in profiles {
        let titles: Vec<&str> = entry.posts.iter().map(|p| p.title.as_str()).collect();
        out.push_str(&format!(
            "profile {} of {}: {}\n",
            entry.profile.id,
            entry.user.username,
            titles.join(", ")
        ));
    }
    out
}

fn render_orders(orders: &[OrderWithLines]) -> anyhow::Result<String> {
    let mut out = String::new();
    for entry in orders {
        let order = &entry.order;
        out.push_str(&format!(
            "order {} promocode={} created_at={} products:\n",
            order.id,
            order.promocode.as_deref().unwrap_or("-"),
            order.created_at.to_rfc3339(),
        ));
        for line in &entry.lines {
            out.push_str(&format!(
                "- {} {} {} qty: {}\n",
                line.product.id,
                line.product.name,
                line.association.unit_price,
                line.association.count
            ));
        }
        out.push_str(&format!("  total: {}\n", entry.total()?));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relations_scenario() {
        let state = AppState::default();
        let report = run(Scenario::Relations, &state).await.unwrap();

        assert!(report.contains("user 1 sam (first name: sam)"));
        assert!(report.contains("post 3 FastAPI Intro by john"));
        assert!(report.contains("of john: FastAPI Intro, FastAPI Advanced"));

        let users = state.users.get_users_with_relations().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.profile.is_some() && u.posts.len() == 2));
    }

    #[tokio::test]
    async fn test_relations_scenario_reuses_existing_users() {
        let state = AppState::default();
        run(Scenario::Relations, &state).await.unwrap();
        run(Scenario::Relations, &state).await.unwrap();

        let users = state.users.get_users_with_relations().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].posts.len(), 4);
    }

    #[tokio::test]
    async fn test_m2m_then_gift() {
        let state = AppState::default();
        let report = run(Scenario::M2m, &state).await.unwrap();
        assert!(report.contains("promocode=promo"));
        assert!(report.contains("Display 299 qty: 1"));

        let report = run(Scenario::Gift, &state).await.unwrap();
        assert_eq!(report.matches("Gift 0 qty: 1").count(), 2);

        let orders = state.orders.get_orders_with_products().await.unwrap();
        assert_eq!(orders[0].total(), Ok(249));
        assert_eq!(orders[1].total(), Ok(448));
        assert!(orders.iter().all(|o| o.lines.len() == 3));
    }

    #[tokio::test]
    async fn test_gift_twice_adds_a_second_gift_product() {
        let state = AppState::default();
        run(Scenario::M2m, &state).await.unwrap();
        run(Scenario::Gift, &state).await.unwrap();
        run(Scenario::Gift, &state).await.unwrap();

        let orders = state.orders.get_orders_with_products().await.unwrap();
        assert!(orders.iter().all(|o| o.lines.len() == 4));
    }

    #[tokio::test]
    async fn test_overflowing_order_total_is_reported() {
        let state = AppState::default();
        run(Scenario::M2m, &state).await.unwrap();

        let orders = state.orders.get_orders_with_products().await.unwrap();
        let first = &orders[0];
        state
            .orders
            .add_or_increment_line(
                first.order.id,
                first.lines[0].product.id,
                100_000_000_000_000_000,
            )
            .await
            .unwrap();

        let err = run(Scenario::Gift, &state).await.unwrap_err();
        assert!(err.to_string().contains("Total overflow for order"));
    }
}
