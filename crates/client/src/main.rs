//! storefront-client CLI entry point.

use clap::Parser;
use storefront_client::cli::{Cli, Commands, OutputFormat};
use storefront_client::client::StorefrontClient;
use storefront_client::output::{pretty, render};
use storefront_core::catalog::{CreateProductRequest, PatchProductRequest, UpdateProductRequest};
use storefront_core::orders::{AddLineRequest, CreateOrderRequest};

/// Print `value` as JSON, or rendered by `pretty`.
fn emit<T: serde::Serialize>(format: OutputFormat, value: &T, pretty: impl FnOnce(&T) -> String) {
    println!("{}", render(value, format, pretty));
}

fn print_probe(format: OutputFormat, label: &str, status: u16) {
    match format {
        OutputFormat::Json => println!("{{\"status\":{status}}}"),
        OutputFormat::Pretty => println!("{label}: {status}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = StorefrontClient::new(&cli.base_url).with_api_prefix(&cli.api_prefix);
    let format = cli.format;

    match cli.command {
        Commands::Products(products_cmd) => {
            use storefront_client::cli::products::ProductsAction;
            match products_cmd.action {
                ProductsAction::List => {
                    let products = client.list_products().await?;
                    emit(format, &products, |p| pretty::format_products(p));
                }
                ProductsAction::Create {
                    name,
                    description,
                    price,
                } => {
                    let product = client
                        .create_product(&CreateProductRequest::new(name, description, price))
                        .await?;
                    emit(format, &product, |p| {
                        format!("Created:\n{}", pretty::format_product(p))
                    });
                }
                ProductsAction::Get { id } => {
                    let product = client.get_product(id).await?;
                    emit(format, &product, pretty::format_product);
                }
                ProductsAction::Update {
                    id,
                    name,
                    description,
                    price,
                } => {
                    let product = client
                        .update_product(id, &UpdateProductRequest::new(name, description, price))
                        .await?;
                    emit(format, &product, |p| {
                        format!("Updated:\n{}", pretty::format_product(p))
                    });
                }
                ProductsAction::Patch {
                    id,
                    name,
                    description,
                    price,
                } => {
                    let mut patch = PatchProductRequest::new();
                    if let Some(name) = name {
                        patch = patch.with_name(name);
                    }
                    if let Some(description) = description {
                        patch = patch.with_description(description);
                    }
                    if let Some(price) = price {
                        patch = patch.with_price(price);
                    }
                    let product = client.patch_product(id, &patch).await?;
                    emit(format, &product, |p| {
                        format!("Updated:\n{}", pretty::format_product(p))
                    });
                }
                ProductsAction::Delete { id } => {
                    client.delete_product(id).await?;
                    if !cli.quiet {
                        println!("Deleted product {}", id);
                    }
                }
                ProductsAction::Orders { id } => {
                    let entry = client.product_orders(id).await?;
                    emit(format, &entry, pretty::format_product_orders);
                }
            }
        }
        Commands::Orders(orders_cmd) => {
            use storefront_client::cli::orders::OrdersAction;
            match orders_cmd.action {
                OrdersAction::List => {
                    let orders = client.list_orders().await?;
                    emit(format, &orders, |o| pretty::format_orders(o));
                }
                OrdersAction::Create { promocode } => {
                    let mut req = CreateOrderRequest::new();
                    if let Some(code) = promocode {
                        req = req.with_promocode(code);
                    }
                    let order = client.create_order(&req).await?;
                    emit(format, &order, |o| {
                        format!("Created:\n{}", pretty::format_order(o))
                    });
                }
                OrdersAction::Get { id } => {
                    let order = client.get_order(id).await?;
                    emit(format, &order, pretty::format_order_with_lines);
                }
                OrdersAction::Delete { id } => {
                    client.delete_order(id).await?;
                    if !cli.quiet {
                        println!("Deleted order {}", id);
                    }
                }
                OrdersAction::AddProduct {
                    order_id,
                    product_id,
                    count,
                } => {
                    let line = client
                        .add_product_to_order(
                            order_id,
                            &AddLineRequest::new(product_id).with_count(count),
                        )
                        .await?;
                    emit(format, &line, pretty::format_line);
                }
            }
        }
        Commands::Auth(auth_cmd) => {
            use storefront_client::cli::auth::AuthAction;
            match auth_cmd.action {
                AuthAction::Basic { username, password } => {
                    let reply = client.basic_auth(&username, &password).await?;
                    emit(format, &reply, pretty::format_auth_reply);
                }
                AuthAction::BasicUsername { username, password } => {
                    let reply = client.basic_auth_username(&username, &password).await?;
                    emit(format, &reply, pretty::format_auth_reply);
                }
                AuthAction::Token { token } => {
                    let reply = client.header_auth(&token).await?;
                    emit(format, &reply, pretty::format_auth_reply);
                }
                AuthAction::CookieFlow { token, cookie_name } => {
                    let session = client.login_cookie(&token, &cookie_name).await?;
                    if !cli.quiet {
                        println!("Logged in, session {}", session.session_id);
                    }
                    let check = client.check_cookie(&session).await?;
                    emit(format, &check, pretty::format_auth_reply);
                    let bye = client.logout_cookie(&session).await?;
                    emit(format, &bye, pretty::format_auth_reply);
                }
            }
        }
        Commands::Health(health_cmd) => {
            use storefront_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Livez => {
                    let status = client.livez().await?;
                    print_probe(format, "Liveness", status);
                }
                HealthAction::Readyz => {
                    let status = client.readyz().await?;
                    print_probe(format, "Readiness", status);
                }
                HealthAction::Index => {
                    let greeting = client.index().await?;
                    emit(format, &greeting, |g| g.message.clone());
                }
                HealthAction::Hello { name } => {
                    let greeting = client.hello(name.as_deref()).await?;
                    emit(format, &greeting, |g| g.message.clone());
                }
                HealthAction::Add { a, b } => {
                    let sum = client.add(a, b).await?;
                    emit(format, &sum, |s| format!("{} + {} = {}", s.a, s.b, s.result));
                }
            }
        }
    }

    Ok(())
}
