// demos/cart_shell/src/main.rs

//! Small command-line shell over the cart manager.
//!
//! ```text
//! cart_shell                      # show the cart
//! cart_shell add <product> <qty>  # add, clamped to stock
//! cart_shell set <line> <qty>     # change a line's quantity
//! cart_shell rm <line>            # remove a line
//! cart_shell prune                # drop lines that ran out of stock
//! cart_shell clear
//! cart_shell checkout [address]
//! cart_shell list <resource> [search]
//! ```

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use farmacart::listing::{fetch_page, AdminResource, ListQuery};
use farmacart::models::{CartItemId, ProductId, ShippingAddressSelector};
use farmacart::{CartManager, CatalogGateway, ClientConfig, HttpGateway, OrderGateway, ProductLookup, Session};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<()> {
  // RUST_LOG narrows the INFO default; closed spans print their timings.
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  let config = ClientConfig::from_env().context("loading client configuration")?;
  let session = match &config.api_token {
    Some(token) => Session::with_token(token.clone()),
    None => Session::anonymous(),
  };
  let gateway = Arc::new(HttpGateway::new(&config, session.clone())?);

  let manager = Arc::new(CartManager::new(
    Arc::clone(&gateway) as Arc<dyn OrderGateway>,
    Arc::clone(&gateway) as Arc<dyn ProductLookup>,
    session.clone(),
    config.price_policy.clone(),
  ));

  let args: Vec<String> = std::env::args().skip(1).collect();
  let args: Vec<&str> = args.iter().map(String::as_str).collect();

  if let ["list", resource, rest @ ..] = args.as_slice() {
    let mut query = config.list_query();
    if let Some(term) = rest.first() {
      if let Some(term) = config.search_debouncer().settle(*term).await {
        query.set_search(term);
      }
    }
    return list(gateway.as_ref(), parse_resource(resource)?, &query).await;
  }

  if !session.is_authenticated() {
    bail!("set FARMACART_API_TOKEN to work with the cart");
  }
  manager.load_cart().await?;

  match args.as_slice() {
    [] | ["show"] => {}
    ["add", product, qty] => {
      let outcome = manager.add_to_cart(ProductId(product.parse()?), qty.parse()?).await?;
      match outcome.warning() {
        Some(partial) => println!("note: {}", partial),
        None => println!("added {}", outcome.units_added()),
      }
    }
    ["set", line, qty] => {
      let outcome = manager.update_quantity(&CartItemId::new(*line), qty.parse()?).await?;
      println!("{}", outcome);
    }
    ["rm", line] => manager.remove_item(&CartItemId::new(*line)).await?,
    ["prune"] => println!("removed {} line(s)", manager.prune_out_of_stock().await?),
    ["clear"] => manager.clear_cart().await?,
    ["checkout", rest @ ..] => {
      let shipping = match rest.first() {
        Some(id) => ShippingAddressSelector::Saved(id.parse()?),
        None => ShippingAddressSelector::AccountDefault,
      };
      let order = manager.checkout(shipping).await?;
      println!("order {} placed", order.order_id);
    }
    other => bail!("unrecognized command: {:?}", other),
  }

  print_cart(&manager);
  Ok(())
}

fn print_cart(manager: &CartManager) {
  let snapshot = manager.snapshot();
  if snapshot.is_empty() {
    println!("cart is empty");
    return;
  }
  for line in snapshot.items() {
    let price = manager
      .price_policy()
      .effective_price(line)
      .map(|p| p.to_string())
      .unwrap_or_else(|| "-".to_string());
    println!(
      "{:>8}  {:<40} {:>4} x {:>9}  (stock {})",
      line.cart_item_id, line.product.name, line.quantity, price, line.product.stock_count
    );
  }
  println!("{} item(s), total {}", manager.item_count(), manager.total());
}

fn parse_resource(name: &str) -> Result<AdminResource> {
  Ok(match name {
    "products" => AdminResource::Products,
    "categories" => AdminResource::Categories,
    "price-lists" => AdminResource::PriceLists,
    "sales-groups" => AdminResource::SalesGroups,
    "users" => AdminResource::Users,
    "orders" => AdminResource::Orders,
    other => return Err(anyhow!("unknown resource '{}'", other)),
  })
}

async fn list(gateway: &dyn CatalogGateway, resource: AdminResource, query: &ListQuery) -> Result<()> {
  let page = fetch_page::<serde_json::Value>(gateway, resource, query).await?;
  for row in &page.items {
    println!("{}", row);
  }
  println!("page {}/{} ({} total)", page.page, page.total_pages().max(1), page.total);
  Ok(())
}
