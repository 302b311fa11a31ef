//! Cart commands.

use anyhow::Result;
use rocket_cart::{Cart, CartStore, ProductId};
use serde_json::json;

use super::{AmountArgs, ProductArgs, ShowArgs};
use crate::context::Context;
use crate::output::format_price;

const COLUMNS: [&str; 5] = ["ID", "PRODUCT", "PRICE", "AMOUNT", "SUBTOTAL"];

/// Show the cart.
pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.cart();

    if args.count {
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "count": cart.len() }));
        } else {
            println!("{}", cart.len());
        }
        return Ok(());
    }

    print_cart(&cart, ctx);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let before = ctx.notifier.emitted();
    let spinner = ctx.output.spinner(&format!("Adding product {}...", args.id));
    store.add_product(args.id).await;
    spinner.finish_and_clear();

    if ctx.notifier.emitted() == before {
        if let Some(item) = store.cart().get(args.id) {
            ctx.output.success(&format!("Added {} (amount: {})", item.title, item.amount));
        }
    }
    report(&store, ctx);
    Ok(())
}

/// Remove a product's line.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let before = ctx.notifier.emitted();
    let title = product_title(&store.cart(), args.id);
    store.remove_product(args.id).await;

    if ctx.notifier.emitted() == before {
        ctx.output.success(&format!("Removed {}", title));
    }
    report(&store, ctx);
    Ok(())
}

/// Set a product's amount.
pub async fn update(args: AmountArgs, ctx: &Context) -> Result<()> {
    if args.amount <= 0 {
        ctx.output.warn(&format!(
            "Amount must be at least 1, got {}; cart unchanged",
            args.amount
        ));
        return Ok(());
    }

    let store = ctx.open_store()?;

    let before = ctx.notifier.emitted();
    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", args.id));
    store.update_product_amount(args.id, args.amount).await;
    spinner.finish_and_clear();

    if ctx.notifier.emitted() == before {
        ctx.output.success(&format!(
            "Set {} to {}",
            product_title(&store.cart(), args.id),
            args.amount
        ));
    }
    report(&store, ctx);
    Ok(())
}

fn product_title(cart: &Cart, id: ProductId) -> String {
    cart.get(id)
        .map(|item| item.title.clone())
        .unwrap_or_else(|| format!("product {}", id))
}

// JSON mode always ends with the cart as it now stands.
fn report(store: &CartStore, ctx: &Context) {
    if ctx.output.is_json() {
        print_cart(&store.cart(), ctx);
    }
}

/// JSON form of the cart printed by every cart command in `--json` mode.
pub fn cart_json(cart: &Cart) -> serde_json::Value {
    json!({
        "items": cart,
        "count": cart.len(),
        "units": cart.item_count(),
        "total": cart.total(),
    })
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&cart_json(cart));
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    let rows: Vec<[String; 5]> = cart
        .iter()
        .map(|item| {
            [
                item.id.to_string(),
                item.title.clone(),
                format_price(item.price),
                item.amount.to_string(),
                format_price(item.subtotal()),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|col| col.len());
    for row in &rows {
        for (width, col) in widths.iter_mut().zip(row) {
            *width = (*width).max(col.chars().count());
        }
    }

    ctx.output.header("Cart");
    ctx.output.table_row(&COLUMNS, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }
    println!();
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &format_price(cart.total()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_cart::{LineItem, Product};

    fn line(id: u64, price: f64, amount: i64) -> LineItem {
        LineItem {
            amount,
            ..LineItem::from_product(Product::new(id, format!("Shoe {id}"), price, "img"))
        }
    }

    #[test]
    fn test_cart_json_shape() {
        let cart = Cart::from_items(vec![line(1, 100.0, 2), line(2, 50.0, 1)]);

        let value = cart_json(&cart);
        assert_eq!(value["count"], 2);
        assert_eq!(value["units"], 3);
        assert_eq!(value["total"], 250.0);
        assert_eq!(value["items"][0]["id"], 1);
        assert_eq!(value["items"][0]["amount"], 2);
        assert_eq!(value["items"][1]["title"], "Shoe 2");
    }

    #[test]
    fn test_empty_cart_json() {
        let value = cart_json(&Cart::new());
        assert_eq!(value, json!({ "items": [], "count": 0, "units": 0, "total": 0.0 }));
    }

    #[tokio::test]
    async fn test_update_below_one_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::in_dir(dir.path());

        let args = AmountArgs {
            id: ProductId::new(7),
            amount: 0,
        };
        update(args, &ctx).await.unwrap();

        assert!(!ctx.storage_path().exists());
        assert_eq!(ctx.notifier.emitted(), 0);
    }

    #[tokio::test]
    async fn test_remove_absent_product_emits_notice() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::in_dir(dir.path());

        remove(ProductArgs { id: ProductId::new(7) }, &ctx).await.unwrap();

        assert_eq!(ctx.notifier.emitted(), 1);
        assert!(!ctx.storage_path().exists());
    }

    #[tokio::test]
    async fn test_show_reads_persisted_cart() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::in_dir(dir.path());
        let snapshot = serde_json::to_string(&Cart::from_items(vec![line(3, 10.0, 1)])).unwrap();
        rocket_cache::KeyValueStore::set(
            &rocket_cache::FileStore::open(ctx.storage_path()),
            &rocket_cart::cart_storage_key(),
            &snapshot,
        )
        .unwrap();

        let store = ctx.open_store().unwrap();
        assert_eq!(store.cart().amount_of(ProductId::new(3)), 1);
        show(ShowArgs { count: false }, &ctx).await.unwrap();
        assert_eq!(ctx.notifier.emitted(), 0);
    }
}
