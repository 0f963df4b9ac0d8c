use anyhow::Result;
use shoesx_core::cart::{CartEngine, ProductRef};

use super::AppContext;

pub fn show(ctx: &AppContext) -> Result<()> {
    print_cart(&ctx.cart_engine()?);
    Ok(())
}

pub fn add(ctx: &AppContext, product: &ProductRef, size: &str, quantity: u32) -> Result<()> {
    let mut cart = ctx.cart_engine()?;
    cart.add_item(product, size, quantity)?;
    print_cart(&cart);
    Ok(())
}

pub fn remove(ctx: &AppContext, product_id: &str, size: &str) -> Result<()> {
    let mut cart = ctx.cart_engine()?;
    cart.remove_item(product_id, size);
    print_cart(&cart);
    Ok(())
}

pub fn update(ctx: &AppContext, product_id: &str, size: &str, quantity: i64) -> Result<()> {
    let mut cart = ctx.cart_engine()?;
    cart.update_quantity(product_id, size, quantity);
    print_cart(&cart);
    Ok(())
}

pub fn clear(ctx: &AppContext) -> Result<()> {
    let mut cart = ctx.cart_engine()?;
    cart.clear();
    println!("Cart cleared.");
    Ok(())
}

pub fn print_cart(cart: &CartEngine) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in cart.items() {
        println!(
            "  {:<10} {:<24} size {:<5} x{:<3} ${:>9.2}",
            item.product_id,
            item.product_name,
            item.size,
            item.quantity,
            item.line_total()
        );
    }
    let summary = cart.summary();
    println!("{} item(s), total ${:.2}", summary.items_label(), summary.total);
    println!("Fit confidence {}% - {}", summary.fit_confidence, summary.shipping_label());
}
