use std::sync::Arc;

use anyhow::Result;
use shoesx_application::CartSyncService;
use shoesx_infrastructure::WatchIdentityProvider;
use tokio::sync::Mutex;

use super::AppContext;
use super::cart::print_cart;

fn service(ctx: &AppContext, user: &str) -> Result<CartSyncService> {
    let identity = WatchIdentityProvider::new(Some(user.to_string()));
    Ok(CartSyncService::new(
        Arc::new(Mutex::new(ctx.cart_engine()?)),
        Arc::new(identity),
        Arc::new(ctx.remote_store()?),
    ))
}

/// Mirrors the local cart into `user`'s remote document.
pub async fn push(ctx: &AppContext, user: &str) -> Result<()> {
    let service = service(ctx, user)?;
    service.push().await;
    println!("Pushed cart for {}.", user);
    Ok(())
}

/// Replaces the local cart with `user`'s remote cart, if there is one.
pub async fn pull(ctx: &AppContext, user: &str) -> Result<()> {
    let service = service(ctx, user)?;
    service.on_auth_changed().await;
    print_cart(&*service.cart().lock().await);
    Ok(())
}
