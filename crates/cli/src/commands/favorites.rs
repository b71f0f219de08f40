//! Local favorites commands.

use blossom_client::api::ApiError;
use blossom_client::state::AppState;

/// List favorited products.
pub fn show(state: &AppState) {
    let favorites = state.favorites();
    if favorites.items().is_empty() {
        tracing::info!("No favorites");
        return;
    }
    for product in favorites.items() {
        tracing::info!("[{}] {} - {}", product.slug, product.title, product.price.format());
    }
}

/// Fetch a product by slug and toggle its favorite flag.
pub async fn toggle(state: &AppState, slug: &str) -> Result<(), ApiError> {
    let product = state.api().product(slug).await?;
    let id = product.id;
    let title = product.title.clone();

    let mut favorites = state.favorites();
    favorites.toggle(&product);
    if favorites.is_favorite(id) {
        tracing::info!("Added {title} to favorites");
    } else {
        tracing::info!("Removed {title} from favorites");
    }
    Ok(())
}

/// Remove all favorites.
pub fn clear(state: &AppState) {
    state.favorites().clear();
    tracing::info!("Favorites cleared");
}
