//! Catalog browsing commands.

use blossom_client::api::{ApiError, ProductsFilter};
use blossom_client::state::AppState;

/// List all categories.
pub async fn categories(state: &AppState) -> Result<(), ApiError> {
    let categories = state.api().categories().await?;
    tracing::info!("{} categories", categories.len());
    for category in categories {
        let count = category.products_count.unwrap_or(0);
        tracing::info!("[{}] {} ({count} products)", category.slug, category.title);
    }
    Ok(())
}

/// List products matching the given filters.
pub async fn products(
    state: &AppState,
    category: Option<String>,
    search: Option<String>,
    in_stock: bool,
    ordering: Option<String>,
    page: Option<u32>,
) -> Result<(), ApiError> {
    let filter = ProductsFilter {
        category,
        search,
        in_stock,
        ordering,
        page,
        ..ProductsFilter::default()
    };
    let page = state.api().products(&filter).await?;

    tracing::info!("{} products total", page.count);
    for product in &page.results {
        let stock = if product.is_available { "" } else { " (out of stock)" };
        tracing::info!(
            "[{}] {} - {}{stock}",
            product.slug,
            product.title,
            product.price.format()
        );
    }
    if page.has_next() {
        tracing::info!("More results available; pass --page to continue");
    }
    Ok(())
}

/// Show one product's detail by slug.
pub async fn show(state: &AppState, slug: &str) -> Result<(), ApiError> {
    let product = state.api().product(slug).await?;

    tracing::info!("{} - {}", product.title, product.price.format());
    if let Some(old_price) = product.old_price {
        tracing::info!("Was {}", old_price.format());
    }
    if let Some(description) = &product.description {
        tracing::info!("{description}");
    }
    tracing::info!(
        "Orderable quantity: up to {}",
        product.effective_max()
    );
    Ok(())
}
