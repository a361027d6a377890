//! Public storefront pages.

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::extractors::CurrentSession;
use crate::api::flash;
use crate::api::views::{
    render, CategoryCard, CategoryPage, ContactPage, HomePage, Layout, MenuPage, ProductCard,
};
use crate::api::AppState;
use crate::config::FEATURED_PRODUCTS_LIMIT;
use crate::errors::AppResult;

type Page = AppResult<(CookieJar, Html<String>)>;

/// Create storefront routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/menu", get(menu))
        .route("/categoria/:slug", get(category))
        .route("/contato", get(contact))
}

/// Home page with the featured products
pub async fn home(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    let featured = state
        .catalog_service
        .list_featured(FEATURED_PRODUCTS_LIMIT)
        .await?
        .into_iter()
        .map(ProductCard::from)
        .collect();

    Ok((jar, render(&HomePage { layout, featured })?))
}

/// Every category with its description
pub async fn menu(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    let categories = state
        .catalog_service
        .list_categories()
        .await?
        .into_iter()
        .map(CategoryCard::from)
        .collect();

    Ok((jar, render(&MenuPage { layout, categories })?))
}

/// One category and its products; unknown slugs are a 404
pub async fn category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(slug): Path<String>,
    jar: CookieJar,
) -> Page {
    let category = state.catalog_service.get_category_by_slug(&slug).await?;
    let products = state
        .catalog_service
        .list_products_in_category(category.id)
        .await?
        .into_iter()
        .map(ProductCard::from)
        .collect();

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    let page = CategoryPage {
        layout,
        category: category.into(),
        products,
    };

    Ok((jar, render(&page)?))
}

pub async fn contact(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;

    Ok((jar, render(&ContactPage { layout })?))
}
