//! Admin area handlers - Dashboard and catalog CRUD.
//!
//! Every route here sits behind the login middleware, and the admin service
//! checks the session again on each call.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use super::redirect_with_flash;
use crate::api::extractors::{CurrentSession, SubmittedForm};
use crate::api::flash::{self, FlashMessage};
use crate::api::views::{
    render, CategoriesPage, CategoryFormPage, CategoryRow, DashboardPage, Layout,
    ProductFormPage, ProductRow, ProductsPage,
};
use crate::api::AppState;
use crate::domain::{CategoryInput, ProductInput};
use crate::errors::AppResult;

type Page = AppResult<(CookieJar, Html<String>)>;
type Submitted = AppResult<(CookieJar, Redirect)>;

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/", get(dashboard))
        .route("/admin/products", get(list_products))
        .route("/admin/products/add", get(new_product).post(create_product))
        .route("/admin/products/edit/:id", get(edit_product).post(update_product))
        .route("/admin/products/delete/:id", post(delete_product))
        .route("/admin/categories", get(list_categories))
        .route("/admin/categories/add", get(new_category).post(create_category))
        .route("/admin/categories/edit/:id", get(edit_category).post(update_category))
        .route("/admin/categories/delete/:id", post(delete_category))
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let stats = state.admin_service.dashboard(&session).await?;

    let (jar, message) = flash::take(jar);
    let page = DashboardPage {
        layout: Layout::load(&state, &session, message).await?,
        product_count: stats.product_count,
        category_count: stats.category_count,
    };
    Ok((jar, render(&page)?))
}

// Products

pub async fn list_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let products = state
        .admin_service
        .list_products(&session)
        .await?
        .into_iter()
        .map(ProductRow::from)
        .collect();

    let (jar, message) = flash::take(jar);
    let page = ProductsPage {
        layout: Layout::load(&state, &session, message).await?,
        products,
    };
    Ok((jar, render(&page)?))
}

pub async fn new_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let categories = state.admin_service.list_categories(&session).await?;
    let files = state.upload_service.list_uploaded(&session).await?;

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    Ok((jar, render(&ProductFormPage::new_product(layout, categories, files))?))
}

pub async fn create_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    SubmittedForm(input): SubmittedForm<ProductInput>,
) -> Submitted {
    let result = state.admin_service.create_product(&session, input).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::ProductCreated,
        "/admin/products",
        "/admin/products/add",
    )
}

/// Edit form; a missing product is a 404 page
pub async fn edit_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Page {
    let product = state.admin_service.get_product(&session, id).await?;
    let categories = state.admin_service.list_categories(&session).await?;
    let files = state.upload_service.list_uploaded(&session).await?;

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    let page = ProductFormPage::edit_product(layout, product, categories, files);
    Ok((jar, render(&page)?))
}

pub async fn update_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
    SubmittedForm(input): SubmittedForm<ProductInput>,
) -> Submitted {
    let result = state.admin_service.update_product(&session, id, input).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::ProductUpdated,
        "/admin/products",
        &format!("/admin/products/edit/{id}"),
    )
}

pub async fn delete_product(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Submitted {
    let result = state.admin_service.delete_product(&session, id).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::ProductDeleted,
        "/admin/products",
        "/admin/products",
    )
}

// Categories

pub async fn list_categories(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    let categories = state
        .admin_service
        .list_categories(&session)
        .await?
        .into_iter()
        .map(CategoryRow::from)
        .collect();

    let (jar, message) = flash::take(jar);
    let page = CategoriesPage {
        layout: Layout::load(&state, &session, message).await?,
        categories,
    };
    Ok((jar, render(&page)?))
}

pub async fn new_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> Page {
    state.auth_service.require_authenticated(&session).await?;

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    Ok((jar, render(&CategoryFormPage::new_category(layout))?))
}

pub async fn create_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    SubmittedForm(input): SubmittedForm<CategoryInput>,
) -> Submitted {
    let result = state.admin_service.create_category(&session, input).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::CategoryCreated,
        "/admin/categories",
        "/admin/categories/add",
    )
}

/// Edit form; a missing category is a 404 page
pub async fn edit_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Page {
    let category = state.admin_service.get_category(&session, id).await?;

    let (jar, message) = flash::take(jar);
    let layout = Layout::load(&state, &session, message).await?;
    Ok((jar, render(&CategoryFormPage::edit_category(layout, category))?))
}

pub async fn update_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
    SubmittedForm(input): SubmittedForm<CategoryInput>,
) -> Submitted {
    let result = state.admin_service.update_category(&session, id, input).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::CategoryUpdated,
        "/admin/categories",
        &format!("/admin/categories/edit/{id}"),
    )
}

/// Refused with a message while products still use the category
pub async fn delete_category(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Submitted {
    let result = state.admin_service.delete_category(&session, id).await;
    redirect_with_flash(
        jar,
        result,
        FlashMessage::CategoryDeleted,
        "/admin/categories",
        "/admin/categories",
    )
}
