//! Page models rendered with Askama.
//!
//! Everything a template prints is prepared here as plain strings and
//! flags, so the templates stay free of formatting logic.

use askama::Template;
use axum::response::Html;
use chrono::{Datelike, Utc};

use super::flash::FlashMessage;
use super::AppState;
use crate::config::SITE_NAME;
use crate::domain::{Category, Product, ProductListing, Session};
use crate::errors::AppResult;

/// Render a page into an HTML response.
pub fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    Ok(Html(page.render()?))
}

/// Price as shown to customers, e.g. `R$ 35,00`.
pub fn format_price(price: f64) -> String {
    format!("R$ {:.2}", price).replace('.', ",")
}

/// Public URL of an uploaded image.
pub fn upload_url(filename: &str) -> String {
    format!("/static/uploads/{}", filename)
}

pub struct FlashView {
    pub level: &'static str,
    pub text: &'static str,
}

impl From<FlashMessage> for FlashView {
    fn from(message: FlashMessage) -> Self {
        Self {
            level: message.level().as_str(),
            text: message.text(),
        }
    }
}

pub struct NavCategory {
    pub name: String,
    pub slug: String,
}

/// Context shared by every page.
pub struct Layout {
    pub site_name: &'static str,
    pub current_year: i32,
    pub categories: Vec<NavCategory>,
    pub flash: Option<FlashView>,
    pub logged_in: bool,
}

impl Layout {
    /// Build the layout for a request.
    ///
    /// `logged_in` only reflects the cookie; admin pages are guarded
    /// separately.
    pub async fn load(
        state: &AppState,
        session: &Session,
        flash: Option<FlashMessage>,
    ) -> AppResult<Self> {
        let categories = state
            .catalog_service
            .list_categories()
            .await?
            .into_iter()
            .map(|c| NavCategory {
                name: c.name,
                slug: c.slug,
            })
            .collect();

        Ok(Self {
            site_name: SITE_NAME,
            current_year: Utc::now().year(),
            categories,
            flash: flash.map(FlashView::from),
            logged_in: !session.is_anonymous(),
        })
    }
}

pub struct ProductCard {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description.unwrap_or_default(),
            price: format_price(product.price),
            image_url: product.image_filename.as_deref().map(upload_url),
        }
    }
}

pub struct CategoryCard {
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl From<Category> for CategoryCard {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            slug: category.slug,
            description: category.description.unwrap_or_default(),
        }
    }
}

// Public pages

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
    pub featured: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "menu.html")]
pub struct MenuPage {
    pub layout: Layout,
    pub categories: Vec<CategoryCard>,
}

#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryPage {
    pub layout: Layout,
    pub category: CategoryCard,
    pub products: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "contato.html")]
pub struct ContactPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
}

// Admin pages

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardPage {
    pub layout: Layout,
    pub product_count: u64,
    pub category_count: u64,
}

pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category_name: String,
    pub image_url: Option<String>,
}

impl From<ProductListing> for ProductRow {
    fn from(listing: ProductListing) -> Self {
        Self {
            id: listing.product.id,
            name: listing.product.name,
            price: format_price(listing.product.price),
            category_name: listing.category.map(|c| c.name).unwrap_or_default(),
            image_url: listing.product.image_filename.as_deref().map(upload_url),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/products.html")]
pub struct ProductsPage {
    pub layout: Layout,
    pub products: Vec<ProductRow>,
}

pub struct CategoryOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

pub struct FileOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormPage {
    pub layout: Layout,
    pub title: &'static str,
    pub action: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub categories: Vec<CategoryOption>,
    pub files: Vec<FileOption>,
    /// Current image of an edited product
    pub image_url: Option<String>,
}

impl ProductFormPage {
    /// Empty form for a new product.
    pub fn new_product(layout: Layout, categories: Vec<Category>, files: Vec<String>) -> Self {
        Self {
            layout,
            title: "Adicionar Produto",
            action: "/admin/products/add".to_string(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            categories: category_options(categories, None),
            files: file_options(files, None),
            image_url: None,
        }
    }

    /// Form filled with an existing product.
    pub fn edit_product(
        layout: Layout,
        product: Product,
        categories: Vec<Category>,
        files: Vec<String>,
    ) -> Self {
        let image = product.image_filename.as_deref();
        Self {
            layout,
            title: "Editar Produto",
            action: format!("/admin/products/edit/{}", product.id),
            categories: category_options(categories, Some(product.category_id)),
            files: file_options(files, image),
            image_url: image.map(upload_url),
            price: format!("{:.2}", product.price),
            description: product.description.unwrap_or_default(),
            name: product.name,
        }
    }
}

fn category_options(categories: Vec<Category>, selected: Option<i32>) -> Vec<CategoryOption> {
    categories
        .into_iter()
        .map(|c| CategoryOption {
            selected: Some(c.id) == selected,
            id: c.id,
            name: c.name,
        })
        .collect()
}

fn file_options(files: Vec<String>, selected: Option<&str>) -> Vec<FileOption> {
    files
        .into_iter()
        .map(|name| FileOption {
            selected: Some(name.as_str()) == selected,
            name,
        })
        .collect()
}

pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl From<Category> for CategoryRow {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/categories.html")]
pub struct CategoriesPage {
    pub layout: Layout,
    pub categories: Vec<CategoryRow>,
}

#[derive(Template)]
#[template(path = "admin/category_form.html")]
pub struct CategoryFormPage {
    pub layout: Layout,
    pub title: &'static str,
    pub action: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl CategoryFormPage {
    pub fn new_category(layout: Layout) -> Self {
        Self {
            layout,
            title: "Adicionar Categoria",
            action: "/admin/categories/add".to_string(),
            name: String::new(),
            slug: String::new(),
            description: String::new(),
        }
    }

    pub fn edit_category(layout: Layout, category: Category) -> Self {
        Self {
            layout,
            title: "Editar Categoria",
            action: format!("/admin/categories/edit/{}", category.id),
            name: category.name,
            slug: category.slug,
            description: category.description.unwrap_or_default(),
        }
    }
}

pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

#[derive(Template)]
#[template(path = "admin/upload.html")]
pub struct UploadPage {
    pub layout: Layout,
    pub files: Vec<UploadedFile>,
}

impl UploadPage {
    pub fn new(layout: Layout, files: Vec<String>) -> Self {
        let files = files
            .into_iter()
            .map(|name| UploadedFile {
                url: upload_url(&name),
                name,
            })
            .collect();
        Self { layout, files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout {
            site_name: SITE_NAME,
            current_year: 2024,
            categories: vec![NavCategory {
                name: "Bolos Simples".to_string(),
                slug: "bolos-simples".to_string(),
            }],
            flash: Some(FlashMessage::ProductCreated.into()),
            logged_in: true,
        }
    }

    fn category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(35.0), "R$ 35,00");
        assert_eq!(format_price(4.5), "R$ 4,50");
    }

    #[test]
    fn test_edit_form_selects_current_values() {
        let product = Product {
            id: 7,
            name: "Bolo".to_string(),
            description: None,
            price: 12.5,
            category_id: 2,
            image_filename: Some("b.png".to_string()),
        };
        let page = ProductFormPage::edit_product(
            layout(),
            product,
            vec![category(1, "A"), category(2, "B")],
            vec!["a.png".to_string(), "b.png".to_string()],
        );

        assert_eq!(page.action, "/admin/products/edit/7");
        assert_eq!(page.price, "12.50");
        assert!(!page.categories[0].selected && page.categories[1].selected);
        assert!(!page.files[0].selected && page.files[1].selected);
        assert_eq!(page.image_url.as_deref(), Some("/static/uploads/b.png"));
    }

    #[test]
    fn test_layout_renders_site_name_and_flash() {
        let html = ContactPage { layout: layout() }.render().unwrap();

        assert!(html.contains("Delícias da Fa"));
        assert!(html.contains("Produto adicionado com sucesso!"));
        assert!(html.contains("/categoria/bolos-simples"));
    }

    #[test]
    fn test_product_text_is_escaped() {
        let page = HomePage {
            layout: layout(),
            featured: vec![ProductCard {
                name: "<script>".to_string(),
                description: String::new(),
                price: format_price(1.0),
                image_url: None,
            }],
        };
        let html = page.render().unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("script"));
    }
}
