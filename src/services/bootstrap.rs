//! Initial data for a fresh store.
//!
//! Every row is looked up by its natural key (username, slug, product name)
//! and only inserted when missing, so seeding can run on every start.

use std::sync::Arc;

use crate::domain::{CreateCategory, CreateProduct, CreateUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

struct SeedCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    category_slug: &'static str,
    image_filename: &'static str,
}

static SEED_CATEGORIES: [SeedCategory; 5] = [
    SeedCategory {
        name: "Bolos Simples",
        slug: "bolos-simples",
        description: "Bolos tradicionais com sabores clássicos e irresistíveis.",
    },
    SeedCategory {
        name: "Bolos com Cobertura",
        slug: "bolos-com-cobertura",
        description: "Bolos especiais com coberturas deliciosas e decorações caprichadas.",
    },
    SeedCategory {
        name: "Bolos Piscininha",
        slug: "bolos-piscininha",
        description: "Nossos famosos bolos piscininha com recheio cremoso e cobertura especial.",
    },
    SeedCategory {
        name: "Bolos Vulcão",
        slug: "bolos-vulcao",
        description: "Surpreendente bolo vulcão com recheio que derrete na boca.",
    },
    SeedCategory {
        name: "Bolos Recheados",
        slug: "bolos-recheados",
        description: "Bolos com camadas de recheios especiais para momentos inesquecíveis.",
    },
];

static SEED_PRODUCTS: [SeedProduct; 3] = [
    SeedProduct {
        name: "Bolo de Chocolate",
        description: "Bolo macio de chocolate, feito com cacau de qualidade e muito amor.",
        price: 35.0,
        category_slug: "bolos-simples",
        image_filename: "placeholder-bolo-simples1.jpg",
    },
    SeedProduct {
        name: "Bolo de Cenoura com Chocolate",
        description: "Tradicional bolo de cenoura com cobertura de chocolate cremoso.",
        price: 45.0,
        category_slug: "bolos-com-cobertura",
        image_filename: "placeholder-bolo-cobertura2.jpg",
    },
    SeedProduct {
        name: "Piscininha de Leite Ninho",
        description: "Bolo com recheio cremoso de leite ninho e cobertura especial.",
        price: 60.0,
        category_slug: "bolos-piscininha",
        image_filename: "placeholder-bolo-piscininha1.jpg",
    },
];

/// Rows inserted by one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub categories_created: usize,
    pub products_created: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        !self.admin_created && self.categories_created == 0 && self.products_created == 0
    }
}

/// Seeds the admin account and the sample catalog.
pub struct Bootstrap<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Bootstrap<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Insert whatever seed rows are missing, all in one transaction.
    pub async fn seed(&self, admin_username: &str, admin_password: &str) -> AppResult<SeedReport> {
        let admin_username = admin_username.to_string();
        let admin_password = admin_password.to_string();

        let report = with_transaction!(self.uow, |ctx| {
            let mut report = SeedReport::default();

            if ctx.users().find_by_username(&admin_username).await?.is_none() {
                ctx.users()
                    .create(CreateUser {
                        username: admin_username,
                        password: Password::new(&admin_password)?,
                    })
                    .await?;
                report.admin_created = true;
            }

            for seed in &SEED_CATEGORIES {
                if ctx.categories().find_by_slug(seed.slug).await?.is_some() {
                    continue;
                }
                ctx.categories()
                    .create(CreateCategory {
                        name: seed.name.to_string(),
                        slug: seed.slug.to_string(),
                        description: Some(seed.description.to_string()),
                    })
                    .await?;
                report.categories_created += 1;
            }

            for seed in &SEED_PRODUCTS {
                if ctx.products().find_by_name(seed.name).await?.is_some() {
                    continue;
                }
                let Some(category) = ctx.categories().find_by_slug(seed.category_slug).await?
                else {
                    tracing::warn!(slug = seed.category_slug, "Seed category missing, skipping product");
                    continue;
                };
                ctx.products()
                    .create(CreateProduct {
                        name: seed.name.to_string(),
                        description: Some(seed.description.to_string()),
                        price: seed.price,
                        category_id: category.id,
                        image_filename: Some(seed.image_filename.to_string()),
                    })
                    .await?;
                report.products_created += 1;
            }

            Ok::<_, AppError>(report)
        })?;

        if report.is_empty() {
            tracing::debug!("Seed data already present");
        } else {
            tracing::info!(
                admin_created = report.admin_created,
                categories = report.categories_created,
                products = report.products_created,
                "Seed data inserted"
            );
        }

        Ok(report)
    }
}
