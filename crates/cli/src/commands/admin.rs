//! Admin panel commands.
//!
//! All of these require a signed-in administrator (`heen auth login`).
//! Deletions, bulk price changes, seeding and resetting ask for confirmation
//! unless `--yes` is given.
//!
//! # Usage
//!
//! ```bash
//! heen admin product create --name "Khamrah Qahwa" --brand Lattafa \
//!     --gender Unissex --category Gourmand --price 349,90 \
//!     --notes "Café, Canela, Praliné" --image https://picsum.photos/600/800
//! heen admin product update 1 --price 299,90
//! heen admin brand create Rasasi
//! heen admin collection create "Verão" --description "Frescos e cítricos"
//! heen admin prices 199,90
//! heen admin settings --hero-image https://i.imgur.com/mWqyC7d.jpeg
//! heen admin seed catalog.yaml
//! heen admin reset
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use heen_core::{BrandId, CollectionId, Gender, Price, ProductId};
use heen_storefront::catalog::{CatalogError, parse_document};
use heen_storefront::{AppError, AppState};
use heen_storefront::models::{CatalogDocument, ProductDraft, parse_notes};
use heen_storefront::storage::Storage;
use tracing::info;

use super::{CliError, confirm, write_product_line};

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create, update or delete products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Create, update or delete brands
    Brand {
        #[command(subcommand)]
        action: BrandAction,
    },
    /// Create, update or delete collections
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Set every product to the same price, e.g. `199,90`
    Prices {
        price: String,
    },
    /// Change the logo or hero image (pass an empty string to clear)
    Settings {
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        hero_image: Option<String>,
    },
    /// Replace the whole catalog from a YAML or JSON file
    Seed {
        file: PathBuf,
    },
    /// Restore the built-in catalog
    Reset,
}

#[derive(Subcommand)]
pub enum ProductAction {
    Create(ProductFields),
    /// Change the given fields; others keep their values
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete {
        id: ProductId,
    },
}

#[derive(Subcommand)]
pub enum BrandAction {
    Create { name: String },
    Update { id: BrandId, name: String },
    Delete { id: BrandId },
}

#[derive(Subcommand)]
pub enum CollectionAction {
    Create {
        name: String,
        #[arg(short, long)]
        description: String,
    },
    /// Rename or re-describe a collection; its id never changes
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    Delete {
        id: String,
    },
}

/// Product form fields. All optional so `update` can change a subset;
/// `create` validates that the required ones are present.
#[derive(Args, Default)]
pub struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    category: Option<String>,
    /// Price, e.g. 249,90
    #[arg(long)]
    price: Option<Price>,
    /// Comma-separated notes, e.g. "Baunilha, Âmbar, Oud"
    #[arg(long)]
    notes: Option<String>,
    /// Image URL (`https://...` or `data:...`)
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Collection id; an empty string removes the product from its collection
    #[arg(long)]
    collection: Option<String>,
}

impl ProductFields {
    /// Overwrite the fields of `draft` that were given.
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(brand) = self.brand {
            draft.brand = brand;
        }
        if let Some(gender) = self.gender {
            draft.gender = gender;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(notes) = self.notes {
            draft.notes = parse_notes(&notes);
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(collection) = self.collection {
            draft.collection = Some(CollectionId::new(collection.trim()));
        }
    }
}

/// Run an `admin` subcommand.
///
/// # Errors
///
/// Returns an error if no administrator is signed in, validation fails, the
/// user declines a confirmation or output cannot be written.
pub fn run<S: Storage>(
    state: &mut AppState<S>,
    command: AdminCommand,
    assume_yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut panel = state.admin()?;
    let mut out = io::stdout().lock();

    match command {
        AdminCommand::Product { action } => match action {
            ProductAction::Create(fields) => {
                let mut draft = ProductDraft::default();
                fields.apply(&mut draft);
                let product = panel.create_product(draft)?;
                writeln!(out, "Produto criado:")?;
                write_product_line(&mut out, &product)?;
            }
            ProductAction::Update { id, fields } => {
                let current = panel
                    .catalog()
                    .product(id)
                    .ok_or_else(|| CliError::UnknownProduct(id.to_string()))?;
                let mut draft = ProductDraft::from(current);
                fields.apply(&mut draft);
                let product = panel.update_product(id, draft)?;
                writeln!(out, "Produto atualizado:")?;
                write_product_line(&mut out, &product)?;
            }
            ProductAction::Delete { id } => {
                confirm(
                    "Tem certeza que deseja excluir este produto?",
                    assume_yes,
                )?;
                match panel.delete_product(id)? {
                    Some(product) => writeln!(out, "Produto excluído: {}", product.name)?,
                    None => writeln!(out, "Nenhum produto com id {id}.")?,
                }
            }
        },
        AdminCommand::Brand { action } => match action {
            BrandAction::Create { name } => {
                let brand = panel.create_brand(&name)?;
                writeln!(out, "Marca criada: {} (id {})", brand.name, brand.id)?;
            }
            BrandAction::Update { id, name } => {
                let brand = panel.update_brand(id, &name)?;
                writeln!(out, "Marca atualizada: {}", brand.name)?;
            }
            BrandAction::Delete { id } => {
                confirm("Tem certeza que deseja excluir esta marca?", assume_yes)?;
                match panel.delete_brand(id)? {
                    Some(brand) => writeln!(out, "Marca excluída: {}", brand.name)?,
                    None => writeln!(out, "Nenhuma marca com id {id}.")?,
                }
            }
        },
        AdminCommand::Collection { action } => match action {
            CollectionAction::Create { name, description } => {
                let collection = panel.create_collection(&name, &description)?;
                writeln!(
                    out,
                    "Coleção criada: {} (id {})",
                    collection.name, collection.id
                )?;
            }
            CollectionAction::Update {
                id,
                name,
                description,
            } => {
                let id = CollectionId::new(id);
                let current = panel
                    .catalog()
                    .collection(&id)
                    .ok_or_else(|| CliError::UnknownCollection(id.to_string()))?;
                let name = name.unwrap_or_else(|| current.name.clone());
                let description = description.unwrap_or_else(|| current.description.clone());
                let collection = panel.update_collection(&id, &name, &description)?;
                writeln!(out, "Coleção atualizada: {}", collection.name)?;
            }
            CollectionAction::Delete { id } => {
                confirm("Tem certeza que deseja excluir esta coleção?", assume_yes)?;
                match panel.delete_collection(&CollectionId::new(&id))? {
                    Some(collection) => writeln!(out, "Coleção excluída: {}", collection.name)?,
                    None => writeln!(out, "Nenhuma coleção com id {id}.")?,
                }
            }
        },
        AdminCommand::Prices { price: input } => {
            let price = parse_bulk_price(&input)?;
            let count = panel.catalog().products.len();
            confirm(
                &format!("Alterar o preço de {count} produto(s) para {price}?"),
                assume_yes,
            )?;
            let price = panel.set_all_prices(&input)?;
            writeln!(out, "Todos os preços agora são {price}.")?;
        }
        AdminCommand::Settings { logo, hero_image } => {
            let mut settings = panel.catalog().site_settings.clone();
            if let Some(logo) = logo {
                settings.logo = logo;
            }
            if let Some(hero_image) = hero_image {
                settings.hero_image = hero_image;
            }
            let settings = panel.update_site_settings(settings)?;
            writeln!(out, "Logo:   {}", display_or_dash(&settings.logo))?;
            writeln!(out, "Banner: {}", display_or_dash(&settings.hero_image))?;
        }
        AdminCommand::Seed { file } => {
            let document = read_seed(&file)?;
            confirm(
                &format!(
                    "Substituir o catálogo por {} produto(s) de {}?",
                    document.products.len(),
                    file.display()
                ),
                assume_yes,
            )?;
            let products = document.products.len();
            panel.replace_catalog(document)?;
            info!(path = %file.display(), products, "Catalog seeded");
            writeln!(out, "Catálogo substituído ({products} produto(s)).")?;
        }
        AdminCommand::Reset => {
            confirm("Restaurar o catálogo padrão?", assume_yes)?;
            panel.reset_catalog()?;
            writeln!(out, "Catálogo padrão restaurado.")?;
        }
    }
    Ok(())
}

/// Validate a bulk price before asking for confirmation.
fn parse_bulk_price(input: &str) -> Result<Price, AppError> {
    Price::parse_positive(input)
        .map_err(|e| AppError::from(CatalogError::InvalidBulkPrice(e)))
}

/// Read a catalog document from a `.yaml`/`.yml` or JSON file.
fn read_seed(path: &Path) -> Result<CatalogDocument, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    parse_seed(path, &content).map_err(Into::into)
}

fn parse_seed(path: &Path, content: &str) -> Result<CatalogDocument, CliError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(content).map_err(|e| CliError::Seed(e.to_string()))
    } else {
        parse_document(content).map_err(|e| CliError::Seed(e.to_string()))
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
