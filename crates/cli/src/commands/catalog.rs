//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! heen catalog list --brand Lattafa --gender Masculino
//! heen catalog list --query oud --max-price 300
//! heen catalog show club-de-nuit-intense
//! heen catalog facets
//! heen catalog best-sellers
//! heen collection show colecao_arabe
//! ```

use std::io::{self, Write};

use clap::{Args, Subcommand};
use heen_core::{CollectionId, Gender, Price, ProductId};
use heen_storefront::AppState;
use heen_storefront::models::Product;
use heen_storefront::search::{CollectionView, Facets, HOME_BEST_SELLERS, ProductFilter, best_sellers};
use heen_storefront::storage::Storage;

use super::{CliError, write_product_line};

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally filtered
    List(FilterArgs),
    /// Show one product by id or slug
    Show {
        /// Product id or slug
        product: String,
    },
    /// List the values available for filtering
    Facets,
    /// Show the home page best sellers
    BestSellers {
        #[arg(short, long, default_value_t = HOME_BEST_SELLERS)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum CollectionCommand {
    /// Show a collection and its products
    Show {
        /// Collection id, e.g. `colecao_arabe`
        id: String,
    },
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Brand name (repeatable)
    #[arg(short, long = "brand")]
    brands: Vec<String>,

    /// Gender: Feminino, Masculino or Unissex (repeatable)
    #[arg(short, long = "gender")]
    genders: Vec<Gender>,

    /// Category (repeatable)
    #[arg(short, long = "category")]
    categories: Vec<String>,

    /// Highest price, e.g. 250 or 249,90
    #[arg(long)]
    max_price: Option<Price>,

    /// Free-text search over name, brand, category, notes and description
    #[arg(short, long)]
    query: Option<String>,
}

impl From<FilterArgs> for ProductFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            brands: args.brands.into_iter().collect(),
            genders: args.genders.into_iter().collect(),
            categories: args.categories.into_iter().collect(),
            max_price: args.max_price,
            query: args.query,
        }
    }
}

/// Run a `catalog` subcommand.
///
/// # Errors
///
/// Returns an error if the product is unknown or output cannot be written.
pub fn run<S: Storage>(
    state: &AppState<S>,
    command: CatalogCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    let document = state.catalog().document();

    match command {
        CatalogCommand::List(args) => {
            let filter = ProductFilter::from(args);
            let products = state.search(&filter);
            for product in &products {
                write_product_line(&mut out, product)?;
            }
            writeln!(out, "{} produto(s)", products.len())?;
        }
        CatalogCommand::Show { product } => {
            let found = product
                .parse::<ProductId>()
                .ok()
                .and_then(|id| document.product(id))
                .or_else(|| document.product_by_slug(&product))
                .ok_or(CliError::UnknownProduct(product))?;
            write_product_details(&mut out, found)?;
        }
        CatalogCommand::Facets => {
            let facets = Facets::from_document(document);
            let brands: Vec<&str> = facets.brands.iter().map(|b| b.name.as_str()).collect();
            let genders: Vec<&str> = facets.genders.iter().map(|g| g.as_str()).collect();
            writeln!(out, "Marcas:     {}", brands.join(", "))?;
            writeln!(out, "Gêneros:    {}", genders.join(", "))?;
            writeln!(out, "Categorias: {}", facets.categories.join(", "))?;
        }
        CatalogCommand::BestSellers { limit } => {
            for product in best_sellers(state.catalog().products(), limit) {
                write_product_line(&mut out, product)?;
            }
        }
    }
    Ok(())
}

/// Run a `collection` subcommand.
///
/// # Errors
///
/// Returns an error if the collection is unknown or output cannot be written.
pub fn run_collection<S: Storage>(
    state: &AppState<S>,
    command: CollectionCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    match command {
        CollectionCommand::Show { id } => {
            let view = CollectionView::find(state.catalog().document(), &CollectionId::new(&id))
                .ok_or(CliError::UnknownCollection(id))?;
            writeln!(out, "{}", view.collection.name)?;
            writeln!(out, "{}", view.collection.description)?;
            writeln!(out)?;
            for product in &view.products {
                write_product_line(&mut out, product)?;
            }
        }
    }
    Ok(())
}

fn write_product_details(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "{} ({})", product.name, product.brand)?;
    writeln!(out, "  id:         {}", product.id)?;
    writeln!(out, "  slug:       {}", product.slug)?;
    writeln!(out, "  preço:      {}", product.price)?;
    writeln!(out, "  gênero:     {}", product.gender)?;
    writeln!(out, "  categoria:  {}", product.category)?;
    writeln!(out, "  notas:      {}", product.notes.join(", "))?;
    writeln!(out, "  avaliação:  {:.1}", product.rating)?;
    if let Some(collection) = &product.collection {
        writeln!(out, "  coleção:    {collection}")?;
    }
    writeln!(out, "  imagem:     {}", product.image)?;
    if !product.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", product.description)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_into_filter() {
        let args = FilterArgs {
            brands: vec!["Lattafa".to_string(), "Lattafa".to_string()],
            genders: vec![Gender::Unissex],
            ..FilterArgs::default()
        };
        let filter = ProductFilter::from(args);
        assert_eq!(filter.brands.len(), 1);
        assert!(filter.has_active_filters());
        assert!(filter.query.is_none());
    }

    #[test]
    fn test_product_details() {
        let doc = heen_storefront::catalog::default_catalog();
        let mut buf = Vec::new();
        write_product_details(&mut buf, doc.product_by_slug("yara").unwrap()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Yara (Lattafa)"));
        assert!(text.contains("coleção:    colecao_arabe"));
    }
}
