//! Command implementations.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod checkout;

use std::io::{self, BufRead, Write};

use heen_storefront::models::Product;
use thiserror::Error;

/// Errors raised by the CLI itself rather than the storefront.
#[derive(Debug, Error)]
pub enum CliError {
    /// The user declined a confirmation prompt.
    #[error("Operação cancelada.")]
    Aborted,

    /// No product with this id or slug.
    #[error("Produto não encontrado: {0}")]
    UnknownProduct(String),

    /// No collection with this id.
    #[error("Coleção não encontrada: {0}")]
    UnknownCollection(String),

    /// A seed file could not be parsed.
    #[error("invalid seed file: {0}")]
    Seed(String),
}

/// Ask a yes/no question on stdin unless `assume_yes` is set.
///
/// # Errors
///
/// Returns [`CliError::Aborted`] unless the answer starts with `s` or `y`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if assume_yes {
        return Ok(());
    }
    {
        let mut out = io::stdout().lock();
        write!(out, "{prompt} [s/N] ")?;
        out.flush()?;
    }
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if is_yes(&answer) {
        Ok(())
    } else {
        Err(CliError::Aborted.into())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().chars().next().map(|c| c.to_ascii_lowercase()),
        Some('s' | 'y')
    )
}

/// One-line product summary used by listings.
pub fn write_product_line(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "{:>14}  {:<28} {:<16} {:<10} {:>12}",
        product.id, product.name, product.brand, product.gender, product.price
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("s\n"));
        assert!(is_yes("Sim"));
        assert!(is_yes("yes"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm("Apagar?", true).is_ok());
    }

    #[test]
    fn test_product_line() {
        let doc = heen_storefront::catalog::default_catalog();
        let mut buf = Vec::new();
        write_product_line(&mut buf, doc.products.first().unwrap()).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.contains("Khamrah"));
        assert!(line.contains("R$ 289,90"));
    }
}
