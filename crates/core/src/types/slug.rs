//! URL-safe identifiers derived from display names.
//!
//! Two derivations exist and both must stay stable, since slugs end up
//! persisted inside catalog documents:
//!
//! - [`product_slug`]: lowercase, every run of whitespace replaced by `-`.
//!   Other characters (accents, punctuation) are kept.
//! - [`collection_slug`]: the product slug with every character outside
//!   `[a-z0-9-]` removed.
//!
//! Whitespace matches the ECMAScript `\s` class (Unicode `White_Space` plus
//! U+FEFF) so documents written by the browser storefront slug identically.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{FEFF}]+").expect("valid whitespace pattern"));

static NON_SLUG_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid slug pattern"));

/// Slug used for product URLs.
///
/// ```
/// use heen_core::product_slug;
///
/// assert_eq!(product_slug("Sauvage  Elixir"), "sauvage-elixir");
/// assert_eq!(product_slug("Khamrah Qahwa"), "khamrah-qahwa");
/// ```
#[must_use]
pub fn product_slug(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Slug used as a collection identifier.
///
/// ```
/// use heen_core::collection_slug;
///
/// assert_eq!(collection_slug("Coleção Árabe"), "coleo-rabe");
/// ```
#[must_use]
pub fn collection_slug(name: &str) -> String {
    let hyphenated = product_slug(name);
    NON_SLUG_CHAR.replace_all(&hyphenated, "").into_owned()
}
