//! CLI command implementations.

pub mod init;
pub mod price;
pub mod run;
pub mod scenarios;

pub use init::InitArgs;
pub use price::PriceArgs;
pub use run::RunArgs;
pub use scenarios::ScenariosArgs;

use std::collections::HashSet;

use crate::error::{CliError, CliResult};

/// Validates a strictly positive, finite value.
pub fn validate_positive(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CliError::InvalidArgument { name, value });
    }
    Ok(value)
}

/// Validates a non-negative, finite value.
pub fn validate_non_negative(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CliError::InvalidArgument { name, value });
    }
    Ok(value)
}

/// File-name-safe version of a scenario name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("scenario");
    }
    slug
}

/// One distinct file stem per name, in order.
///
/// Names whose slugs collide get `_2`, `_3`, ... suffixes.
pub fn unique_slugs<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let base = slugify(name);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}_{n}");
                n += 1;
            }
            slug
        })
        .collect()
}
