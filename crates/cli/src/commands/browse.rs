//! One-shot catalog commands.
//!
//! These never touch cart or wishlist state; use the shell for that.

use std::io::Write;

use mini_store_core::ProductId;
use mini_store_storefront::{Pager, ProductRepository, filter_by_title};

use crate::error::CliError;
use crate::render;

/// List one page of products, or the whole catalog with `all`.
///
/// # Errors
///
/// Returns an error if the repository request or writing output fails.
pub async fn products<R, W>(
    repo: &R,
    out: &mut W,
    page: u32,
    limit: u32,
    all: bool,
) -> Result<(), CliError>
where
    R: ProductRepository,
    W: Write,
{
    if all {
        let products = repo.list_products().await?;
        render::product_list(out, &products)?;
        return Ok(());
    }

    let products = repo.list_page(page, limit).await?;
    writeln!(out, "Page {page}")?;
    render::product_list(out, &products)?;

    let pager = Pager::new(limit);
    if let Some(next) = page.checked_add(1).filter(|_| pager.has_next(products.len())) {
        writeln!(out, "More products: --page {next}")?;
    }
    Ok(())
}

/// Show a single product.
///
/// # Errors
///
/// Returns an error if the product does not exist, the request fails, or
/// writing output fails.
pub async fn product<R, W>(repo: &R, out: &mut W, id: ProductId) -> Result<(), CliError>
where
    R: ProductRepository,
    W: Write,
{
    let product = repo.get_product(id).await?;
    render::product_detail(out, &product)?;
    Ok(())
}

/// List products whose title contains `query`.
///
/// # Errors
///
/// Returns an error if the repository request or writing output fails.
pub async fn search<R, W>(repo: &R, out: &mut W, query: &str) -> Result<(), CliError>
where
    R: ProductRepository,
    W: Write,
{
    let products = repo.list_products().await?;
    let matches = filter_by_title(&products, query);
    writeln!(out, "{} result(s) for \"{query}\"", matches.len())?;
    render::product_list(out, matches)?;
    Ok(())
}
