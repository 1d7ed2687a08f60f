//! Plain-text rendering of products, stores and receipts.

use std::io::{self, Write};

use mini_store_core::{CollectionLabel, Price, PriceOverflow, Product, Store};
use mini_store_storefront::OrderConfirmation;

/// Titles longer than this are cut in list views.
const TITLE_WIDTH: usize = 48;

fn truncate(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let mut short: String = title.chars().take(TITLE_WIDTH - 1).collect();
    short.push('…');
    short
}

/// One line per product.
pub fn product_list<'a, W, I>(out: &mut W, products: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Product>,
{
    let mut any = false;
    for product in products {
        any = true;
        writeln!(
            out,
            "#{:<4} {:<width$} {:>10}  [{}]",
            product.id,
            truncate(&product.title),
            product.price.to_string(),
            product.category,
            width = TITLE_WIDTH,
        )?;
    }
    if !any {
        writeln!(out, "No products found.")?;
    }
    Ok(())
}

pub fn product_detail<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    writeln!(out, "#{} {}", product.id, product.title)?;
    writeln!(out, "  Price:    {}", product.price)?;
    writeln!(out, "  Category: {}", product.category)?;
    if let Some(rating) = product.rating {
        writeln!(out, "  Rating:   {:.1} ({} reviews)", rating.rate, rating.count)?;
    }
    writeln!(out, "  Image:    {}", product.image)?;
    if !product.description.is_empty() {
        writeln!(out, "  {}", product.description)?;
    }
    Ok(())
}

/// Line items with quantities and the derived total.
pub fn store<W: Write, L: CollectionLabel>(out: &mut W, store: &Store<L>) -> io::Result<()> {
    if store.is_empty() {
        return writeln!(out, "Your {} is empty.", store.label());
    }

    for item in store.items() {
        writeln!(
            out,
            "#{:<4} {:<width$} x{:<3} @ {:>10} = {:>10}",
            item.id(),
            truncate(&item.product.title),
            item.quantity,
            item.product.price.to_string(),
            amount(item.line_total()),
            width = TITLE_WIDTH,
        )?;
    }
    writeln!(
        out,
        "Total: {} ({} items)",
        amount(store.total()),
        store.item_count()
    )
}

/// Formatted amount, or a marker when it could not be computed.
fn amount(price: Result<Price, PriceOverflow>) -> String {
    price.map_or_else(|_| "too large".to_string(), |price| price.to_string())
}

pub fn confirmation<W: Write>(out: &mut W, confirmation: &OrderConfirmation) -> io::Result<()> {
    writeln!(out, "Checkout successful! Thank you for your purchase.")?;
    writeln!(out, "  Order:    {}", confirmation.reference)?;
    writeln!(
        out,
        "  Customer: {} <{}>",
        confirmation.customer_name, confirmation.email
    )?;
    writeln!(
        out,
        "  Items:    {} ({} lines)",
        confirmation.item_count,
        confirmation.items.len()
    )?;
    writeln!(out, "  Total:    {}", confirmation.total)
}
