//! Scripted shell sessions: browse, fill the cart and wishlist, check out.

use mini_store_cli::{Catalog, Shell};
use mini_store_core::{Product, ProductId};
use mini_store_integration_tests::{MockProductApi, fixture_products};
use mini_store_storefront::{CatalogApiConfig, CatalogClient, InMemoryCatalog, ProductRepository};

fn offline_catalog() -> InMemoryCatalog {
    let products: Vec<Product> = fixture_products()
        .into_iter()
        .map(|value| serde_json::from_value(value).expect("fixture product"))
        .collect();
    InMemoryCatalog::new(products)
}

/// Run `script` through a fresh shell and return it with everything it printed.
async fn run_script(script: &str) -> (Shell<InMemoryCatalog>, String) {
    let mut shell = Shell::new(offline_catalog(), 5);
    let mut out = Vec::new();
    shell
        .run(script.as_bytes(), &mut out)
        .await
        .expect("shell run");
    (shell, String::from_utf8(out).expect("utf-8 output"))
}

fn quantity(shell: &Shell<InMemoryCatalog>, id: i32) -> Option<u32> {
    shell
        .session()
        .cart()
        .get(ProductId::new(id))
        .map(|item| item.quantity)
}

#[tokio::test]
async fn test_add_twice_then_increase() {
    let (shell, out) = run_script("add 1\nadd 1\ninc 1\ncart\n").await;

    assert_eq!(quantity(&shell, 1), Some(3));
    assert_eq!(shell.session().cart().items().len(), 1);
    assert!(out.contains("Added \"Fjallraven Backpack\" to your cart (quantity 2)."));
    assert!(out.contains("Total: $329.85 (3 items)"));
}

#[tokio::test]
async fn test_decrease_to_zero_removes_line() {
    let (shell, out) = run_script("add 2\ndec 2\n").await;

    assert!(shell.session().cart().is_empty());
    assert!(out.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let (shell, out) = run_script("add 1\nadd 3\nclear\n").await;

    assert!(shell.session().cart().is_empty());
    assert!(out.contains("Your cart has been cleared."));
}

#[tokio::test]
async fn test_remove_unknown_line_is_a_no_op() {
    let (shell, out) = run_script("add 1\nremove 4\n").await;

    assert_eq!(quantity(&shell, 1), Some(1));
    assert!(out.contains("Product 4 is not in your cart."));
}

#[tokio::test]
async fn test_cart_and_wishlist_are_independent() {
    let (shell, _) = run_script("add 1\nwish 1\nwish 5\nwclear\n").await;

    assert_eq!(quantity(&shell, 1), Some(1));
    assert!(shell.session().wishlist().is_empty());
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let (shell, out) =
        run_script("add 1\nadd 7\ncheckout Jane Doe jane@example.com\ncart\n").await;

    assert!(shell.session().cart().is_empty());
    assert!(out.contains("Checkout successful! Thank you for your purchase."));
    assert!(out.contains("Jane Doe <jane@example.com>"));
    assert!(out.contains("Total:    $119.94"));
}

#[tokio::test]
async fn test_checkout_validation_keeps_cart() {
    let (shell, out) = run_script(
        "checkout Jane jane@example.com\nadd 1\ncheckout jane@example.com\ncheckout Jane jane@\n",
    )
    .await;

    assert_eq!(quantity(&shell, 1), Some(1));
    assert!(out.contains("error: Your cart is empty. Please add products to continue."));
    assert!(out.contains("error: All fields must be filled."));
    assert!(out.contains("error: Invalid email format."));
}

#[tokio::test]
async fn test_wishlist_checkout() {
    let (shell, out) = run_script("wish 6\nwinc 6\nwcheckout Ana ana@example.com\n").await;

    assert!(shell.session().wishlist().is_empty());
    assert!(out.contains("Total:    $336.00"));
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() {
    let (shell, out) = run_script("frobnicate\nadd\nadd 404\nadd x\nadd 2\n").await;

    assert_eq!(quantity(&shell, 2), Some(1));
    assert!(out.contains("error: Unknown command `frobnicate`"));
    assert!(out.contains("error: Invalid product id `x`"));
    assert_eq!(out.matches("error:").count(), 4);
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let (shell, _) = run_script("add 1\nquit\nadd 2\n").await;

    assert_eq!(quantity(&shell, 1), Some(1));
    assert_eq!(quantity(&shell, 2), None);
}

#[tokio::test]
async fn test_paging_commands() {
    let (_, out) = run_script("prev\nlist\nnext\nnext\nprev\n").await;

    assert!(out.contains("You are on the first page."));
    assert!(out.contains("Page 2"));
    assert!(out.contains("You are on the last page."));
    assert_eq!(out.matches("Page 1").count(), 2);
}

#[tokio::test]
async fn test_more_accumulates_feed() {
    let (_, out) = run_script("more\nmore\nmore\n").await;

    assert!(out.contains("End of catalog (7 products)."));
    assert!(out.contains("No more products."));
}

#[tokio::test]
async fn test_search_records_query() {
    let (shell, out) = run_script("search SLIM fit\n").await;

    assert_eq!(shell.session().search().query(), "SLIM fit");
    assert!(out.contains("2 result(s) for \"SLIM fit\""));
}

#[tokio::test]
async fn test_session_over_http() {
    let api = MockProductApi::start().await;
    let client = CatalogClient::new(&CatalogApiConfig::new(api.base_url())).expect("client");

    let mut shell = Shell::new(Catalog::Remote(client), 5);
    let mut out = Vec::new();
    shell
        .run(&b"add 3\nadd 3\nshow 42\nadd 3\n"[..], &mut out)
        .await
        .expect("shell run");

    let line = shell
        .session()
        .cart()
        .get(ProductId::new(3))
        .expect("jacket in cart");
    assert_eq!(line.quantity, 3);
    assert_eq!(
        shell.session().cart().total().expect("total").to_string(),
        "$167.97"
    );

    // product 3 is fetched once, the unknown product once
    assert_eq!(api.request_count(), 2);
}

#[tokio::test]
async fn test_oversized_price_does_not_end_the_session() {
    let mut products: Vec<Product> = offline_catalog()
        .list_products()
        .await
        .expect("fixture products");
    products[0].price = "70000000000000000000000000000".parse().expect("price");

    let mut shell = Shell::new(InMemoryCatalog::new(products), 5);
    let mut out = Vec::new();
    shell
        .run(
            &b"add 1\ninc 1\ncart\ncheckout Ana ana@example.com\nremove 1\nadd 7\ncheckout Ana ana@example.com\n"[..],
            &mut out,
        )
        .await
        .expect("shell run");
    let out = String::from_utf8(out).expect("utf-8 output");

    assert!(out.contains("Total: too large (2 items)"));
    assert!(out.contains("error: The order total is too large to process."));
    assert!(out.contains("Checkout successful!"));
    assert!(shell.session().cart().is_empty());
}
