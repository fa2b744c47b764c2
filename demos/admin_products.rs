//! Admin product screen example.
//!
//! Fetches the catalog and the store stats concurrently, then drives the
//! product list screen the way the admin UI does: search, filter, sort,
//! and a CSV export.
//!
//! Run with: cargo run --example admin_products
//!
//! Requires .env file with:
//! - STOREFRONT_URL
//! - STOREFRONT_EMAIL
//! - STOREFRONT_PASSWORD

use std::env;

use chrono::Utc;
use storefront_lib::StorefrontClient;
use storefront_lib::admin::ListScreen;
use storefront_lib::admin::products_screen;
use storefront_lib::api::ProductQuery;
use storefront_lib::auth::PasswordLogin;
use storefront_lib::auth::SessionTokenProvider;
use storefront_lib::grid::export::export_filename;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let url = env::var("STOREFRONT_URL").expect("STOREFRONT_URL not set");
    let email = env::var("STOREFRONT_EMAIL").expect("STOREFRONT_EMAIL not set");
    let password = env::var("STOREFRONT_PASSWORD").expect("STOREFRONT_PASSWORD not set");

    let login = PasswordLogin::new(&email, &password);
    let client = StorefrontClient::builder()
        .url(&url)
        .token_provider(SessionTokenProvider::new(login))
        .build();

    let health = client.connect().await?;
    println!("Connected to {} {}\n", health.service, health.version);

    let mut screen = products_screen();
    let token = screen.begin_refresh();

    let products_api = client.products();
    let stats_api = client.stats();
    let (products, stats) = futures::join!(
        products_api.list(ProductQuery::default().limit(100)),
        stats_api.overview(),
    );

    match products {
        Ok(response) => {
            let page = response.into_inner();
            println!("Fetched {} of {} products", page.products.len(), page.total);
            screen.complete_refresh(token, page.products);
        }
        Err(err) => {
            screen.fail_refresh(token);
            return Err(err.into());
        }
    }

    if let Ok(response) = stats {
        let stats = response.into_inner();
        println!(
            "Store: {} products ({} low on stock), {} pending orders\n",
            stats.products.total, stats.products.low_stock, stats.orders.pending
        );
    }

    // Active products only, cheapest first
    screen.set_filter("is_active", "true");
    screen.toggle_sort("price");
    print_page(&screen);

    println!("\nSearching for \"usb\"...");
    screen.set_search("usb");
    print_page(&screen);

    let csv = screen.export_csv();
    let filename = export_filename(Utc::now());
    println!(
        "\nExport would write {} bytes to {filename}",
        csv.len()
    );

    Ok(())
}

fn print_page(screen: &ListScreen) {
    let view = screen.view();
    println!(
        "Page {}/{} ({} matching products)",
        screen.query().page().number(),
        view.total_pages(),
        view.total_filtered()
    );

    for column in screen.columns() {
        print!("{:<24}", column.header());
    }
    println!();

    for row in view.rows() {
        for column in screen.columns() {
            print!("{:<24}", column.cell_text(row.record));
        }
        println!();
    }
}
