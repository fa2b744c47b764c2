//! List engine walkthrough over in-memory data.
//!
//! Drives every pipeline stage (search, filter, sort, pagination) plus row
//! selection and CSV export without touching the network.
//!
//! Run with: cargo run --example offline_grid

use storefront_lib::admin::ListScreen;
use storefront_lib::admin::products_screen;
use storefront_lib::model::Record;

fn sample_catalog() -> Vec<Record> {
    let fixtures: &[(i64, &str, &str, f64, i32, bool)] = &[
        (1, "Wireless Mouse", "WM-100", 24.99, 42, true),
        (2, "Mechanical Keyboard", "KB-200", 89.99, 17, true),
        (3, "USB-C Hub", "HUB-7", 39.99, 0, false),
        (4, "Desk Lamp", "DL-30", 19.99, 65, true),
        (5, "Monitor Stand", "MS-12", 34.99, 8, true),
        (6, "Webcam 1080p", "WC-10", 59.99, 23, true),
        (7, "USB Microphone", "MIC-5", 74.99, 5, true),
        (8, "Laptop Sleeve", "LS-14", 29.99, 31, true),
    ];
    fixtures
        .iter()
        .map(|(id, name, sku, price, stock, active)| {
            Record::new()
                .set("id", *id)
                .set("name", *name)
                .set("sku", *sku)
                .set("price", *price)
                .set("stock_quantity", *stock)
                .set("is_active", *active)
        })
        .collect()
}

fn main() {
    let mut screen = products_screen();
    let token = screen.begin_refresh();
    screen.complete_refresh(token, sample_catalog());

    println!("Full catalog:");
    print_page(&screen);

    println!("\nActive products, cheapest first, two per page:");
    screen.set_filter("is_active", "true");
    screen.toggle_sort("price");
    screen.set_page_size(2);
    print_page(&screen);

    screen.set_page(2);
    println!("\nPage two:");
    print_page(&screen);

    println!("\nSelecting this page...");
    screen.toggle_page_selection();
    for record in screen.selected_records() {
        println!("  selected: {}", record.text("name"));
    }

    println!("\nSearching for \"usb\":");
    screen.set_search("usb");
    print_page(&screen);

    println!("\nCSV export of the current filter:");
    println!("{}", screen.export_csv());
}

fn print_page(screen: &ListScreen) {
    let view = screen.view();
    for row in view.rows() {
        let cells: Vec<String> = screen
            .columns()
            .iter()
            .map(|column| column.cell_text(row.record))
            .collect();
        println!("  {}", cells.join(" | "));
    }
    println!(
        "  ({} matching, page {}/{})",
        view.total_filtered(),
        screen.query().page().number(),
        view.total_pages()
    );
}
