//! Ready-made column layouts for the stock admin screens

use crate::grid::Column;
use crate::model::Record;
use crate::model::Value;

use super::ListScreen;

/// Effective unit price: the sale price when one is set, the list price
/// otherwise.
fn listed_price(record: &Record) -> f64 {
    record
        .get("current_price")
        .and_then(Value::as_f64)
        .or_else(|| record.get("price").and_then(Value::as_f64))
        .unwrap_or(0.0)
}

fn active_label(record: &Record) -> String {
    match record.get("is_active").and_then(|value| match value {
        Value::Bool(active) => Some(*active),
        _ => None,
    }) {
        Some(true) => "Active".to_string(),
        _ => "Inactive".to_string(),
    }
}

/// The product catalog screen.
///
/// Product cells show the name with the SKU in parentheses; the price
/// column sorts on the effective (sale-aware) price. The status filter
/// matches on the stored boolean, so its option values are `"true"` and
/// `"false"` rather than the labels; labels would collide under substring
/// matching, where "Active" is contained in "Inactive".
pub fn products_screen() -> ListScreen {
    ListScreen::new(vec![
        Column::new("name", "Product")
            .filterable()
            .with_render(|record| {
                let name = record.text("name");
                let sku = record.text("sku");
                if sku.is_empty() {
                    name
                } else {
                    format!("{name} ({sku})")
                }
            }),
        Column::new("price", "Price")
            .with_accessor(|record| Value::Float(listed_price(record)))
            .with_render(|record| format!("${:.2}", listed_price(record))),
        Column::new("stock_quantity", "Stock"),
        Column::new("is_active", "Status")
            .with_select_filter([("true", "Active"), ("false", "Inactive")])
            .with_render(active_label),
    ])
}

/// The order management screen.
///
/// The status filter lists the fulfillment states the screen distinguishes.
/// Refund states are left out: "refunded" is a substring of
/// "partially_refunded", so a select option for either could not narrow to
/// just one of them.
pub fn orders_screen() -> ListScreen {
    ListScreen::new(vec![
        Column::new("order_number", "Order #").filterable(),
        Column::new("user_id", "Customer")
            .with_render(|record| format!("User #{}", record.text("user_id"))),
        Column::new("created_at", "Date")
            .with_render(|record| record.text("created_at").chars().take(10).collect()),
        Column::new("total_amount", "Amount").with_render(|record| {
            let amount = record
                .get("total_amount")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            format!("${amount:.2}")
        }),
        Column::new("status", "Status")
            .with_select_filter([
                ("pending", "Pending"),
                ("confirmed", "Confirmed"),
                ("shipped", "Shipped"),
                ("delivered", "Delivered"),
                ("cancelled", "Cancelled"),
            ]),
    ])
}

/// The user administration screen.
///
/// The user column resolves to the full name so search and sort work on
/// what the screen displays, falling back to the username and then the
/// email for accounts without name parts.
pub fn users_screen() -> ListScreen {
    ListScreen::new(vec![
        Column::new("name", "User").with_accessor(|record| {
            let full = format!(
                "{} {}",
                record.text("first_name"),
                record.text("last_name")
            );
            let full = full.trim();
            if !full.is_empty() {
                return Value::String(full.to_string());
            }
            let username = record.text("username");
            if !username.is_empty() {
                return Value::String(username);
            }
            Value::String(record.text("email"))
        }),
        Column::new("email", "Email").filterable(),
        Column::new("role", "Role")
            .with_select_filter([
                ("customer", "Customer"),
                ("admin", "Admin"),
                ("moderator", "Moderator"),
                ("support", "Support"),
            ]),
        Column::new("is_active", "Status")
            .with_select_filter([("true", "Active"), ("false", "Inactive")])
            .with_render(active_label),
    ])
}

/// The review moderation screen.
///
/// Moderation listings arrive with the product name joined in; rows from
/// older payloads that only carry the product id fall back to showing it.
pub fn reviews_screen() -> ListScreen {
    ListScreen::new(vec![
        Column::new("product_name", "Product")
            .filterable()
            .with_render(|record| {
                let name = record.text("product_name");
                if name.is_empty() {
                    format!("Product #{}", record.text("product_id"))
                } else {
                    name
                }
            }),
        Column::new("rating", "Rating")
            .with_render(|record| format!("{}/5", record.text("rating"))),
        Column::new("comment", "Comment").sortable(false),
        Column::new("is_approved", "Status")
            .with_select_filter([("true", "Approved"), ("false", "Pending")])
            .with_render(|record| {
                match record.get("is_approved") {
                    Some(Value::Bool(true)) => "Approved".to_string(),
                    _ => "Pending".to_string(),
                }
            }),
    ])
}

/// The coupon management screen.
///
/// The discount column sorts numerically on the discount value while
/// rendering it per type: a percentage, a fixed dollar amount, or free
/// shipping.
pub fn coupons_screen() -> ListScreen {
    ListScreen::new(vec![
        Column::new("code", "Code").filterable(),
        Column::new("name", "Name"),
        Column::new("discount_value", "Discount").with_render(|record| {
            let value = record
                .get("discount_value")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            match record.text("discount_type").as_str() {
                "percentage" => {
                    if value.fract() == 0.0 {
                        format!("{value:.0}%")
                    } else {
                        format!("{value}%")
                    }
                }
                "fixed" => format!("${value:.2}"),
                "free_shipping" => "Free shipping".to_string(),
                _ => record.text("discount_value"),
            }
        }),
        Column::new("is_active", "Status")
            .with_select_filter([("true", "Active"), ("false", "Inactive")])
            .with_render(active_label),
        Column::new("used_count", "Usage"),
        Column::new("valid_until", "Validity").with_render(|record| {
            let from = record.text("valid_from");
            let until = record.text("valid_until");
            match (from.is_empty(), until.is_empty()) {
                (false, false) => format!("{from} to {until}"),
                (false, true) => format!("from {from}"),
                (true, false) => format!("until {until}"),
                (true, true) => String::new(),
            }
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FilterKind;

    fn find<'a>(screen: &'a ListScreen, key: &str) -> &'a Column {
        screen
            .columns()
            .iter()
            .find(|column| column.key() == key)
            .unwrap()
    }

    #[test]
    fn test_product_cells_render_sale_price_and_sku() {
        let screen = products_screen();
        let record = Record::new()
            .set("id", 1)
            .set("name", "Wireless Mouse")
            .set("sku", "WM-100")
            .set("price", 29.99)
            .set("current_price", 19.99)
            .set("stock_quantity", 4)
            .set("is_active", true);

        assert_eq!(
            find(&screen, "name").cell_text(&record),
            "Wireless Mouse (WM-100)"
        );
        assert_eq!(find(&screen, "price").cell_text(&record), "$19.99");
        assert_eq!(find(&screen, "is_active").cell_text(&record), "Active");
    }

    #[test]
    fn test_product_price_sorts_on_sale_price() {
        let mut screen = products_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(
            token,
            vec![
                Record::new().set("id", 1).set("name", "A").set("price", 10.0),
                Record::new()
                    .set("id", 2)
                    .set("name", "B")
                    .set("price", 50.0)
                    .set("current_price", 5.0),
            ],
        );

        screen.toggle_sort("price");
        let view = screen.view();
        assert_eq!(view.rows()[0].record.text("name"), "B");
    }

    #[test]
    fn test_status_filter_separates_active_from_inactive() {
        let mut screen = products_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(
            token,
            vec![
                Record::new().set("id", 1).set("name", "A").set("is_active", true),
                Record::new().set("id", 2).set("name", "B").set("is_active", false),
            ],
        );

        // Boolean-valued options keep "Active" from matching "Inactive"
        screen.set_filter("is_active", "true");
        assert_eq!(screen.view().total_filtered(), 1);
        assert_eq!(screen.view().rows()[0].record.text("name"), "A");

        screen.set_filter("is_active", "false");
        assert_eq!(screen.view().rows()[0].record.text("name"), "B");
    }

    #[test]
    fn test_order_columns_render_date_amount_and_customer() {
        let screen = orders_screen();
        let record = Record::new()
            .set("id", 7)
            .set("order_number", "ORD-2025-0007")
            .set("user_id", 42)
            .set("created_at", "2025-08-26T09:15:00")
            .set("total_amount", 129.5)
            .set("status", "pending");

        assert_eq!(find(&screen, "created_at").cell_text(&record), "2025-08-26");
        assert_eq!(find(&screen, "total_amount").cell_text(&record), "$129.50");
        assert_eq!(find(&screen, "user_id").cell_text(&record), "User #42");
    }

    #[test]
    fn test_order_status_options_do_not_collide() {
        let screen = orders_screen();
        let options = find(&screen, "status").filter_options();
        for a in options {
            for b in options {
                if a.value != b.value {
                    assert!(
                        !b.value.to_lowercase().contains(&a.value.to_lowercase()),
                        "{} would also match {}",
                        a.value,
                        b.value
                    );
                }
            }
        }
    }

    #[test]
    fn test_user_column_falls_back_to_username_then_email() {
        let screen = users_screen();
        let user = find(&screen, "name");

        let named = Record::new()
            .set("id", 1)
            .set("first_name", "Ada")
            .set("last_name", "Lovelace");
        assert_eq!(user.cell_text(&named), "Ada Lovelace");

        let handle_only = Record::new().set("id", 2).set("username", "ada42");
        assert_eq!(user.cell_text(&handle_only), "ada42");

        let email_only = Record::new().set("id", 3).set("email", "ada@example.com");
        assert_eq!(user.cell_text(&email_only), "ada@example.com");
    }

    #[test]
    fn test_review_product_falls_back_to_id() {
        let screen = reviews_screen();
        let product = find(&screen, "product_name");

        let joined = Record::new()
            .set("id", 1)
            .set("product_id", 9)
            .set("product_name", "USB Hub");
        assert_eq!(product.cell_text(&joined), "USB Hub");

        let bare = Record::new().set("id", 2).set("product_id", 9);
        assert_eq!(product.cell_text(&bare), "Product #9");

        assert_eq!(
            find(&screen, "rating").cell_text(&Record::new().set("rating", 4)),
            "4/5"
        );
    }

    #[test]
    fn test_review_comment_is_not_sortable() {
        let screen = reviews_screen();
        assert!(!find(&screen, "comment").is_sortable());
        assert_eq!(
            find(&screen, "is_approved").filter_kind(),
            FilterKind::Select
        );
    }

    #[test]
    fn test_coupon_discount_renders_per_type() {
        let screen = coupons_screen();
        let discount = find(&screen, "discount_value");

        let percent = Record::new()
            .set("discount_type", "percentage")
            .set("discount_value", 10.0);
        assert_eq!(discount.cell_text(&percent), "10%");

        let fixed = Record::new()
            .set("discount_type", "fixed")
            .set("discount_value", 50.0);
        assert_eq!(discount.cell_text(&fixed), "$50.00");

        let shipping = Record::new()
            .set("discount_type", "free_shipping")
            .set("discount_value", 0.0);
        assert_eq!(discount.cell_text(&shipping), "Free shipping");
    }

    #[test]
    fn test_coupon_validity_window_renders_both_ends() {
        let screen = coupons_screen();
        let validity = find(&screen, "valid_until");

        let both = Record::new()
            .set("valid_from", "2025-01-01")
            .set("valid_until", "2025-12-31");
        assert_eq!(validity.cell_text(&both), "2025-01-01 to 2025-12-31");

        let open_ended = Record::new().set("valid_from", "2025-01-01");
        assert_eq!(validity.cell_text(&open_ended), "from 2025-01-01");
    }
}
