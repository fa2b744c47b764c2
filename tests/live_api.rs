//! Integration tests against a live storefront service.
//!
//! These tests require a running service and an admin account, and are
//! ignored by default. To run them, create a `.env` file next to
//! `Cargo.toml` with:
//!
//! ```env
//! STOREFRONT_URL=http://localhost:8000
//! STOREFRONT_EMAIL=admin@example.com
//! STOREFRONT_PASSWORD=your-password
//! ```
//!
//! Then run: `cargo test -- --ignored`

use std::env;

use storefront_lib::StorefrontClient;
use storefront_lib::admin::products_screen;
use storefront_lib::api::ProductQuery;
use storefront_lib::auth::PasswordLogin;
use storefront_lib::auth::SessionTokenProvider;
use storefront_lib::error::AuthError;

fn load_env() -> Option<(String, String, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("STOREFRONT_URL").ok()?;
    let email = env::var("STOREFRONT_EMAIL").ok()?;
    let password = env::var("STOREFRONT_PASSWORD").ok()?;

    Some((url, email, password))
}

fn connect(url: &str, email: &str, password: &str) -> StorefrontClient {
    let login = PasswordLogin::new(email, password);
    StorefrontClient::builder()
        .url(url)
        .token_provider(SessionTokenProvider::new(login))
        .build()
}

// =============================================================================
// Authentication
// =============================================================================

mod auth {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_authenticate() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let login = PasswordLogin::new(&email, &password);
        let token = login.authenticate(&url).await.expect("Login failed");

        assert!(
            !token.access_token.is_empty(),
            "Access token should not be empty"
        );
        assert!(
            token.expires_at.is_some(),
            "Token should have expiration time"
        );

        println!("Successfully authenticated!");
        println!("Token expires at: {:?}", token.expires_at);
        println!("Has refresh token: {}", token.can_refresh());
    }

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_authenticate_and_refresh() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let login = PasswordLogin::new(&email, &password);
        let token = login.authenticate(&url).await.expect("Login failed");

        let refresh_token = match &token.refresh_token {
            Some(rt) => rt.clone(),
            None => {
                println!("No refresh token received, skipping refresh test");
                return;
            }
        };

        let refreshed = login
            .refresh(&url, &refresh_token)
            .await
            .expect("Token refresh failed");

        assert!(
            !refreshed.access_token.is_empty(),
            "Refreshed token should not be empty"
        );
        assert_ne!(
            token.access_token, refreshed.access_token,
            "Refreshed token should be different"
        );

        println!("Successfully refreshed token!");
        println!("New token expires at: {:?}", refreshed.expires_at);
    }

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_invalid_credentials() {
        let (url, _email, _password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let login = PasswordLogin::new("invalid@example.com", "wrongpassword");
        let result = login.authenticate(&url).await;

        assert!(
            matches!(&result, Err(AuthError::InvalidCredentials)),
            "Expected InvalidCredentials, got: {result:?}"
        );
        println!("Got expected error: {}", result.unwrap_err());
    }
}

// =============================================================================
// Reads
// =============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_health_check() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let client = connect(&url, &email, &password);
        let health = client.connect().await.expect("Health check failed");

        assert!(health.is_healthy(), "Service reported: {}", health.status);
        println!("Service: {} {}", health.service, health.version);
    }

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_list_products() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let client = connect(&url, &email, &password);
        let response = client
            .products()
            .list(ProductQuery::default().limit(5))
            .await
            .expect("Product listing failed");

        let duration = response.meta().duration;
        let page = response.into_inner();
        assert!(page.products.len() <= 5);
        assert!(page.total >= page.products.len());
        println!(
            "Fetched {} of {} products in {duration:?}",
            page.products.len(),
            page.total
        );
    }

    #[tokio::test]
    #[ignore = "requires a live service and credentials in .env"]
    async fn test_page_iteration_visits_every_product() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let client = connect(&url, &email, &password);
        let mut pages = client.products().pages(ProductQuery::default().limit(10));

        let mut fetched = 0;
        let mut total = 0;
        while let Some(page) = pages.next().await {
            let page = page.expect("Page fetch failed");
            fetched += page.products.len();
            total = page.total;
        }

        assert_eq!(fetched, total, "pagination skipped or repeated products");
        println!("Walked {fetched} products across all pages");
    }

    #[tokio::test]
    #[ignore = "requires a live service and admin credentials in .env"]
    async fn test_store_stats() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let client = connect(&url, &email, &password);
        let response = client.stats().overview().await.expect("Stats fetch failed");

        let stats = response.into_inner();
        assert!(stats.orders.total >= stats.orders.pending);
        println!(
            "{} users, {} products, {} orders",
            stats.users.total, stats.products.total, stats.orders.total
        );
    }
}

// =============================================================================
// Admin screens over live data
// =============================================================================

mod screens {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a live service and admin credentials in .env"]
    async fn test_products_screen_over_live_catalog() {
        let (url, email, password) =
            load_env().expect("Missing required environment variables. See module docs.");

        let client = connect(&url, &email, &password);
        let mut screen = products_screen();

        let token = screen.begin_refresh();
        match client.products().list(ProductQuery::default().limit(100)).await {
            Ok(response) => {
                let page = response.into_inner();
                assert!(screen.complete_refresh(token, page.products));
            }
            Err(err) => {
                screen.fail_refresh(token);
                panic!("Product fetch failed: {err}");
            }
        }

        assert!(!screen.is_loading());
        let unfiltered = screen.view().total_filtered();

        screen.set_filter("is_active", "true");
        assert!(screen.view().total_filtered() <= unfiltered);

        let csv = screen.export_csv();
        assert!(csv.starts_with("Product,Price,Stock,Status"));
        println!(
            "Screen holds {} products, {} after filtering",
            unfiltered,
            screen.view().total_filtered()
        );
    }
}
