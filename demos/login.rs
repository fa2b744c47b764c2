//! Password login example.
//!
//! Run with: cargo run --example login
//!
//! Expects a .env file providing:
//! - STOREFRONT_URL
//! - STOREFRONT_EMAIL
//! - STOREFRONT_PASSWORD

use std::env;

use storefront_lib::auth::PasswordLogin;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let url = env::var("STOREFRONT_URL").expect("STOREFRONT_URL not set");
    let email = env::var("STOREFRONT_EMAIL").expect("STOREFRONT_EMAIL not set");
    let password = env::var("STOREFRONT_PASSWORD").expect("STOREFRONT_PASSWORD not set");

    let login = PasswordLogin::new(&email, &password);

    println!("Logging in as {email}...\n");

    let token = login.authenticate(&url).await?;

    println!("Login successful!");
    println!("Access token expires at: {:?}", token.expires_at);
    println!("Refresh token present: {}", token.can_refresh());

    if let Some(refresh_token) = &token.refresh_token {
        println!("\nExchanging the refresh token...");
        let refreshed = login.refresh(&url, refresh_token).await?;
        println!("Refresh succeeded!");
        println!("Fresh token expires at: {:?}", refreshed.expires_at);
    }

    Ok(())
}
