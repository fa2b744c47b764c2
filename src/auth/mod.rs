//! Login flows and token management

mod password;
mod session;
mod token;

pub use password::PasswordLogin;
pub use session::AuthFlow;
pub use session::SessionTokenProvider;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
