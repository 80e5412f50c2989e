//! Token command - Signs a bearer token for local development.

use crate::cli::args::TokenArgs;
use crate::config::Config;
use crate::domain::Principal;
use crate::errors::AppResult;
use crate::services::{AuthService, Authenticator};

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let principal = Principal::new(args.user_id, args.username, args.driver);
    let token = Authenticator::new(config).issue_token(&principal)?;

    tracing::info!(
        principal = %principal.id,
        role = %principal.role(),
        expires_in = token.expires_in,
        "Token issued"
    );
    println!("{}", token.access_token);

    Ok(())
}
