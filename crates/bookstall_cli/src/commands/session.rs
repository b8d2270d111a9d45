//! Session commands: login, logout, whoami.

use std::error::Error;

use bookstall_client::AuthState;

use super::CliContext;

/// Signs in and persists the credential pair.
pub async fn login(context: &CliContext, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
    let user = context.session.login(email, password).await?;
    tracing::info!(email = %user.email, "session opened");
    Ok(())
}

/// Signs out, revoking the session server-side when possible.
pub async fn logout(context: &CliContext) -> Result<(), Box<dyn Error>> {
    context.session.logout().await?;
    Ok(())
}

/// Prints the current session state.
pub fn whoami(context: &CliContext) -> Result<(), Box<dyn Error>> {
    let state = context.session.state();
    match state.auth {
        AuthState::Authenticated => match state.user {
            Some(user) => println!("signed in as {}", user.email),
            None => println!("signed in (persisted session)"),
        },
        _ => println!("not signed in"),
    }
    Ok(())
}
