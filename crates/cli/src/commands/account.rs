//! Account commands.

use tracing::info;

use quickbite_client::AppSession;
use quickbite_client::config::ClientConfig;
use quickbite_client::services::auth::SignInForm;

/// Sign in, print the profile, then sign out again.
///
/// # Errors
///
/// Returns an error if sign-in fails or the session cannot be closed.
pub async fn whoami(config: &ClientConfig, email: String, password: String) -> quickbite_client::Result<()> {
    let client = super::appwrite(config)?;
    let mut session = AppSession::new(client);

    let form = SignInForm::new(email, password);
    let user = session.sign_in(&form).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("ID:      {}", user.id);
        println!("Account: {}", user.account_id);
        println!("Name:    {} ({})", user.name, user.initials());
        println!("Email:   {}", user.email);
        if let Some(avatar) = &user.avatar {
            println!("Avatar:  {avatar}");
        }
    }

    session.logout().await?;
    info!("Signed out");
    Ok(())
}
