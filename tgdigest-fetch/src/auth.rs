use std::io::{BufRead, IsTerminal, Write};

use crate::{FetchError, FetchResult, TelegramFetcher};

fn read_line(message: &str) -> FetchResult<String> {
    if !std::io::stdin().is_terminal() {
        return Err(FetchError::NotAuthorized);
    }

    eprint!("{message}");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

impl TelegramFetcher {
    /// Signs in interactively unless the session file already holds an
    /// authorized session.
    pub async fn authorize(&self) -> FetchResult<()> {
        tracing::debug!("checking telegram session");

        if self.client.is_authorized().await? {
            self.log_credentials().await?;
            return Ok(());
        }

        tracing::info!("session is not authorized, signing in");

        let phone = read_line("Phone number in international format: ")?;
        let token = self
            .client
            .request_login_code(&phone, &self.api_hash)
            .await?;

        let code = read_line("Login code: ")?;

        match self.client.sign_in(&token, &code).await {
            Ok(_user) => {
                tracing::info!("signed in");
            }
            Err(grammers_client::SignInError::PasswordRequired(password_token)) => {
                let password = read_line("Two-step verification password: ")?;
                self.client
                    .check_password(password_token, password.trim())
                    .await?;
                tracing::info!("signed in with password");
            }
            Err(e) => return Err(e.into()),
        }

        self.log_credentials().await?;

        Ok(())
    }

    async fn log_credentials(&self) -> FetchResult<()> {
        let me = self.client.get_me().await?;
        tracing::info!(
            user = me.username().unwrap_or("-"),
            id = me.bare_id(),
            "telegram account ready"
        );
        Ok(())
    }
}
