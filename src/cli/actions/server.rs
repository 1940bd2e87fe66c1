use crate::{
    api,
    cli::{actions::Action, globals::GlobalArgs},
};
use anyhow::Result;
use secrecy::ExposeSecret;
use tracing::warn;

/// Minimum signing secret length for production deployments.
const MIN_SECRET_LENGTH: usize = 32;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            secret,
            frontend_url,
        } => {
            if secret.expose_secret().len() < MIN_SECRET_LENGTH {
                warn!(
                    "Session secret is shorter than {MIN_SECRET_LENGTH} characters, \
                     use a longer secret in production"
                );
            }

            let globals = GlobalArgs::new(secret, frontend_url);

            api::new(port, dsn, &globals).await?;
        }
    }

    Ok(())
}
