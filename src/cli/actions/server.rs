use crate::api::{self, AppConfig};
use crate::cli::actions::Action;
use anyhow::Result;

/// Handle the server action
///
/// # Errors
/// Returns an error if the store cannot be opened or the server fails.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            data_dir,
            frontend_url,
            session_ttl_seconds,
        } => {
            let config =
                AppConfig::new(frontend_url).with_session_ttl_seconds(session_ttl_seconds);

            api::new(port, data_dir, config).await?;
        }
    }

    Ok(())
}
