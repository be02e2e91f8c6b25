use anyhow::Result;
use motoclub::cli::{actions, actions::Action, start};

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;

    match action {
        Action::Server { .. } => actions::server::handle(action).await?,
    }

    Ok(())
}
