use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use tracing::info;

/// Fetch all users and print the dashboard once.
/// # Errors
/// Returns an error if the client cannot be built or the view cannot be written.
pub async fn handle(globals: &GlobalArgs) -> Result<()> {
    let controller = super::controller(globals)?;
    controller.fetch_all().await;

    let view = controller.view().await;
    info!("fetched {} users", controller.snapshot().await.results().len());

    globals.write_view(&mut std::io::stdout().lock(), &view)
}
