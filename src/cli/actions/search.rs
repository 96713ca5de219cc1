use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use tracing::info;

/// Search one user by id and print the dashboard once. A blank id leaves the
/// dashboard idle, matching the interactive search button.
/// # Errors
/// Returns an error if the client cannot be built or the view cannot be written.
pub async fn handle(globals: &GlobalArgs, id: &str) -> Result<()> {
    let controller = super::controller(globals)?;
    if !controller.search(id).await {
        info!("nothing to search for");
    }

    let view = controller.view().await;
    globals.write_view(&mut std::io::stdout().lock(), &view)
}
