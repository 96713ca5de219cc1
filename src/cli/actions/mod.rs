pub mod list;
pub mod search;
pub mod shell;

// Interpreter for `Action`, kept apart so this module stays small.
mod run;

use crate::cli::globals::GlobalArgs;
use crate::dashboard::{ApiClient, Controller};
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    List(GlobalArgs),
    Search { globals: GlobalArgs, id: String },
    Shell(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Builds the controller every action drives.
fn controller(globals: &GlobalArgs) -> Result<Controller> {
    let client = ApiClient::new(&globals.config)?;
    Ok(Controller::new(client))
}
