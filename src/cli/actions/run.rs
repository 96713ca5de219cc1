use super::{list, search, shell, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::List(globals) => list::handle(&globals).await,
        Action::Search { globals, id } => search::handle(&globals, &id).await,
        Action::Shell(globals) => shell::handle(&globals).await,
    }
}
