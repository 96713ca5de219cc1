use crate::cli::{
    actions::Action,
    commands::{ARG_API_BASE, ARG_FORMAT, ARG_ID, ARG_ORIGIN, CMD_LIST, CMD_SEARCH, CMD_SHELL},
    globals::{GlobalArgs, OutputFormat},
};
use crate::dashboard::{AppConfig, RuntimeConfig};
use anyhow::{anyhow, Context, Result};

/// # Errors
/// Returns an error if the base URL is unusable or a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let runtime = RuntimeConfig::new(
        matches.get_one::<String>(ARG_API_BASE).map(String::as_str),
        matches.get_one::<String>(ARG_ORIGIN).map(String::as_str),
    );
    let config = AppConfig::with_overrides(runtime);

    // Fail before any action runs if the endpoint cannot be built.
    config
        .resolve_base()
        .context("invalid API endpoint configuration")?;

    let mut globals = GlobalArgs::new(config);
    if let Some(format) = matches.get_one::<String>(ARG_FORMAT) {
        globals.set_format(OutputFormat::parse(format));
    }

    match matches.subcommand() {
        Some((CMD_LIST, _)) => Ok(Action::List(globals)),
        Some((CMD_SEARCH, sub_m)) => {
            let id = sub_m
                .get_one::<String>(ARG_ID)
                .cloned()
                .context("missing required argument: <id>")?;
            Ok(Action::Search { globals, id })
        }
        Some((CMD_SHELL, _)) | None => Ok(Action::Shell(globals)),
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::handler;
    use crate::cli::{actions::Action, commands, globals::OutputFormat};

    fn matches(args: &[&str]) -> clap::ArgMatches {
        commands::new().get_matches_from(args.iter().copied())
    }

    fn clean_env(test: impl FnOnce()) {
        temp_env::with_vars(
            [
                ("USERBOARD_API_BASE", None::<&str>),
                ("USERBOARD_ORIGIN", None),
                ("USERBOARD_FORMAT", None),
            ],
            test,
        );
    }

    #[test]
    fn defaults_to_shell() {
        clean_env(|| {
            let action = handler(&matches(&["userboard"]));
            assert!(matches!(action, Ok(Action::Shell(_))));
        });
    }

    #[test]
    fn list_with_overrides() {
        clean_env(|| {
            let action = handler(&matches(&[
                "userboard",
                "--api-base",
                " https://users.example.dev/api ",
                "--format",
                "json",
                "list",
            ]));
            match action {
                Ok(Action::List(globals)) => {
                    assert_eq!(globals.config.api_base_url, "https://users.example.dev/api");
                    assert_eq!(globals.format, OutputFormat::Json);
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn search_carries_id() {
        clean_env(|| {
            let action = handler(&matches(&["userboard", "search", "7"]));
            match action {
                Ok(Action::Search { id, globals }) => {
                    assert_eq!(id, "7");
                    assert_eq!(globals.format, OutputFormat::Text);
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn rejects_unusable_origin() {
        clean_env(|| {
            let action = handler(&matches(&["userboard", "--origin", "nowhere", "list"]));
            assert!(action.is_err());
        });
    }
}
