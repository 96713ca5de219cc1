//! Interactive dashboard. Mounts with a fetch-all, then reads one action per
//! line from stdin and re-prints the view after each one.

use crate::cli::globals::GlobalArgs;
use crate::dashboard::Controller;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
commands:
  search [id]   search by id (uses the current query when id is omitted)
  / <id>        same as search
  query <text>  set the search query
  clear         clear query and results
  fetch | all   fetch all users
  help          show this help
  quit | exit   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(Option<String>),
    Query(String),
    Clear,
    FetchAll,
    Help,
    Quit,
    Empty,
}

/// Parses one input line.
///
/// # Errors
/// Returns a message naming the unknown command.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let argument = || (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "search" | "/" => Ok(ShellCommand::Search(argument())),
        "query" => Ok(ShellCommand::Query(rest.to_string())),
        "clear" => Ok(ShellCommand::Clear),
        "fetch" | "all" => Ok(ShellCommand::FetchAll),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

/// Runs the interactive dashboard on stdin and stdout.
/// # Errors
/// Returns an error if the client cannot be built or stdin/stdout fail.
pub async fn handle(globals: &GlobalArgs) -> Result<()> {
    let controller = super::controller(globals)?;
    let input = BufReader::new(tokio::io::stdin());
    run(&controller, globals, input, &mut std::io::stdout()).await
}

/// Drives a session from `input` until it ends or `quit` is read.
/// # Errors
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(
    controller: &Controller,
    globals: &GlobalArgs,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    controller.mount().await;
    globals.write_view(out, &controller.view().await)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        debug!("shell command: {:?}", command);

        match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Search(Some(id)) => {
                controller.search(&id).await;
            }
            ShellCommand::Search(None) => {
                controller.search_by_id().await;
            }
            ShellCommand::Query(query) => controller.set_query(&query).await,
            ShellCommand::Clear => controller.clear().await,
            ShellCommand::FetchAll => controller.fetch_all().await,
        }

        globals.write_view(out, &controller.view().await)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_command, ShellCommand};

    #[test]
    fn parse_search_with_and_without_id() {
        assert_eq!(
            parse_command("search 12"),
            Ok(ShellCommand::Search(Some("12".to_string())))
        );
        assert_eq!(
            parse_command("/   a b "),
            Ok(ShellCommand::Search(Some("a b".to_string())))
        );
        assert_eq!(parse_command("search"), Ok(ShellCommand::Search(None)));
        assert_eq!(parse_command("search    "), Ok(ShellCommand::Search(None)));
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("clear"), Ok(ShellCommand::Clear));
        assert_eq!(parse_command("FETCH"), Ok(ShellCommand::FetchAll));
        assert_eq!(parse_command("all"), Ok(ShellCommand::FetchAll));
        assert_eq!(parse_command("help"), Ok(ShellCommand::Help));
        assert_eq!(parse_command("exit"), Ok(ShellCommand::Quit));
        assert_eq!(parse_command("   "), Ok(ShellCommand::Empty));
    }

    #[test]
    fn parse_query_keeps_text() {
        assert_eq!(
            parse_command("query  7 "),
            Ok(ShellCommand::Query("7".to_string()))
        );
        assert_eq!(parse_command("query"), Ok(ShellCommand::Query(String::new())));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(parse_command("delete 1").is_err());
    }
}
