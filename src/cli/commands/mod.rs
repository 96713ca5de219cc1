pub mod logging;

use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        PossibleValuesParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_API_BASE: &str = "api-base";
pub const ARG_ORIGIN: &str = "origin";
pub const ARG_FORMAT: &str = "format";
pub const ARG_ID: &str = "id";

pub const CMD_LIST: &str = "list";
pub const CMD_SEARCH: &str = "search";
pub const CMD_SHELL: &str = "shell";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("userboard")
        .about("List and search user records")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_API_BASE)
                .short('b')
                .long(ARG_API_BASE)
                .help("API base URL, absolute or relative to --origin (default: /api)")
                .env("USERBOARD_API_BASE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_ORIGIN)
                .long(ARG_ORIGIN)
                .help("Origin used to resolve a relative API base (default: http://localhost:8000)")
                .env("USERBOARD_ORIGIN")
                .global(true),
        )
        .arg(
            Arg::new(ARG_FORMAT)
                .short('f')
                .long(ARG_FORMAT)
                .help("Output format")
                .default_value("text")
                .env("USERBOARD_FORMAT")
                .global(true)
                .value_parser(PossibleValuesParser::new(["text", "json"])),
        )
        .subcommand(Command::new(CMD_LIST).about("Fetch all users and print the dashboard"))
        .subcommand(
            Command::new(CMD_SEARCH)
                .about("Search a user by id and print the dashboard")
                .arg(
                    Arg::new(ARG_ID)
                        .help("User id to look up")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_SHELL)
                .about("Interactive dashboard reading actions from stdin (default)"),
        );

    logging::with_args(command)
}
