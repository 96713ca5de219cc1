pub mod cli;
pub mod dashboard;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const GIT_COMMIT_HASH: &str = match option_env!("USERBOARD_GIT_SHA") {
    Some(hash) => hash,
    None => "unknown",
};
