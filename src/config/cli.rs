use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the postfeed binary.
#[derive(Debug, Parser)]
#[command(name = "postfeed", version, about = "Paginated post feed client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTFEED_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Override the server root (GraphQL and upload endpoints hang off it).
    #[arg(long = "endpoint", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Override the base used to resolve relative image paths.
    #[arg(long = "asset-base", value_name = "URL", global = true)]
    pub asset_base: Option<String>,

    /// Read the bearer token from this file.
    #[arg(
        long = "token-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub token_file: Option<PathBuf>,

    /// Bearer token; the token file wins when both are supplied.
    #[arg(
        long = "token",
        env = "POSTFEED_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load the feed and print one page of it.
    Feed(FeedArgs),
    /// Print a single post.
    Show(ShowArgs),
    /// Read or replace the status line.
    Status(StatusArgs),
    /// Interactive session reading commands from stdin.
    Shell,
}

#[derive(Debug, Args, Clone)]
pub struct FeedArgs {
    /// Page to display (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(1..))]
    pub page: i32,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Post identifier.
    pub id: String,
}

#[derive(Debug, Args, Clone)]
pub struct StatusArgs {
    /// Replace the status with this value instead of printing it.
    #[arg(long, value_name = "VALUE")]
    pub set: Option<String>,
}
