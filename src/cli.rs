//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Account page tools for Lyra: tabs, city themes, and portal links.
#[derive(Debug, Parser)]
#[command(name = "lyra", version)]
pub struct Args {
    /// Path to config file (default: ./lyra.toml or ~/.config/lyra/lyra.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Signed-in user id (overrides account.user_id).
    #[arg(short = 'u', long = "user", global = true)]
    pub user: Option<String>,

    /// Treat the session as an administrator.
    #[arg(long = "admin", global = true)]
    pub admin: bool,

    /// Current URL query string, e.g. `?tab=look_and_feel`.
    #[arg(short = 'q', long = "query", global = true, default_value = "")]
    pub query: String,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the theme picker.
    Themes {
        /// Print the visible catalog entries as JSON.
        #[arg(long = "json")]
        json: bool,
    },
    /// Select and save a city theme.
    Apply {
        /// Theme key, `next`, or `prev`.
        theme: String,
    },
    /// Show the account tabs, or switch to one and print the new query.
    Tab { tab: Option<String> },
    /// Generate a public portal token and link.
    PortalToken {
        #[arg(short = 'n', long = "length")]
        length: Option<usize>,
    },
    /// Print the avatar glyph for a display name.
    Avatar {
        name: String,
        /// Theme to color the avatar with (default: active theme).
        #[arg(long = "theme")]
        theme: Option<String>,
        /// Emit the SVG avatar instead of the glyph.
        #[arg(long = "svg")]
        svg: bool,
    },
    /// Write the default config to ~/.config/lyra/lyra.toml.
    Init {
        /// Overwrite an existing file after backing it up.
        #[arg(long = "force")]
        force: bool,
    },
}
