use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use qwenht_client::config::{API_URL_ENV, IDENTITY_URL_ENV};

/// QwenHT identity management from the terminal.
#[derive(Parser, Debug)]
#[command(name = "qwenht")]
#[command(version)]
#[command(about = "Administrative client for QwenHT Identity Management", long_about = None)]
pub struct Cli {
    /// Identity server base URL (account endpoints)
    #[arg(long = "identity-url", env = IDENTITY_URL_ENV, global = true)]
    pub identity_url: Option<String>,

    /// API base URL (navigation and user endpoints)
    #[arg(long = "api-url", env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Where the access token is kept between runs
    #[arg(long = "token-file", global = true)]
    pub token_file: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Human-readable logs at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the token
    Login {
        #[arg(short = 'u', long)]
        username: String,
        /// Prompted for when omitted
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored token
    Logout,
    /// Show who the stored token belongs to
    Whoami,
    /// Print the navigation menu
    Nav {
        /// Every item, not only the signed-in user's menu (admin)
        #[arg(long)]
        all: bool,
    },
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Show where a path would land for the current session
    Route { path: String },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// One page of users
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Column to sort by (email, firstName, lastName, roles)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one user
    Get { id: String },
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Repeat for several roles
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
    },
    /// Delete a user (asks for confirmation)
    Delete { id: String },
    /// Set a new password for a user (prompts twice)
    Passwd { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_listing() {
        let cli = Cli::try_parse_from([
            "qwenht", "users", "list", "--page", "2", "--sort", "email", "--desc",
        ])
        .unwrap();
        match cli.command {
            Command::Users(UsersCommand::List { page, sort, desc, search }) => {
                assert_eq!(page, 2);
                assert_eq!(sort.as_deref(), Some("email"));
                assert!(desc);
                assert!(search.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Cli::try_parse_from(["qwenht", "users", "list", "--desc"]).is_err());
    }

    #[test]
    fn create_needs_a_role() {
        assert!(
            Cli::try_parse_from([
                "qwenht", "users", "create", "--email", "a@b.com", "--first-name", "A",
                "--last-name", "B",
            ])
            .is_err()
        );
    }
}
