//! Clap derive structures for the `vatusa` CLI.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use vatusa_api::models::Cid;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vatusa -- command-line access to the VATUSA facility-management API
#[derive(Debug, Parser)]
#[command(
    name = "vatusa",
    version,
    about = "Query and administer VATUSA facilities from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "VATUSA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root, without a trailing slash (overrides profile)
    #[arg(long, env = "VATUSA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API token (overrides profile and keyring)
    #[arg(long, env = "VATUSA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VATUSA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "VATUSA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VATUSA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show ratings and role reference tables
    #[command(alias = "ref")]
    Reference,

    /// Look up and administer controllers
    #[command(alias = "ctl")]
    Controller(ControllerArgs),

    /// Facilities, rosters and pending requests
    #[command(alias = "fac")]
    Facility(FacilityArgs),

    /// Facility news posts
    News(NewsArgs),

    /// Manage profiles and stored tokens
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTROLLER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ControllerArgs {
    #[command(subcommand)]
    pub command: ControllerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ControllerCommand {
    /// Show a controller profile
    Get { cid: Cid },

    /// Profile with transfers, promotions and eligibility
    Details { cid: Cid },

    /// Search controllers by name, facility, rating or email
    #[command(alias = "find")]
    Search {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        facility: Option<String>,

        #[arg(long)]
        rating: Option<i32>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Show the staff action log for a controller
    Log { cid: Cid },

    /// Change a controller's rating
    SetRating {
        cid: Cid,

        rating: i32,

        /// CID of the staff member performing the change
        #[arg(long, required = true)]
        admin_cid: Cid,
    },

    /// Set or clear a controller flag
    SetFlag {
        cid: Cid,

        /// Flag name
        flag: String,

        /// New value (true or false)
        #[arg(action = ArgAction::Set)]
        value: bool,

        /// CID of the staff member performing the change
        #[arg(long, required = true)]
        admin_cid: Cid,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FACILITY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FacilityArgs {
    #[command(subcommand)]
    pub command: FacilityCommand,
}

#[derive(Debug, Subcommand)]
pub enum FacilityCommand {
    /// List all facilities
    #[command(alias = "ls")]
    List,

    /// Show one facility and its staff
    Get { facility: String },

    /// List a facility roster
    Roster {
        facility: String,

        /// Only home controllers
        #[arg(long, conflicts_with = "visitors_only")]
        home_only: bool,

        /// Only visiting controllers
        #[arg(long)]
        visitors_only: bool,
    },

    /// Pending transfer and visit requests
    Requests { facility: String },

    /// Raw staff listing
    Staff { facility: String },

    /// Add a visiting controller to the roster
    AddVisitor {
        facility: String,

        cid: Cid,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Remove a controller from the roster
    Remove {
        facility: String,

        cid: Cid,

        #[arg(long)]
        reason: Option<String>,
    },
}

impl FacilityCommand {
    /// `(include_home, include_visitor)` for the roster flags.
    pub fn roster_groups(home_only: bool, visitors_only: bool) -> (bool, bool) {
        match (home_only, visitors_only) {
            (true, _) => (true, false),
            (false, true) => (false, true),
            (false, false) => (true, true),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NEWS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: NewsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NewsCommand {
    /// List news posts
    #[command(alias = "ls")]
    List,

    /// Create a news post
    Create {
        #[arg(long, required = true)]
        facility: String,

        #[arg(long, required = true)]
        author_cid: Cid,

        #[arg(long, required = true)]
        title: String,

        #[arg(long, required = true)]
        body: String,

        #[arg(long, default_value = "")]
        banner_image_url: String,

        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },

    /// Delete a news post
    Delete { post_id: u64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the loaded configuration with tokens masked
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to make the default
        name: String,
    },

    /// Set a value on the active profile
    Set {
        /// One of: base_url, token_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// Store the API token in the system keyring
    ///
    /// Reads the token from --token / VATUSA_TOKEN, or prompts for it.
    SetToken,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vatusa").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["controller", "get", "100", "-o", "json-compact", "-vv"]);
        assert_eq!(cli.global.output, OutputFormat::JsonCompact);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Controller(ControllerArgs {
                command: ControllerCommand::Get { cid: 100 }
            })
        ));
    }

    #[test]
    fn set_flag_takes_explicit_bool() {
        let cli = parse(&[
            "controller",
            "set-flag",
            "100",
            "NO_PROMOTE",
            "false",
            "--admin-cid",
            "200",
        ]);
        match cli.command {
            Command::Controller(ControllerArgs {
                command:
                    ControllerCommand::SetFlag {
                        flag,
                        value,
                        admin_cid,
                        ..
                    },
            }) => {
                assert_eq!(flag, "NO_PROMOTE");
                assert!(!value);
                assert_eq!(admin_cid, 200);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn roster_flags_conflict() {
        let result = Cli::try_parse_from([
            "vatusa",
            "facility",
            "roster",
            "ZDC",
            "--home-only",
            "--visitors-only",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn roster_groups_default_to_everyone() {
        assert_eq!(FacilityCommand::roster_groups(false, false), (true, true));
        assert_eq!(FacilityCommand::roster_groups(true, false), (true, false));
        assert_eq!(FacilityCommand::roster_groups(false, true), (false, true));
    }

    #[test]
    fn config_set_takes_key_and_value() {
        let cli = parse(&["-p", "zdc", "config", "set", "timeout", "10"]);
        assert_eq!(cli.global.profile.as_deref(), Some("zdc"));
        match cli.command {
            Command::Config(ConfigArgs {
                command: ConfigCommand::Set { key, value },
            }) => {
                assert_eq!(key, "timeout");
                assert_eq!(value, "10");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn set_rating_requires_admin() {
        let result = Cli::try_parse_from(["vatusa", "controller", "set-rating", "100", "5"]);
        assert!(result.is_err());
    }
}
