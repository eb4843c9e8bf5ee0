//! Argument definitions for the `vnscale` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "vnscale",
    version,
    about = "Bulk-provision virtual networks (port groups + IP pools) on a vCenter distributed switch",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file
    #[arg(long, global = true, env = "VNSCALE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// vCenter base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// vCenter username
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Datacenter name
    #[arg(long, global = true)]
    pub datacenter: Option<String>,

    /// Distributed switch name
    #[arg(long, global = true)]
    pub switch: Option<String>,

    /// Naming prefix for created / matched networks
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Accept self-signed certificates
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Path to a custom CA certificate
    #[arg(long, global = true, value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Per-request HTTP timeout, seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create port groups and their IP pools on the switch
    Create(CreateArgs),

    /// Destroy every IP pool and port group matching the naming prefix
    Delete,

    /// Show the objects a delete run would destroy
    List,

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Number of networks to create
    #[arg(long, value_name = "N")]
    pub count: Option<u32>,

    /// Base CIDR carved into per-network subnets
    #[arg(long, value_name = "CIDR")]
    pub cidr: Option<String>,

    /// Prefix length of each per-network subnet
    #[arg(long, value_name = "LEN")]
    pub subnet_prefix_len: Option<u8>,

    /// Raise the switch port cap to this before creating (0 disables)
    #[arg(long, value_name = "N")]
    pub max_ports: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a commented sample config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
