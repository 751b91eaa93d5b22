pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Manage role-based signing delegations for trusted collections.
#[derive(Parser, Debug)]
#[command(name = "trustctl", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an alternative config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the local trust databases
    #[arg(short = 'd', long, global = true)]
    pub trust_dir: Option<String>,

    /// Remote trust server base URL
    #[arg(short = 's', long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Operate on delegations of a trusted collection
    Delegation {
        #[command(subcommand)]
        action: DelegationAction,
    },
}

/// Delegation subcommands take raw trailing arguments; the request
/// validator owns arity and shape errors so the messages stay uniform.
#[derive(Subcommand, Debug)]
pub enum DelegationAction {
    /// List all delegations for a Global Unique Name
    List {
        /// GUN
        #[arg(value_name = "GUN")]
        args: Vec<String>,
    },

    /// Remove a role delegation for a key ID
    Remove {
        /// GUN, key ID, and role
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },

    /// Add a role delegation for a public key certificate PEM
    Add {
        /// GUN, certificate PEM path, role, and one or more paths
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },
}
