use clap::{Args, Parser, Subcommand};
use lenv_backend::Version;

/// Version manager for Java and Python runtimes
#[derive(Parser, Debug)]
#[command(name = "lenv", version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr and the log file
    #[arg(short, long, global = true, env = "LENV_DEBUG")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage Java versions
    #[command(visible_alias = "j")]
    Java {
        #[command(subcommand)]
        action: Action,
    },

    /// Manage Python versions
    #[command(visible_aliases = ["p", "py"])]
    Python {
        #[command(subcommand)]
        action: Action,
    },

    /// Print the managed root directory
    Root,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Install a version
    #[command(visible_alias = "i")]
    Install(Target),

    /// Uninstall a version
    #[command(visible_alias = "u")]
    Uninstall {
        #[command(flatten)]
        target: Target,

        /// Do not ask for confirmation when the version is global
        #[arg(short, long)]
        yes: bool,
    },

    /// List installed or available versions
    #[command(visible_alias = "ls")]
    List {
        /// Show all versions available for this platform
        #[arg(short, long)]
        all: bool,
    },

    /// Set the global version
    #[command(visible_alias = "g")]
    Global(Target),
}

#[derive(Args, Debug)]
pub struct Target {
    /// Version and vendor, e.g. 17-temurin
    #[arg(value_name = "VERSION-VENDOR")]
    pub target: Version,
}
