use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::application::dto::OutputFormat;
use crate::component_cleanup::domain::{ComponentKind, ComponentRef};

/// Inspect and prune solution components of a CRM organisation snapshot
#[derive(Parser, Debug)]
#[command(name = "solution-pruner")]
#[command(version)]
#[command(
    about = "Dependency analysis and cascading deletion of solution components",
    long_about = None
)]
pub struct Args {
    /// Snapshot file exported from the organisation (JSON)
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Config file (defaults to solution-pruner.config.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// A component addressed by kind and id
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct ComponentArg {
    /// Component kind, by name (e.g. Workflow) or numeric code (e.g. 29)
    #[arg(short, long)]
    pub kind: ComponentKind,

    /// Component object id
    #[arg(short, long)]
    pub id: Uuid,
}

impl ComponentArg {
    pub fn component(&self) -> ComponentRef {
        ComponentRef::new(self.kind, self.id)
    }
}

/// Walk options shared by the dependents and requirements queries
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct WalkArgs {
    /// Follow edges past the first level
    #[arg(short, long)]
    pub recursive: bool,

    /// Deepest level followed when walking recursively
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List everything that has to be deleted together with a component
    ForDelete {
        #[command(flatten)]
        component: ComponentArg,

        /// Start from the component's membership row in this solution
        #[arg(short = 'S', long)]
        solution: Option<String>,
    },

    /// List components depending on a component
    Dependents {
        #[command(flatten)]
        component: ComponentArg,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// List components a component depends on
    Requirements {
        #[command(flatten)]
        component: ComponentArg,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Delete a component after everything blocking it
    Delete {
        #[command(flatten)]
        component: ComponentArg,

        /// Leave managed components in place
        #[arg(short, long)]
        unmanaged_only: bool,

        /// Report what would be deleted without changing anything
        #[arg(short = 'n', long)]
        what_if: bool,

        /// Save the modified snapshot back to its file
        #[arg(short, long, conflicts_with = "what_if")]
        write_back: bool,
    },

    /// Add a component to a solution
    AddToSolution {
        #[command(flatten)]
        component: ComponentArg,

        /// Unique name of the solution
        #[arg(short = 'S', long)]
        solution: String,

        /// Save the modified snapshot back to its file
        #[arg(short, long)]
        write_back: bool,
    },

    /// Remove one component, or every root component, from a solution
    RemoveFromSolution {
        /// Component kind (requires --id)
        #[arg(short, long, requires = "id")]
        kind: Option<ComponentKind>,

        /// Component object id (requires --kind)
        #[arg(short, long, requires = "kind")]
        id: Option<Uuid>,

        /// Unique name of the solution
        #[arg(short = 'S', long)]
        solution: String,

        /// Save the modified snapshot back to its file
        #[arg(short, long)]
        write_back: bool,
    },

    /// List the components of a solution
    Components {
        /// Unique name of the solution
        #[arg(short = 'S', long)]
        solution: String,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
