//! Command dispatch: bridges CLI args -> data layer services -> output formatting.

pub mod cards;
pub mod config_cmd;
pub mod crud;
pub mod instances;
pub mod nodes;
pub mod platforms;
pub mod telemetry;
pub mod util;

use beagle_core::DataLayer;

use crate::cli::{CardsCommand, Command, GlobalOpts, NodesCommand};
use crate::error::CliError;

/// Dispatch a resource command to the appropriate handler.
pub async fn dispatch(cmd: Command, data: &DataLayer, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Nodes(args) => match args.command {
            NodesCommand::Crud(crud) => crud::handle(data.nodes(), crud, global).await,
        },
        Command::Platforms(args) => platforms::handle(data.platforms(), args, global).await,
        Command::Cards(args) => match args.command {
            CardsCommand::Crud(crud) => crud::handle(data.cards(), crud, global).await,
        },
        Command::Instances(args) => instances::handle(data.instances(), args, global).await,
        // Handled in main before a data layer is built
        Command::Telemetry(_) | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Validation {
                field: "command".into(),
                reason: "does not use the data layer".into(),
            })
        }
    }
}
