//! Instance presentation and lifecycle commands.

use tabled::Tabled;

use beagle_core::{Instance, InstanceService};

use crate::cli::{GlobalOpts, InstancesArgs, InstancesCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct InstanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Max Players")]
    max_players: String,
}

impl From<&Instance> for InstanceRow {
    fn from(i: &Instance) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            card: i.card_id.clone(),
            node: i.node_id.clone(),
            status: i.status.to_string(),
            port: i.config.port.to_string(),
            max_players: i.config.max_players.to_string(),
        }
    }
}

impl Present for Instance {
    type Row = InstanceRow;

    fn row(&self) -> InstanceRow {
        InstanceRow::from(self)
    }

    fn detail(&self) -> String {
        let settings = self
            .config
            .settings
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();

        output::detail_lines(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Card", self.card_id.clone()),
            ("Node", self.node_id.clone()),
            ("Status", self.status.to_string()),
            ("Port", self.config.port.to_string()),
            ("Max Players", self.config.max_players.to_string()),
            ("Settings", util::fmt_list(&settings)),
            ("Last Start", util::fmt_time(self.last_started_at)),
            ("Last Stop", util::fmt_time(self.last_stopped_at)),
            ("Created", util::fmt_time(self.created_at)),
            ("Updated", util::fmt_time(self.updated_at)),
        ])
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &InstanceService,
    args: InstancesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InstancesCommand::Crud(cmd) => crud::handle(service, cmd, global).await,

        InstancesCommand::Start { id } => {
            if !service.start(&id).await {
                return Err(CliError::operation_failed("start", "instance"));
            }
            output::print_status(&format!("instance '{id}' starting"), global.quiet);
            Ok(())
        }

        InstancesCommand::Stop { id } => {
            if !util::confirm(&format!("Stop instance '{id}'?"), global.yes)? {
                return Ok(());
            }
            if !service.stop(&id).await {
                return Err(CliError::operation_failed("stop", "instance"));
            }
            output::print_status(&format!("instance '{id}' stopping"), global.quiet);
            Ok(())
        }
    }
}
