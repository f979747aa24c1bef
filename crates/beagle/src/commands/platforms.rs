//! Platform presentation and remote-access commands.

use serde::Serialize;
use tabled::Tabled;

use beagle_core::{Platform, PlatformService};

use crate::cli::{GlobalOpts, PlatformsArgs, PlatformsCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct PlatformRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Type")]
    platform_type: String,
    #[tabled(rename = "OS")]
    os: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Platform> for PlatformRow {
    fn from(p: &Platform) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            version: p.version.clone(),
            platform_type: p.platform_type.clone(),
            os: p.os.clone(),
            status: p.status.to_string(),
        }
    }
}

impl Present for Platform {
    type Row = PlatformRow;

    fn row(&self) -> PlatformRow {
        PlatformRow::from(self)
    }

    fn detail(&self) -> String {
        let files = self
            .files
            .iter()
            .map(|f| format!("{} [{}] {}", f.id, f.file_type, f.url))
            .collect::<Vec<_>>();
        let config = self
            .config
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();

        output::detail_lines(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Version", self.version.clone()),
            ("Type", self.platform_type.clone()),
            ("OS", self.os.clone()),
            ("Status", self.status.to_string()),
            ("Description", self.description.clone()),
            ("Image", self.image.clone()),
            ("Binary", self.bin.clone()),
            ("Features", util::fmt_list(&self.features)),
            ("Files", util::fmt_list(&files)),
            ("Config", util::fmt_list(&config)),
            ("Created", util::fmt_time(self.created_at)),
            ("Updated", util::fmt_time(self.updated_at)),
        ])
    }
}

// ── Access link ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessLink {
    platform_id: String,
    url: String,
    refreshed: bool,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &PlatformService,
    args: PlatformsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PlatformsCommand::Crud(cmd) => crud::handle(service, cmd, global).await,

        PlatformsCommand::Access { id, refresh } => {
            let url = if refresh {
                service.refresh_access(&id).await?
            } else {
                service.get_access(&id).await?
            };
            if url.is_empty() {
                output::print_status(
                    &format!("platform '{id}' has no remote-access link configured"),
                    global.quiet,
                );
                return Ok(());
            }

            let link = AccessLink {
                platform_id: id,
                url,
                refreshed: refresh,
            };
            let out = output::render_single(
                &global.output,
                &link,
                |l| {
                    output::detail_lines(&[
                        ("Platform", l.platform_id.clone()),
                        ("URL", l.url.clone()),
                        ("Refreshed", l.refreshed.to_string()),
                    ])
                },
                |l| l.url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
