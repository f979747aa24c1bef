//! Handlers shared by every resource command.
//!
//! Each entity plugs in through [`Present`]: a table row for list views and
//! a detail block for `get`. Everything else (pagination flags, payload
//! files, confirmation, failure reporting) is identical across resources.

use tabled::Tabled;

use beagle_core::{ListParams, Resource, ResourceService};

use crate::cli::{CrudCommand, GlobalOpts, ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

/// How an entity is shown on a terminal.
pub trait Present: Resource {
    type Row: Tabled;

    fn row(&self) -> Self::Row;

    fn detail(&self) -> String;
}

pub async fn handle<E: Present>(
    service: &ResourceService<E>,
    cmd: CrudCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        CrudCommand::List(args) => {
            let page = service.get_list(&list_params(&args)).await;
            let out = output::render_list(&global.output, &page.list, E::row, |e| {
                e.id().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) {
                output::print_status(
                    &format!(
                        "{} of {} {}s (page {}, {} source)",
                        page.list.len(),
                        page.total,
                        E::KIND,
                        args.page,
                        service.mode()
                    ),
                    global.quiet,
                );
            }
            Ok(())
        }

        CrudCommand::Get { id } => {
            let record = service
                .get_detail(&id)
                .await
                .ok_or_else(|| CliError::not_found(E::KIND, &id))?;
            let out = output::render_single(&global.output, &record, E::detail, |e| {
                e.id().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Create { from_file } => {
            let payload = util::read_json_file(&from_file)?;
            let id = service.create(&payload).await;
            if id.is_empty() {
                return Err(CliError::operation_failed("create", E::KIND));
            }
            output::print_output(&id, global.quiet);
            output::print_status(&format!("{} created", E::KIND), global.quiet);
            Ok(())
        }

        CrudCommand::Update { id, from_file } => {
            let payload = util::read_json_file(&from_file)?;
            if !service.update(&id, &payload).await {
                return Err(CliError::operation_failed("update", E::KIND));
            }
            output::print_status(&format!("{} '{id}' updated", E::KIND), global.quiet);
            Ok(())
        }

        CrudCommand::Delete { id } => {
            if !util::confirm(&format!("Delete {} '{id}'?", E::KIND), global.yes)? {
                return Ok(());
            }
            if !service.delete(&id).await {
                return Err(CliError::operation_failed("delete", E::KIND));
            }
            output::print_status(&format!("{} '{id}' deleted", E::KIND), global.quiet);
            Ok(())
        }
    }
}

fn list_params(args: &ListArgs) -> ListParams {
    let params = ListParams::page(args.page, args.page_size);
    match args.keyword {
        Some(ref keyword) => params.with_keyword(keyword.as_str()),
        None => params,
    }
}
