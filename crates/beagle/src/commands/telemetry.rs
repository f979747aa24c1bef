//! Telemetry schema conversion commands.
//!
//! Reads one payload or an array of payloads (either generation) and writes
//! them back in the requested schema. No data layer or network is involved.

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use beagle_core::reconcile;
use beagle_core::{CoreError, LegacyResourceInfo, ResourceInfo};

use crate::cli::{GlobalOpts, TelemetryArgs, TelemetryCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TelemetryRow {
    #[tabled(rename = "Node")]
    id: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "CPU %")]
    cpu_usage: String,
    #[tabled(rename = "Mem %")]
    memory_usage: String,
    #[tabled(rename = "GPU")]
    gpu: String,
    #[tabled(rename = "GPU %")]
    gpu_usage: String,
    #[tabled(rename = "Disk")]
    disk: String,
}

impl From<&ResourceInfo> for TelemetryRow {
    fn from(r: &ResourceInfo) -> Self {
        Self {
            id: r.id.clone(),
            cpu: r.hardware.cpu.model.clone(),
            cpu_usage: format!("{:.1}", r.metrics.cpu.usage),
            memory_usage: format!("{:.1}", r.metrics.memory.usage),
            gpu: r.hardware.gpu.model.clone(),
            gpu_usage: format!("{:.1}", r.metrics.gpu.usage),
            disk: r
                .hardware
                .storage
                .devices
                .first()
                .map_or_else(|| "-".into(), |d| format!("{} ({})", d.model, d.device_type)),
        }
    }
}

impl From<&LegacyResourceInfo> for TelemetryRow {
    fn from(l: &LegacyResourceInfo) -> Self {
        let hw = &l.hardware;
        Self {
            id: l.id.clone(),
            cpu: hw.cpu.model.clone(),
            cpu_usage: format!("{:.1}", hw.cpu.usage),
            memory_usage: format!("{:.1}", hw.memory.usage),
            gpu: hw.gpu.model.clone(),
            gpu_usage: format!("{:.1}", hw.gpu.usage),
            disk: hw
                .disk
                .as_ref()
                .map_or_else(|| "-".into(), |d| format!("{} ({})", d.model, d.disk_type)),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: TelemetryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TelemetryCommand::Upgrade { file } => {
            let input = util::read_json_file(&file)?;
            let out = convert(&input, reconcile::upgrade_value, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        TelemetryCommand::Downgrade { file } => {
            let input = util::read_json_file(&file)?;
            let out = convert(&input, reconcile::downgrade_value, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Apply `f` to one payload or to every element of an array, keeping the
/// input's shape in structured output.
fn convert<T>(
    input: &Value,
    f: fn(&Value) -> Result<T, CoreError>,
    global: &GlobalOpts,
) -> Result<String, CliError>
where
    T: Serialize,
    for<'a> TelemetryRow: From<&'a T>,
{
    let id_of = |row: &T| TelemetryRow::from(row).id;

    if let Value::Array(items) = input {
        let converted = items.iter().map(f).collect::<Result<Vec<T>, _>>()?;
        return output::render_list(
            &global.output,
            &converted,
            |t: &T| TelemetryRow::from(t),
            id_of,
        );
    }

    let converted = f(input)?;
    output::render_single(
        &global.output,
        &converted,
        |t: &T| {
            Table::new([TelemetryRow::from(t)])
                .with(Style::rounded())
                .to_string()
        },
        id_of,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use serde_json::json;

    fn global(output: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            mock: false,
            api_url: None,
            token: None,
            output,
            verbose: 0,
            quiet: false,
            yes: false,
            insecure: false,
            timeout: None,
        }
    }

    #[test]
    fn array_input_stays_an_array() {
        let input = json!([
            {"id": "a", "hardware": {"cpu": {"model": "X", "usage": 5}}},
            {"id": "b", "hardware": {"cpu": {"model": "Y", "usage": 6}}}
        ]);
        let out = convert(&input, reconcile::upgrade_value, &global(OutputFormat::Json)).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["metrics"]["cpu"]["usage"], json!(6.0));
    }

    #[test]
    fn plain_output_lists_node_ids() {
        let input = json!([{"id": "a"}, {"id": "b"}]);
        let out =
            convert(&input, reconcile::downgrade_value, &global(OutputFormat::Plain)).unwrap();
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn one_bad_element_fails_the_batch() {
        let input = json!([{"id": "a"}, {"id": "b", "timestamp": "yesterday"}]);
        let err = convert(&input, reconcile::upgrade_value, &global(OutputFormat::Json))
            .unwrap_err();
        assert!(matches!(err, CliError::UnexpectedResponse { .. }));
    }
}
