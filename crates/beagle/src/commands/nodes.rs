//! Node presentation.

use tabled::Tabled;

use beagle_core::Node;

use crate::output;

use super::crud::Present;
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    node_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "CPU %")]
    cpu: String,
    #[tabled(rename = "Instances")]
    instances: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
            node_type: n.node_type.to_string(),
            status: n.status.to_string(),
            region: n.region.clone(),
            address: address(n),
            cpu: format!("{:.1}", n.metrics.cpu_usage),
            instances: n.metrics.instance_count.to_string(),
        }
    }
}

fn address(n: &Node) -> String {
    if n.network.ip.is_empty() {
        "-".into()
    } else {
        format!("{}:{}", n.network.ip, n.network.port)
    }
}

impl Present for Node {
    type Row = NodeRow;

    fn row(&self) -> NodeRow {
        NodeRow::from(self)
    }

    fn detail(&self) -> String {
        let r = &self.resources;
        let m = &self.metrics;
        let gpu = r
            .gpu
            .as_ref()
            .map_or_else(|| "-".into(), |g| format!("{} ({} MB)", g.model, g.memory));
        let labels = self
            .labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();

        output::detail_lines(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Type", self.node_type.to_string()),
            ("Status", self.status.to_string()),
            ("Region", self.region.clone()),
            ("Address", address(self)),
            ("Protocol", self.network.protocol.clone()),
            (
                "Resources",
                format!("{} cores, {} MB RAM, {} GB disk", r.cpu, r.memory, r.storage),
            ),
            ("GPU", gpu),
            (
                "Usage",
                format!(
                    "cpu {:.1}%  mem {:.1}%  disk {:.1}%  net {:.1}%",
                    m.cpu_usage, m.memory_usage, m.storage_usage, m.network_usage
                ),
            ),
            (
                "Load",
                format!("{} instances, {} players", m.instance_count, m.player_count),
            ),
            ("Uptime", format!("{}s", m.uptime)),
            ("Labels", util::fmt_list(&labels)),
            ("Created", util::fmt_time(self.created_at)),
            ("Updated", util::fmt_time(self.updated_at)),
        ])
    }
}
