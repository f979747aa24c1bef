// ── Instance lifecycle operations ──

use crate::model::Instance;

use super::ResourceService;

impl ResourceService<Instance> {
    /// Ask the node to launch the instance. `false` on any failure.
    pub async fn start(&self, id: &str) -> bool {
        self.post_action("start", id, "start").await
    }

    /// Ask the node to shut the instance down. `false` on any failure.
    pub async fn stop(&self, id: &str) -> bool {
        self.post_action("stop", id, "stop").await
    }
}
