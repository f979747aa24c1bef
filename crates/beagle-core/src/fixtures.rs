// ── Static fixture collections ──
//
// The records the mock path serves. Loaded once at startup, either from the
// JSON embedded in this crate or from a directory on disk, and shared
// read-only with every service afterwards.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{Card, Instance, Node, Platform, Resource};

const BUILTIN_NODES: &str = include_str!("../fixtures/nodes.json");
const BUILTIN_PLATFORMS: &str = include_str!("../fixtures/platforms.json");
const BUILTIN_CARDS: &str = include_str!("../fixtures/cards.json");
const BUILTIN_INSTANCES: &str = include_str!("../fixtures/instances.json");

/// One immutable collection per entity type.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub(crate) nodes: Arc<[Node]>,
    pub(crate) platforms: Arc<[Platform]>,
    pub(crate) cards: Arc<[Card]>,
    pub(crate) instances: Arc<[Instance]>,
}

impl FixtureSet {
    pub fn new(
        nodes: Vec<Node>,
        platforms: Vec<Platform>,
        cards: Vec<Card>,
        instances: Vec<Instance>,
    ) -> Self {
        Self {
            nodes: nodes.into(),
            platforms: platforms.into(),
            cards: cards.into(),
            instances: instances.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// The sample data compiled into the crate.
    pub fn builtin() -> Result<Self, CoreError> {
        Ok(Self::new(
            parse::<Node>(BUILTIN_NODES, "built-in")?,
            parse::<Platform>(BUILTIN_PLATFORMS, "built-in")?,
            parse::<Card>(BUILTIN_CARDS, "built-in")?,
            parse::<Instance>(BUILTIN_INSTANCES, "built-in")?,
        ))
    }

    /// Load `nodes.json`, `platforms.json`, `cards.json` and
    /// `instances.json` from `dir`. A missing file yields an empty
    /// collection; an unreadable or malformed one is an error.
    pub fn from_dir(dir: &Path) -> Result<Self, CoreError> {
        if !dir.is_dir() {
            return Err(CoreError::Fixtures {
                message: format!("{} is not a directory", dir.display()),
            });
        }
        Ok(Self::new(
            load::<Node>(dir)?,
            load::<Platform>(dir)?,
            load::<Card>(dir)?,
            load::<Instance>(dir)?,
        ))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

fn load<E: Resource>(dir: &Path) -> Result<Vec<E>, CoreError> {
    let path = dir.join(format!("{}.json", E::PATH));
    if !path.exists() {
        debug!(path = %path.display(), "fixture file missing; using empty collection");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(&path).map_err(|e| CoreError::Fixtures {
        message: format!("cannot read {}: {e}", path.display()),
    })?;
    let records = parse::<E>(&raw, &path.display().to_string())?;
    debug!(path = %path.display(), count = records.len(), "loaded fixtures");
    Ok(records)
}

fn parse<E: Resource>(raw: &str, origin: &str) -> Result<Vec<E>, CoreError> {
    serde_json::from_str(raw).map_err(|e| CoreError::Fixtures {
        message: format!("invalid {} fixtures ({origin}): {e}", E::KIND),
    })
}
