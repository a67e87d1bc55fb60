//! Behaviour lookup by name.

use crate::{BehaviorError, BehaviorModel, BehaviorResult, NavAgentConfig, NavMeshBehavior, NoopBehavior};

/// Canonical names of every built-in behaviour.
pub const BEHAVIOR_NAMES: [&str; 2] = [NavMeshBehavior::NAME, NoopBehavior::NAME];

/// Build the behaviour called `name`.
///
/// Matching ignores case and surrounding whitespace, and accepts the name
/// with or without a trailing `Behaviour` / `Behavior`, so
/// `"NavMeshBehaviour"`, `"navmesh"` and `"NavMeshBehavior"` all select the
/// same model.
pub fn behavior_from_name(name: &str, config: &NavAgentConfig) -> BehaviorResult<Box<dyn BehaviorModel>> {
    let lower = name.trim().to_ascii_lowercase();
    let key = lower
        .strip_suffix("behaviour")
        .or_else(|| lower.strip_suffix("behavior"))
        .unwrap_or(&lower);

    match key {
        "navmesh" => Ok(Box::new(NavMeshBehavior::new(config.clone()))),
        "noop"    => Ok(Box::new(NoopBehavior)),
        _         => Err(BehaviorError::UnknownBehavior(name.to_owned())),
    }
}
