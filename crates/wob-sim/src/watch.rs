//! Clip watching: detect the camera's near plane passing into geometry.
//!
//! Every agent carries a camera at its position looking along its heading.
//! While the watcher is active, a probe point `near_clip` ahead of each agent
//! is tested against tagged axis-aligned obstacles.  Overlaps with watched
//! tags raise Enter/Stay/Exit events and drive a per-agent `colliding` flag.

use std::fmt;

use tracing::info;

use wob_core::{AgentId, ObstacleId, Pose, Tick, Vec3};

#[cfg(feature = "fx-hash")]
type TagSet = rustc_hash::FxHashSet<String>;
#[cfg(not(feature = "fx-hash"))]
type TagSet = std::collections::HashSet<String>;

/// Tags the watcher looks for unless told otherwise.
pub const DEFAULT_WATCHED_TAGS: [&str; 2] = ["Cube1", "Cube2"];

/// Default distance from the camera to its near plane.
pub const DEFAULT_NEAR_CLIP: f32 = 0.3;

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id:  ObstacleId,
    pub tag: String,
    pub min: Vec3,
    pub max: Vec3,
}

impl Obstacle {
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

impl ContactPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPhase::Enter => "enter",
            ContactPhase::Stay  => "stay",
            ContactPhase::Exit  => "exit",
        }
    }
}

impl fmt::Display for ContactPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One near-plane contact transition, with the debug data needed to
/// reproduce it (where the agent stood and where its camera looked).
#[derive(Clone, Debug, PartialEq)]
pub struct ClipEvent {
    pub tick:             Tick,
    pub time_secs:        f64,
    pub agent:            AgentId,
    pub phase:            ContactPhase,
    pub obstacle:         ObstacleId,
    pub tag:              String,
    pub position:         Vec3,
    pub camera_direction: Vec3,
}

// ── ClipWatcher ───────────────────────────────────────────────────────────────

pub struct ClipWatcher {
    obstacles: Vec<Obstacle>,
    watched:   TagSet,
    active:    bool,

    /// Distance from the camera to its near plane.
    pub near_clip: f32,

    /// Watched obstacles each agent's probe overlapped on the last check,
    /// ascending by id.
    contacts: Vec<Vec<ObstacleId>>,

    /// Per-agent: is the near plane currently inside watched geometry?
    pub colliding: Vec<bool>,
}

impl ClipWatcher {
    /// An inactive watcher for [`DEFAULT_WATCHED_TAGS`].
    pub fn new(near_clip: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            watched:   DEFAULT_WATCHED_TAGS.iter().map(|t| t.to_string()).collect(),
            active:    false,
            near_clip,
            contacts:  Vec::new(),
            colliding: Vec::new(),
        }
    }

    pub fn add_obstacle(&mut self, tag: impl Into<String>, min: Vec3, max: Vec3) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        let (lo, hi) = (
            Vec3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            Vec3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        );
        self.obstacles.push(Obstacle { id, tag: tag.into(), min: lo, max: hi });
        id
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Also watch obstacles tagged `tag`.
    pub fn watch_tag(&mut self, tag: impl Into<String>) {
        self.watched.insert(tag.into());
    }

    /// Stop watching every tag.
    pub fn clear_tags(&mut self) {
        self.watched.clear();
    }

    pub fn is_watched(&self, tag: &str) -> bool {
        self.watched.contains(tag)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn watching on or off.  Turning it off forgets all contacts.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            info!(active, "clip watcher toggled");
        }
        self.active = active;
        if !active {
            self.contacts.iter_mut().for_each(Vec::clear);
            self.colliding.iter_mut().for_each(|c| *c = false);
        }
    }

    /// Size per-agent state for `agent_count` agents.
    pub fn ensure_agents(&mut self, agent_count: usize) {
        self.contacts.resize_with(agent_count, Vec::new);
        self.colliding.resize(agent_count, false);
    }

    /// Centre of the camera's near plane.
    #[inline]
    pub fn probe_point(&self, pose: &Pose) -> Vec3 {
        pose.position + pose.forward * self.near_clip
    }

    /// Update contacts for `agent` at `pose` and return the transitions.
    ///
    /// Returns nothing while inactive.
    pub fn check(&mut self, agent: AgentId, pose: &Pose, tick: Tick, time_secs: f64) -> Vec<ClipEvent> {
        if !self.active {
            return Vec::new();
        }
        let i = agent.index();
        if i >= self.contacts.len() {
            self.ensure_agents(i + 1);
        }

        let probe = self.probe_point(pose);
        let current: Vec<ObstacleId> = self
            .obstacles
            .iter()
            .filter(|o| self.watched.contains(&o.tag) && o.contains(probe))
            .map(|o| o.id)
            .collect();
        let previous = std::mem::replace(&mut self.contacts[i], current);

        let event = |obstacle: ObstacleId, phase: ContactPhase| ClipEvent {
            tick,
            time_secs,
            agent,
            phase,
            obstacle,
            tag:              self.obstacles[obstacle.index()].tag.clone(),
            position:         pose.position,
            camera_direction: pose.forward,
        };

        let mut events = Vec::new();
        for &id in &self.contacts[i] {
            let phase = if previous.contains(&id) { ContactPhase::Stay } else { ContactPhase::Enter };
            events.push(event(id, phase));
        }
        for &id in previous.iter().filter(|id| !self.contacts[i].contains(*id)) {
            events.push(event(id, ContactPhase::Exit));
        }

        self.colliding[i] = !self.contacts[i].is_empty();
        for e in events.iter().filter(|e| e.phase == ContactPhase::Enter) {
            info!(
                agent = %e.agent,
                tag = %e.tag,
                position = %e.position,
                camera = %e.camera_direction,
                "object clipped"
            );
        }
        events
    }
}

impl Default for ClipWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR_CLIP)
    }
}
