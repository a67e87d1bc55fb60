//! TOML arena description.
//!
//! Every section is optional; a missing file or section falls back to the
//! built-in arena below.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use wob_agent::AgentSpec;
use wob_behavior::NavAgentConfig;
use wob_core::{NodeId, Pose, SimConfig, Vec3};
use wob_nav::NavMeshBuilder;
use wob_sim::{BugKind, ClipWatcher, DEFAULT_NEAR_CLIP};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub sim:       SimConfig,
    pub nav:       NavAgentConfig,
    pub behaviour: String,
    pub bugs:      Vec<BugKind>,
    pub mesh:      MeshConfig,
    pub watcher:   WatcherConfig,
    pub agents:    Vec<AgentConfig>,
    pub obstacles: Vec<ObstacleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub cols:          u32,
    pub rows:          u32,
    pub spacing:       f32,
    pub half_width:    f32,
    pub snap_distance: f32,
    /// Grid links to remove, as node index pairs.
    pub blocked:       Vec<[u32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub active:    bool,
    pub near_clip: f32,
    /// Extra tags to watch besides `Cube1` and `Cube2`.
    pub tags:      Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub position:      Vec3,
    #[serde(default)]
    pub yaw_deg:       f32,
    pub move_speed:    Option<f32>,
    pub angular_speed: Option<f32>,
    pub radius:        Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleConfig {
    pub tag: String,
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            sim:       SimConfig::default(),
            nav:       NavAgentConfig::default(),
            behaviour: "NavMeshBehaviour".into(),
            bugs:      Vec::new(),
            mesh:      MeshConfig::default(),
            watcher:   WatcherConfig::default(),
            agents:    vec![
                AgentConfig::at(Vec3::new(8.0, 0.0, 8.0), 0.0),
                AgentConfig::at(Vec3::new(4.0, 0.0, 12.0), 90.0),
                AgentConfig::at(Vec3::new(12.0, 0.0, 4.0), -90.0),
            ],
            obstacles: vec![
                ObstacleConfig::cube("Cube1", Vec3::new(5.0, 0.5, 5.0)),
                ObstacleConfig::cube("Cube2", Vec3::new(11.0, 0.5, 11.0)),
            ],
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cols:          9,
            rows:          9,
            spacing:       2.0,
            half_width:    NavMeshBuilder::DEFAULT_HALF_WIDTH,
            snap_distance: NavMeshBuilder::DEFAULT_SNAP_DISTANCE,
            blocked:       Vec::new(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { active: true, near_clip: DEFAULT_NEAR_CLIP, tags: Vec::new() }
    }
}

impl AgentConfig {
    fn at(position: Vec3, yaw_deg: f32) -> Self {
        Self { position, yaw_deg, move_speed: None, angular_speed: None, radius: None }
    }

    pub fn spec(&self) -> AgentSpec {
        let mut spec = AgentSpec::at(Pose::from_yaw(self.position, self.yaw_deg));
        if let Some(v) = self.move_speed {
            spec = spec.move_speed(v);
        }
        if let Some(v) = self.angular_speed {
            spec = spec.angular_speed(v);
        }
        if let Some(v) = self.radius {
            spec = spec.radius(v);
        }
        spec
    }
}

impl ObstacleConfig {
    /// A unit cube centred on `centre`.
    fn cube(tag: &str, centre: Vec3) -> Self {
        let half = Vec3::new(0.5, 0.5, 0.5);
        Self { tag: tag.into(), min: centre - half, max: centre + half }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: ArenaConfig = toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// The lattice with blocked links removed.
    pub fn mesh_builder(&self) -> Result<NavMeshBuilder> {
        let m = &self.mesh;
        if m.cols == 0 || m.rows == 0 {
            bail!("mesh needs at least one row and one column");
        }
        let mut builder = NavMeshBuilder::grid(m.cols, m.rows, m.spacing)
            .half_width(m.half_width)
            .snap_distance(m.snap_distance);
        for &[a, b] in &m.blocked {
            if !builder.set_link_blocked(NodeId(a), NodeId(b), true) {
                bail!("mesh has no link between nodes {a} and {b}");
            }
        }
        Ok(builder)
    }

    pub fn watcher(&self) -> ClipWatcher {
        let mut watcher = ClipWatcher::new(self.watcher.near_clip);
        for tag in &self.watcher.tags {
            watcher.watch_tag(tag.clone());
        }
        for o in &self.obstacles {
            watcher.add_obstacle(o.tag.clone(), o.min, o.max);
        }
        watcher.set_active(self.watcher.active);
        watcher
    }
}
