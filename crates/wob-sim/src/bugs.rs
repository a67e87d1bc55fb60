//! Injectable bugs and the registry that toggles them.
//!
//! A bug is a deliberate glitch layered over the simulation so detectors have
//! something to find.  Each kind carries a mask colour that marks the pixels
//! it affects in the ground-truth mask view.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::info;

/// 8-bit RGB colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BugKind {
    /// Fills the whole observation with a solid colour.
    BlackScreen,
}

impl BugKind {
    pub const ALL: [BugKind; 1] = [BugKind::BlackScreen];

    /// Name used on the config channel.
    pub fn name(self) -> &'static str {
        match self {
            BugKind::BlackScreen => "BlackScreen",
        }
    }

    /// Colour this bug paints into the mask view.
    pub fn mask_color(self) -> Rgb {
        match self {
            BugKind::BlackScreen => Rgb(255, 0, 255),
        }
    }
}

impl fmt::Display for BugKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BugKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BugKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_owned())
    }
}

/// What an observation and its mask look like while a fill bug is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenFill {
    pub observation: Rgb,
    pub mask:        Rgb,
}

/// The set of currently enabled bugs.
#[derive(Clone, Debug)]
pub struct BugRegistry {
    enabled: BTreeSet<BugKind>,

    /// Colour `BlackScreen` paints over the observation.
    pub screen_color: Rgb,
}

impl BugRegistry {
    pub fn new() -> Self {
        Self { enabled: BTreeSet::new(), screen_color: Rgb::BLACK }
    }

    pub fn with_screen_color(mut self, color: Rgb) -> Self {
        self.screen_color = color;
        self
    }

    /// Enable or disable `kind`.  Returns `true` if the state changed.
    pub fn set(&mut self, kind: BugKind, enabled: bool) -> bool {
        let changed = if enabled { self.enabled.insert(kind) } else { self.enabled.remove(&kind) };
        if changed {
            info!(bug = %kind, enabled, "bug toggled");
        }
        changed
    }

    pub fn enable(&mut self, kind: BugKind) -> bool {
        self.set(kind, true)
    }

    pub fn disable(&mut self, kind: BugKind) -> bool {
        self.set(kind, false)
    }

    #[inline]
    pub fn is_enabled(&self, kind: BugKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Enabled bugs in a stable order.
    pub fn enabled(&self) -> impl Iterator<Item = BugKind> + '_ {
        self.enabled.iter().copied()
    }

    /// The fill currently covering every observation, if any.
    pub fn screen_fill(&self) -> Option<ScreenFill> {
        self.is_enabled(BugKind::BlackScreen).then(|| ScreenFill {
            observation: self.screen_color,
            mask:        BugKind::BlackScreen.mask_color(),
        })
    }
}

impl Default for BugRegistry {
    fn default() -> Self {
        Self::new()
    }
}
