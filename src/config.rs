/// Tuning values for a game session, loadable from TOML.
///
/// Every section falls back to its `Default` when missing from the file, so a
/// config only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

// ── Sections ─────────────────────────────────────────────────────────────────

/// Visible play area, in world units.  Y grows upward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub half_width: f32,
    pub top_y: f32,
    pub bottom_y: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { half_width: 22.0, top_y: 12.0, bottom_y: -10.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub start_x: f32,
    pub y: f32,
    /// Lateral speed in world units per second.
    pub speed: f32,
    /// The tree stays within `[-boundary_offset, boundary_offset]`.
    pub boundary_offset: f32,
    /// Chance per tick of reversing direction on a whim.
    pub direction_change_chance: f32,
    /// Seconds between drop attempts.
    pub drop_interval: f32,
    /// Chance that a drop attempt actually releases an apple.
    pub drop_chance: f32,
    /// Vertical offset from the tree to the spawned apple.
    pub spawn_offset_y: f32,
    /// Golden apples arrive every `golden_min..=golden_max` drops.
    pub golden_min: u32,
    pub golden_max: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            y: 10.0,
            speed: 5.0,
            boundary_offset: 20.0,
            direction_change_chance: 0.0015,
            drop_interval: 0.4,
            drop_chance: 0.94,
            spawn_offset_y: -1.5,
            golden_min: 25,
            golden_max: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketConfig {
    pub start_x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// Multiplier on raw pointer delta.
    pub sensitivity: f32,
    /// Keyboard movement in world units per second.
    pub key_speed: f32,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            y: -7.0,
            half_width: 1.5,
            half_height: 0.5,
            sensitivity: 1.0,
            key_speed: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_lives: u32,
    pub points_per_apple: u32,
    pub points_per_golden_apple: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { starting_lives: 3, points_per_apple: 10, points_per_golden_apple: 100 }
    }
}

/// What the tree instantiates when it drops something.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTemplate {
    pub fall_speed: f32,
    /// Items below this height are gone for good.
    pub destroy_y: f32,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self { fall_speed: 5.0, destroy_y: -10.0 }
    }
}

// ── Root ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub tree: TreeConfig,
    pub basket: BasketConfig,
    pub rules: RulesConfig,
    /// A missing template means the tree never drops that kind.
    pub apple: Option<ItemTemplate>,
    pub golden_apple: Option<ItemTemplate>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tree: TreeConfig::default(),
            basket: BasketConfig::default(),
            rules: RulesConfig::default(),
            apple: Some(ItemTemplate::default()),
            golden_apple: Some(ItemTemplate { fall_speed: 6.0, ..ItemTemplate::default() }),
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation's guarantees
    /// (an apple that never falls would never resolve to a catch or miss).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tree;
        if !(t.boundary_offset > 0.0) {
            return Err(invalid("tree.boundary_offset", "must be positive"));
        }
        if t.speed < 0.0 {
            return Err(invalid("tree.speed", "must not be negative"));
        }
        if !(t.drop_interval > 0.0) {
            return Err(invalid("tree.drop_interval", "must be positive"));
        }
        check_probability("tree.direction_change_chance", t.direction_change_chance)?;
        check_probability("tree.drop_chance", t.drop_chance)?;
        if t.golden_min > t.golden_max {
            return Err(invalid(
                "tree.golden_min",
                format!("{} exceeds golden_max {}", t.golden_min, t.golden_max),
            ));
        }

        let b = &self.basket;
        if !(b.half_width > 0.0) || !(b.half_height > 0.0) {
            return Err(invalid("basket.half_width", "basket extents must be positive"));
        }

        if self.rules.starting_lives == 0 {
            return Err(invalid("rules.starting_lives", "must be at least 1"));
        }

        let w = &self.world;
        if !(w.half_width > 0.0) {
            return Err(invalid("world.half_width", "must be positive"));
        }
        if !(w.top_y > w.bottom_y) {
            return Err(invalid("world.top_y", "must be above world.bottom_y"));
        }

        for (field, template) in [("apple.fall_speed", &self.apple), ("golden_apple.fall_speed", &self.golden_apple)] {
            if let Some(template) = template {
                if !(template.fall_speed > 0.0) {
                    return Err(invalid(field, "must be positive"));
                }
            }
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, p: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(field, format!("{p} is not within 0..=1")))
    }
}
