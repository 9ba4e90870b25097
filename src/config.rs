//! Game configuration.
//!
//! Every tunable lives in one immutable [`GameConfig`] built at start-up and
//! carried by value inside the game state.  The defaults reproduce the
//! classic 800×600 layout; a TOML file may override any subset of fields.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// World dimensions (screen space, y grows downward) and tick rate.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tick_rate: 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    /// Distance of the pivot above the bottom edge.
    pub ground_offset: f32,
    pub base_width: f32,
    pub base_height: f32,
    pub barrel_length: f32,
    /// Degrees turned per tick while a turn key is held.
    pub turn_step: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub start_angle: f32,
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            ground_offset: 50.0,
            base_width: 40.0,
            base_height: 20.0,
            barrel_length: 40.0,
            turn_step: 2.0,
            min_angle: 30.0,
            max_angle: 150.0,
            start_angle: 90.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub radius: f32,
    /// Rounds per magazine.  `None` means unlimited ammunition.
    pub magazine: Option<u32>,
    /// Ticks needed to refill an empty magazine.
    pub reload_ticks: u32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 7.0,
            radius: 5.0,
            magazine: None,
            reload_ticks: 180,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AircraftConfig {
    pub width: f32,
    pub height: f32,
    /// Altitude (top edge) of every aircraft.
    pub altitude: f32,
    pub speed: f32,
    /// Bounds of the delay (in ticks) between two spawns, inclusive.
    pub spawn_delay_min: u32,
    pub spawn_delay_max: u32,
    /// Probability that a new aircraft enters from the side opposite to the
    /// previous one.  0.5 is a fair coin.
    pub side_switch_chance: f64,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 20.0,
            altitude: 50.0,
            speed: 3.0,
            spawn_delay_min: 60,
            spawn_delay_max: 60,
            side_switch_chance: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParachuteConfig {
    pub width: f32,
    pub height: f32,
    pub fall_speed: f32,
}

impl Default for ParachuteConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 30.0,
            fall_speed: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoldierConfig {
    pub width: f32,
    pub height: f32,
    pub walk_speed: f32,
    /// Distance of the walking line above the bottom edge.
    pub ground_offset: f32,
    /// A soldier closer than this to the cannon is removed.
    pub proximity_threshold: f32,
    /// Soldiers on one side of the cannon needed to end the game.
    pub soldiers_to_lose: usize,
}

impl Default for SoldierConfig {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 20.0,
            walk_speed: 1.0,
            ground_offset: 50.0,
            proximity_threshold: 10.0,
            soldiers_to_lose: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Lifetime of a hit explosion, in ticks.
    pub explosion_ticks: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self { explosion_ticks: 15 }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub cannon: CannonConfig,
    pub bullet: BulletConfig,
    pub aircraft: AircraftConfig,
    pub parachute: ParachuteConfig,
    pub soldier: SoldierConfig,
    pub effects: EffectsConfig,
}

impl GameConfig {
    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a TOML document.  Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        }

        // Written as `!(x > 0.0)` so NaN is rejected too.
        if !(self.world.width > 0.0 && self.world.width.is_finite())
            || !(self.world.height > 0.0 && self.world.height.is_finite())
        {
            return invalid("world dimensions must be positive and finite");
        }
        if self.world.tick_rate == 0 {
            return invalid("tick_rate must be at least 1");
        }
        let c = &self.cannon;
        if !(c.min_angle.is_finite() && c.max_angle.is_finite() && c.start_angle.is_finite()) {
            return invalid("cannon angles must be finite numbers");
        }
        if c.min_angle > c.max_angle {
            return invalid("cannon.min_angle must not exceed cannon.max_angle");
        }
        if c.start_angle < c.min_angle || c.start_angle > c.max_angle {
            return invalid("cannon.start_angle must lie within the angle clamp");
        }
        if !(c.turn_step > 0.0) {
            return invalid("cannon.turn_step must be positive");
        }
        if !(self.bullet.speed > 0.0) {
            return invalid("bullet.speed must be positive");
        }
        if !(self.bullet.radius >= 0.0 && self.bullet.radius.is_finite()) {
            return invalid("bullet.radius must be a non-negative number");
        }
        if self.bullet.magazine == Some(0) {
            return invalid("bullet.magazine must hold at least one round");
        }
        let a = &self.aircraft;
        if !(a.speed > 0.0) {
            return invalid("aircraft.speed must be positive");
        }
        if a.spawn_delay_min == 0 || a.spawn_delay_min > a.spawn_delay_max {
            return invalid("aircraft spawn delay range must be non-empty and start at 1 or more");
        }
        if !(0.0..=1.0).contains(&a.side_switch_chance) {
            return invalid("aircraft.side_switch_chance must be within [0, 1]");
        }
        if !(self.parachute.fall_speed > 0.0) {
            return invalid("parachute.fall_speed must be positive");
        }
        if !(self.soldier.walk_speed > 0.0) {
            return invalid("soldier.walk_speed must be positive");
        }
        if !(self.soldier.proximity_threshold >= 0.0) {
            return invalid("soldier.proximity_threshold must not be negative");
        }
        if self.soldier.soldiers_to_lose == 0 {
            return invalid("soldier.soldiers_to_lose must be at least 1");
        }
        Ok(())
    }

    /// Cannon pivot in world coordinates.
    pub fn cannon_origin(&self) -> (f32, f32) {
        (
            self.world.width / 2.0,
            self.world.height - self.cannon.ground_offset,
        )
    }

    /// y coordinate on which landed soldiers walk.
    pub fn soldier_ground_y(&self) -> f32 {
        self.world.height - self.soldier.ground_offset
    }
}
