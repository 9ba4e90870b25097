//! All game entity types and their per-tick update rules.
//!
//! Updates are pure: each `advanced`/`turned` call takes `&self` and returns
//! the next value, leaving the original untouched.  The simulation loop in
//! `compute` decides what happens to entities that go inactive.

use crate::config::{AircraftConfig, GameConfig};
use crate::geometry::{project, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal for the session.
    GameOver,
}

/// Screen edge an aircraft enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Direction the player turns the barrel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise (angle grows toward 150°).
    Left,
    /// Clockwise (angle shrinks toward 30°).
    Right,
}

// ── Cannon ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cannon {
    pub x: f32,
    pub y: f32,
    /// Degrees; 90 is straight up.
    pub angle: f32,
    pub barrel_length: f32,
    pub base_width: f32,
    pub base_height: f32,
}

impl Cannon {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.cannon_origin();
        Self {
            x,
            y,
            angle: config.cannon.start_angle,
            barrel_length: config.cannon.barrel_length,
            base_width: config.cannon.base_width,
            base_height: config.cannon.base_height,
        }
    }

    /// Rotate by `step` degrees, clamped to `[min, max]`.
    pub fn turned(&self, turn: Turn, step: f32, min: f32, max: f32) -> Cannon {
        let angle = match turn {
            Turn::Left => (self.angle + step).min(max),
            Turn::Right => (self.angle - step).max(min),
        };
        Cannon {
            angle,
            ..self.clone()
        }
    }

    /// Barrel tip in world coordinates.
    pub fn muzzle(&self) -> (f32, f32) {
        project(self.x, self.y, self.angle, self.barrel_length)
    }

    pub fn base_rect(&self) -> Rect {
        Rect::new(
            self.x - self.base_width / 2.0,
            self.y - self.base_height / 2.0,
            self.base_width,
            self.base_height,
        )
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

/// A cannon shell travelling along a straight ray.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Fixed at creation.
    pub angle: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle,
            active: true,
        }
    }

    /// Move one tick at `speed`; goes inactive once above the top edge.
    pub fn advanced(&self, speed: f32) -> Bullet {
        let (x, y) = project(self.x, self.y, self.angle, speed);
        Bullet {
            x,
            y,
            angle: self.angle,
            active: self.active && y >= 0.0,
        }
    }
}

// ── Aircraft ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Aircraft {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Edge it entered from; it flies toward the other one.
    pub side: Side,
    pub active: bool,
    pub has_released_parachute: bool,
}

impl Aircraft {
    /// A fresh aircraft just off-screen on `side`.
    pub fn spawn(side: Side, config: &AircraftConfig, world_width: f32) -> Self {
        let x = match side {
            Side::Left => -config.width,
            Side::Right => world_width,
        };
        Self {
            x,
            y: config.altitude,
            width: config.width,
            height: config.height,
            side,
            active: true,
            has_released_parachute: false,
        }
    }

    /// Fly one tick; goes inactive once fully past the far edge.
    pub fn advanced(&self, speed: f32, world_width: f32) -> Aircraft {
        let (x, exited) = match self.side {
            Side::Left => {
                let x = self.x + speed;
                (x, x > world_width)
            }
            Side::Right => {
                let x = self.x - speed;
                (x, x < -self.width)
            }
        };
        Aircraft {
            x,
            active: self.active && !exited,
            ..self.clone()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Parachute ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Parachute {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub active: bool,
}

impl Parachute {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            active: true,
        }
    }

    /// Drift down one tick; goes inactive (lands) once below the bottom edge.
    pub fn advanced(&self, fall_speed: f32, world_height: f32) -> Parachute {
        let y = self.y + fall_speed;
        Parachute {
            y,
            active: self.active && y <= world_height,
            ..self.clone()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Soldier ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Soldier {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Cannon x at the moment of landing.
    pub target_x: f32,
}

impl Soldier {
    pub fn new(x: f32, y: f32, width: f32, height: f32, target_x: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            target_x,
        }
    }

    /// Walk one tick toward `target_x`.  No overshoot correction: a soldier
    /// standing exactly on its target steps left.
    pub fn advanced(&self, walk_speed: f32) -> Soldier {
        let x = if self.x < self.target_x {
            self.x + walk_speed
        } else {
            self.x - walk_speed
        };
        Soldier { x, ..self.clone() }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// A short-lived visual burst left where a bullet hit.  Never affects play.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Remaining ticks to display.
    pub ticks_left: u32,
}

impl Explosion {
    pub fn aged(&self) -> Option<Explosion> {
        match self.ticks_left.saturating_sub(1) {
            0 => None,
            ticks_left => Some(Explosion { ticks_left, ..*self }),
        }
    }
}

// ── Ammunition ────────────────────────────────────────────────────────────────

/// Magazine state when a finite magazine is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ammo {
    Unlimited,
    Loaded(u32),
    /// Empty; the value is the number of ticks until the refill.
    Reloading(u32),
}

impl Ammo {
    pub fn can_fire(&self) -> bool {
        match self {
            Ammo::Unlimited => true,
            Ammo::Loaded(rounds) => *rounds > 0,
            Ammo::Reloading(_) => false,
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Control signals sampled by the front-end for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held turn-left key.
    pub turn_left: bool,
    /// Held turn-right key.
    pub turn_right: bool,
    /// Fire key went down since the previous tick.
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one session.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub cannon: Cannon,
    pub bullets: Vec<Bullet>,
    pub aircraft: Vec<Aircraft>,
    pub parachutes: Vec<Parachute>,
    pub soldiers: Vec<Soldier>,
    pub explosions: Vec<Explosion>,
    pub ammo: Ammo,
    pub score: u32,
    pub status: GameStatus,
    /// Running ticks simulated so far.
    pub tick_count: u64,
    /// Ticks since the last aircraft spawn.
    pub spawn_timer: u32,
    /// Ticks the spawn timer has to reach before the next aircraft.
    pub next_spawn_delay: u32,
    pub last_spawn_side: Option<Side>,
}
