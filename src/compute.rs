//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and logging.
//!
//! Within a tick every entity is moved first and collisions are resolved on
//! the post-move positions.

use rand::Rng;

use crate::collision::first_hit;
use crate::config::GameConfig;
use crate::entities::{
    Aircraft, Ammo, Bullet, Cannon, Explosion, GameState, GameStatus, Parachute, Side, Soldier,
    TickInput, Turn,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a session.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let ammo = config.bullet.magazine.map_or(Ammo::Unlimited, Ammo::Loaded);
    GameState {
        cannon: Cannon::new(&config),
        bullets: Vec::new(),
        aircraft: Vec::new(),
        parachutes: Vec::new(),
        soldiers: Vec::new(),
        explosions: Vec::new(),
        ammo,
        score: 0,
        status: GameStatus::Running,
        tick_count: 0,
        spawn_timer: 0,
        next_spawn_delay: draw_spawn_delay(&config, rng),
        last_spawn_side: None,
        config,
    }
}

/// Ticks until the next spawn, drawn from the configured inclusive range.
/// Swapped bounds are reordered so an unvalidated config cannot panic here.
fn draw_spawn_delay(config: &GameConfig, rng: &mut impl Rng) -> u32 {
    let a = &config.aircraft;
    let lo = a.spawn_delay_min.min(a.spawn_delay_max);
    let hi = a.spawn_delay_min.max(a.spawn_delay_max);
    rng.gen_range(lo..=hi)
}

/// Entry side for the next aircraft.  The first one is a fair coin; later
/// ones switch sides with the configured probability.
fn choose_side(last: Option<Side>, switch_chance: f64, rng: &mut impl Rng) -> Side {
    match last {
        None => {
            if rng.gen_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            }
        }
        Some(prev) if rng.gen_bool(switch_chance) => prev.opposite(),
        Some(prev) => prev,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Rotate the barrel one step, clamped to the configured angle range.
/// Ignored once the game is over.
pub fn turn_cannon(state: &GameState, turn: Turn) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let c = &state.config.cannon;
    GameState {
        cannon: state.cannon.turned(turn, c.turn_step, c.min_angle, c.max_angle),
        ..state.clone()
    }
}

/// Fire one bullet from the muzzle along the current barrel angle.
///
/// Ignored while the game is over, while reloading, or with an empty
/// magazine.  Emptying the magazine starts a reload.
pub fn fire(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver || !state.ammo.can_fire() {
        return state.clone();
    }
    let (x, y) = state.cannon.muzzle();
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::new(x, y, state.cannon.angle));

    let ammo = match state.ammo {
        Ammo::Loaded(1) => {
            log::debug!("magazine empty, reloading");
            Ammo::Reloading(state.config.bullet.reload_ticks)
        }
        Ammo::Loaded(rounds) => Ammo::Loaded(rounds - 1),
        other => other,
    };

    GameState {
        bullets,
        ammo,
        ..state.clone()
    }
}

/// Add one aircraft just off-screen and remember the side it came from.
pub fn spawn_aircraft(state: &GameState, rng: &mut impl Rng) -> GameState {
    let cfg = &state.config;
    let side = choose_side(state.last_spawn_side, cfg.aircraft.side_switch_chance, rng);
    let mut aircraft = state.aircraft.clone();
    aircraft.push(Aircraft::spawn(side, &cfg.aircraft, cfg.world.width));
    log::debug!("aircraft spawned from the {:?}", side);
    GameState {
        aircraft,
        last_spawn_side: Some(side),
        ..state.clone()
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Soldiers strictly left and strictly right of `cannon_x`.
pub fn soldier_counts(soldiers: &[Soldier], cannon_x: f32) -> (usize, usize) {
    let left = soldiers.iter().filter(|s| s.x < cannon_x).count();
    let right = soldiers.iter().filter(|s| s.x > cannon_x).count();
    (left, right)
}

// ── Per-tick helpers ─────────────────────────────────────────────────────────

fn reloaded(ammo: Ammo, magazine: Option<u32>) -> Ammo {
    match (ammo, magazine) {
        (Ammo::Reloading(ticks), Some(rounds)) if ticks <= 1 => {
            log::debug!("reload complete");
            Ammo::Loaded(rounds)
        }
        (Ammo::Reloading(ticks), Some(_)) => Ammo::Reloading(ticks - 1),
        (Ammo::Reloading(_), None) => Ammo::Unlimited,
        (other, _) => other,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A session that is over is returned unchanged.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let cfg = state.config;

    // ── 1. Player input ──────────────────────────────────────────────────────
    let mut next = if input.fire { fire(state) } else { state.clone() };
    if input.turn_left {
        next = turn_cannon(&next, Turn::Left);
    }
    if input.turn_right {
        next = turn_cannon(&next, Turn::Right);
    }
    let ammo = reloaded(next.ammo, cfg.bullet.magazine);

    // ── 2. Spawn aircraft ────────────────────────────────────────────────────
    let spawn_timer = next.spawn_timer + 1;
    let (next, spawn_timer, next_spawn_delay) = if spawn_timer >= next.next_spawn_delay {
        let spawned = spawn_aircraft(&next, rng);
        let delay = draw_spawn_delay(&cfg, rng);
        (spawned, 0, delay)
    } else {
        let delay = next.next_spawn_delay;
        (next, spawn_timer, delay)
    };
    let cannon = next.cannon.clone();

    // ── 3. Move bullets ──────────────────────────────────────────────────────
    let bullets: Vec<Bullet> = next
        .bullets
        .iter()
        .map(|b| b.advanced(cfg.bullet.speed))
        .filter(|b| b.active)
        .collect();

    // ── 4. Move aircraft; natural exits release a parachute ─────────────────
    let mut released: Vec<Parachute> = Vec::new();
    let aircraft: Vec<Aircraft> = next
        .aircraft
        .iter()
        .map(|a| a.advanced(cfg.aircraft.speed, cfg.world.width))
        .filter_map(|a| {
            if a.active {
                return Some(a);
            }
            if !a.has_released_parachute {
                log::debug!("aircraft left the screen, parachute at ({:.0}, {:.0})", a.x, a.y);
                released.push(Parachute::new(
                    a.x,
                    a.y,
                    cfg.parachute.width,
                    cfg.parachute.height,
                ));
            }
            None
        })
        .collect();

    // ── 5. Move parachutes; landings become soldiers ─────────────────────────
    let mut landed: Vec<Soldier> = Vec::new();
    let parachutes: Vec<Parachute> = next
        .parachutes
        .iter()
        .chain(released.iter())
        .map(|p| p.advanced(cfg.parachute.fall_speed, cfg.world.height))
        .filter_map(|p| {
            if p.active {
                return Some(p);
            }
            log::debug!("parachute landed at x={:.0}", p.x);
            landed.push(Soldier::new(
                p.x,
                cfg.soldier_ground_y(),
                cfg.soldier.width,
                cfg.soldier.height,
                cannon.x,
            ));
            None
        })
        .collect();

    // ── 6. Move soldiers; those reaching the cannon are removed ─────────────
    let soldiers: Vec<Soldier> = next
        .soldiers
        .iter()
        .chain(landed.iter())
        .map(|s| s.advanced(cfg.soldier.walk_speed))
        .filter(|s| (s.x - cannon.x).abs() >= cfg.soldier.proximity_threshold)
        .collect();

    // ── 7. Collision: bullets ↔ aircraft, then bullets ↔ parachutes ─────────
    let mut aircraft_down = vec![false; aircraft.len()];
    let mut chutes_down = vec![false; parachutes.len()];
    let mut hits: Vec<(f32, f32)> = Vec::new();

    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .filter(|b| {
            if let Some(i) = first_hit(b, &aircraft, &aircraft_down) {
                aircraft_down[i] = true;
                hits.push((b.x, b.y));
                log::debug!("aircraft shot down at ({:.0}, {:.0})", b.x, b.y);
                return false;
            }
            if let Some(i) = first_hit(b, &parachutes, &chutes_down) {
                chutes_down[i] = true;
                hits.push((b.x, b.y));
                log::debug!("parachute shot down at ({:.0}, {:.0})", b.x, b.y);
                return false;
            }
            true
        })
        .collect();

    let aircraft: Vec<Aircraft> = aircraft
        .into_iter()
        .zip(aircraft_down)
        .filter(|(_, down)| !down)
        .map(|(a, _)| a)
        .collect();

    let parachutes: Vec<Parachute> = parachutes
        .into_iter()
        .zip(chutes_down)
        .filter(|(_, down)| !down)
        .map(|(p, _)| p)
        .collect();

    let explosions: Vec<Explosion> = next
        .explosions
        .iter()
        .filter_map(Explosion::aged)
        .chain(hits.iter().map(|&(x, y)| Explosion {
            x,
            y,
            ticks_left: cfg.effects.explosion_ticks,
        }))
        .filter(|e| e.ticks_left > 0)
        .collect();

    let score = next.score + hits.len() as u32;

    // ── 8. Game over when too many soldiers gather on one side ───────────────
    let (left, right) = soldier_counts(&soldiers, cannon.x);
    let limit = cfg.soldier.soldiers_to_lose;
    let status = if left >= limit || right >= limit {
        log::info!("game over: {} soldiers left, {} right, score {}", left, right, score);
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    GameState {
        cannon,
        bullets,
        aircraft,
        parachutes,
        soldiers,
        explosions,
        ammo,
        score,
        status,
        tick_count: next.tick_count + 1,
        spawn_timer,
        next_spawn_delay,
        ..next
    }
}
