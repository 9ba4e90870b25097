use paratrooper::config::GameConfig;
use paratrooper::entities::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── Cannon ────────────────────────────────────────────────────────────────────

#[test]
fn cannon_starts_upright_at_bottom_centre() {
    let c = Cannon::new(&GameConfig::default());
    assert_eq!(c.x, 400.0);
    assert_eq!(c.y, 550.0);
    assert_eq!(c.angle, 90.0);
    assert_eq!(c.barrel_length, 40.0);
}

#[test]
fn cannon_muzzle_follows_angle() {
    let c = Cannon::new(&GameConfig::default());
    let (x, y) = c.muzzle();
    assert!(approx(x, 400.0) && approx(y, 510.0));

    let tilted = Cannon { angle: 30.0, ..c.clone() };
    let (x, y) = tilted.muzzle();
    // cos 30° * 40 ≈ 34.64, sin 30° * 40 = 20
    assert!(approx(x, 434.641));
    assert!(approx(y, 530.0));

    let tilted = Cannon { angle: 150.0, ..c };
    let (x, _) = tilted.muzzle();
    assert!(approx(x, 365.359));
}

#[test]
fn cannon_turn_is_clamped() {
    let c = Cannon::new(&GameConfig::default());
    let left = c.turned(Turn::Left, 2.0, 30.0, 150.0);
    assert_eq!(left.angle, 92.0);
    let right = c.turned(Turn::Right, 2.0, 30.0, 150.0);
    assert_eq!(right.angle, 88.0);

    let at_max = Cannon { angle: 149.0, ..c.clone() };
    assert_eq!(at_max.turned(Turn::Left, 2.0, 30.0, 150.0).angle, 150.0);
    let at_min = Cannon { angle: 30.0, ..c };
    assert_eq!(at_min.turned(Turn::Right, 2.0, 30.0, 150.0).angle, 30.0);
}

#[test]
fn cannon_base_rect_is_centred_on_pivot() {
    let r = Cannon::new(&GameConfig::default()).base_rect();
    assert_eq!((r.x, r.y, r.width, r.height), (380.0, 540.0, 40.0, 20.0));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_keeps_its_angle() {
    let b = Bullet::new(400.0, 500.0, 45.0);
    let moved = b.advanced(7.0).advanced(7.0);
    assert_eq!(moved.angle, 45.0);
    assert!(moved.x > b.x);
    assert!(moved.y < b.y);
    assert!(moved.active);
}

#[test]
fn bullet_deactivates_above_top_edge() {
    let b = Bullet::new(400.0, 5.0, 90.0).advanced(7.0);
    assert!(b.y < 0.0);
    assert!(!b.active);

    let b = Bullet::new(400.0, 10.0, 90.0).advanced(7.0);
    assert!(b.active);
}

// ── Aircraft ──────────────────────────────────────────────────────────────────

#[test]
fn aircraft_spawns_off_screen() {
    let cfg = GameConfig::default();
    let left = Aircraft::spawn(Side::Left, &cfg.aircraft, 800.0);
    assert_eq!(left.x, -30.0);
    assert_eq!(left.y, 50.0);
    assert!(left.active);
    assert!(!left.has_released_parachute);

    let right = Aircraft::spawn(Side::Right, &cfg.aircraft, 800.0);
    assert_eq!(right.x, 800.0);
}

#[test]
fn aircraft_from_left_exits_right() {
    let cfg = GameConfig::default();
    let a = Aircraft {
        x: 797.0,
        ..Aircraft::spawn(Side::Left, &cfg.aircraft, 800.0)
    };
    let a = a.advanced(3.0, 800.0);
    assert_eq!(a.x, 800.0);
    assert!(a.active); // not yet past the edge
    let a = a.advanced(3.0, 800.0);
    assert_eq!(a.x, 803.0);
    assert!(!a.active);
}

#[test]
fn aircraft_from_right_exits_left() {
    let cfg = GameConfig::default();
    let a = Aircraft {
        x: -27.0,
        ..Aircraft::spawn(Side::Right, &cfg.aircraft, 800.0)
    };
    let a = a.advanced(3.0, 800.0);
    assert_eq!(a.x, -30.0);
    assert!(a.active);
    let a = a.advanced(3.0, 800.0);
    assert!(!a.active);
}

// ── Parachute & soldier ───────────────────────────────────────────────────────

#[test]
fn parachute_falls_and_lands() {
    let p = Parachute::new(100.0, 597.0, 20.0, 30.0).advanced(2.0, 600.0);
    assert_eq!(p.y, 599.0);
    assert!(p.active);
    let p = p.advanced(2.0, 600.0);
    assert!(!p.active);
}

#[test]
fn soldier_walks_toward_target() {
    let s = Soldier::new(100.0, 550.0, 15.0, 20.0, 400.0);
    assert_eq!(s.advanced(1.0).x, 101.0);
    let s = Soldier::new(700.0, 550.0, 15.0, 20.0, 400.0);
    assert_eq!(s.advanced(1.0).x, 699.0);
}

#[test]
fn soldier_on_target_steps_left() {
    let s = Soldier::new(400.0, 550.0, 15.0, 20.0, 400.0);
    assert_eq!(s.advanced(1.0).x, 399.0);
}

#[test]
fn soldier_walk_changes_only_x() {
    let s = Soldier::new(100.0, 550.0, 15.0, 20.0, 400.0);
    let next = s.advanced(2.0);
    assert_eq!(next, Soldier { x: 102.0, ..s.clone() });
}

// ── Effects & ammo ────────────────────────────────────────────────────────────

#[test]
fn explosion_ages_out() {
    let e = Explosion { x: 1.0, y: 2.0, ticks_left: 2 };
    let e = e.aged().expect("one tick left");
    assert_eq!(e.ticks_left, 1);
    assert!(e.aged().is_none());
}

#[test]
fn ammo_can_fire() {
    assert!(Ammo::Unlimited.can_fire());
    assert!(Ammo::Loaded(1).can_fire());
    assert!(!Ammo::Loaded(0).can_fire());
    assert!(!Ammo::Reloading(10).can_fire());
}

#[test]
fn side_opposite() {
    assert_eq!(Side::Left.opposite(), Side::Right);
    assert_eq!(Side::Right.opposite(), Side::Left);
}
