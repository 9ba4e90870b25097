//! Rendering layer — all terminal I/O lives here.
//!
//! The renderer receives a mutable writer and an immutable view of the game
//! state.  No game logic is performed; this module only scales world
//! coordinates onto the terminal grid and translates state into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use paratrooper::compute::soldier_counts;
use paratrooper::entities::{Ammo, Cannon, Explosion, GameState, GameStatus};
use paratrooper::geometry::Rect;
use paratrooper::GameConfig;

// ── Colour palette ────────────────────────────────────────────────────────────

/// Colours used by the renderer, fixed for the lifetime of the process.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub border: Color,
    pub score: Color,
    pub soldiers: Color,
    pub ammo: Color,
    pub reloading: Color,
    pub cannon: Color,
    pub bullet: Color,
    pub aircraft: Color,
    pub parachute: Color,
    pub soldier: Color,
    pub explosion: Color,
    pub hint: Color,
    pub game_over: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Color::DarkBlue,
            score: Color::Yellow,
            soldiers: Color::Green,
            ammo: Color::White,
            reloading: Color::Yellow,
            cannon: Color::Blue,
            bullet: Color::Red,
            aircraft: Color::White,
            parachute: Color::Grey,
            soldier: Color::Green,
            explosion: Color::DarkYellow,
            hint: Color::DarkGrey,
            game_over: Color::Red,
        }
    }
}

// ── World → terminal mapping ─────────────────────────────────────────────────

/// The play area inside the border, with the scale from world units to cells.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    /// Row 0 is the HUD, rows 1 and h-2 the border, row h-1 the hint.
    fn new(width: u16, height: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
            world_width,
            world_height,
        }
    }

    fn col_f(&self, x: f32) -> f32 {
        x / self.world_width * self.cols as f32
    }

    fn row_f(&self, y: f32) -> f32 {
        y / self.world_height * self.rows as f32
    }

    /// Terminal cell holding the world point, if it is on screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let c = self.col_f(x).floor();
        let r = self.row_f(y).floor();
        if c < 0.0 || r < 0.0 || c >= self.cols as f32 || r >= self.rows as f32 {
            return None;
        }
        Some((self.left + c as u16, self.top + r as u16))
    }

    /// Cells covered by a rectangle, clipped to the play area.  Every visible
    /// rectangle covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col_f(rect.x).floor().max(0.0);
        let c1 = (self.col_f(rect.x + rect.width).ceil() - 1.0).min(self.cols as f32 - 1.0);
        let r0 = self.row_f(rect.y).floor().max(0.0);
        let r1 = (self.row_f(rect.y + rect.height).ceil() - 1.0).min(self.rows as f32 - 1.0);
        if c1 < 0.0 || r1 < 0.0 || c0 >= self.cols as f32 || r0 >= self.rows as f32 {
            return None;
        }
        let c1 = c1.max(c0);
        let r1 = r1.max(r0);
        Some((
            self.left + c0 as u16,
            self.left + c1 as u16,
            self.top + r0 as u16,
            self.top + r1 as u16,
        ))
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct Renderer {
    palette: Palette,
    world_width: f32,
    world_height: f32,
    bullet_radius: f32,
}

impl Renderer {
    pub fn new(config: &GameConfig, palette: Palette) -> Self {
        Self {
            palette,
            world_width: config.world.width,
            world_height: config.world.height,
            bullet_radius: config.bullet.radius,
        }
    }

    /// Render one complete frame at the given terminal size.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        (width, height): (u16, u16),
    ) -> std::io::Result<()> {
        let view = Viewport::new(width, height, self.world_width, self.world_height);
        let p = &self.palette;

        out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border(out, width, height)?;
        self.draw_hud(out, state, width)?;

        for aircraft in &state.aircraft {
            fill_rect(out, &view, &aircraft.bounds(), "█", p.aircraft)?;
        }
        for chute in &state.parachutes {
            draw_parachute(out, &view, &chute.bounds(), p.parachute)?;
        }
        for soldier in &state.soldiers {
            let rect = Rect::new(soldier.x, soldier.y, soldier.width, soldier.height);
            fill_rect(out, &view, &rect, "▓", p.soldier)?;
        }
        for bullet in &state.bullets {
            let rect = bullet_rect(bullet.x, bullet.y, self.bullet_radius);
            fill_rect(out, &view, &rect, "●", p.bullet)?;
        }
        for explosion in &state.explosions {
            draw_explosion(out, &view, explosion, p.explosion)?;
        }

        self.draw_cannon(out, &view, &state.cannon)?;
        self.draw_controls_hint(out, height)?;

        if state.status == GameStatus::GameOver {
            self.draw_game_over(out, state, width, height)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border<W: Write>(&self, out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
        let w = width as usize;

        out.queue(style::SetForegroundColor(self.palette.border))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..height.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }

        Ok(())
    }

    // ── HUD (row 0) ───────────────────────────────────────────────────────────

    fn draw_hud<W: Write>(&self, out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
        let p = &self.palette;

        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(p.score))?;
        out.queue(Print(format!("Score:{:>5}", state.score)))?;

        // Soldiers on each side — centre
        let (left, right) = soldier_counts(&state.soldiers, state.cannon.x);
        let limit = state.config.soldier.soldiers_to_lose;
        let counts = format!("Left: {}/{}   Right: {}/{}", left, limit, right, limit);
        let cx = (width / 2).saturating_sub(counts.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(p.soldiers))?;
        out.queue(Print(&counts))?;

        // Ammunition — right
        let (ammo, color) = match state.ammo {
            Ammo::Unlimited => return Ok(()),
            Ammo::Loaded(rounds) => (format!("Ammo:{:>3}", rounds), p.ammo),
            Ammo::Reloading(ticks) => {
                let secs = ticks / state.config.world.tick_rate + 1;
                (format!("RELOADING {}s", secs), p.reloading)
            }
        };
        let rx = width.saturating_sub(ammo.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&ammo))?;

        Ok(())
    }

    // ── Cannon ────────────────────────────────────────────────────────────────

    fn draw_cannon<W: Write>(&self, out: &mut W, view: &Viewport, cannon: &Cannon) -> std::io::Result<()> {
        let color = self.palette.cannon;
        fill_rect(out, view, &cannon.base_rect(), "▄", color)?;

        // Barrel: sample points from pivot to muzzle, one glyph per cell.
        let glyph = barrel_glyph(cannon.angle);
        let (mx, my) = cannon.muzzle();
        let steps = 16;
        let mut last = None;
        out.queue(style::SetForegroundColor(color))?;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = cannon.x + (mx - cannon.x) * t;
            let y = cannon.y + (my - cannon.y) * t;
            if let Some(cell) = view.cell(x, y) {
                if last != Some(cell) {
                    out.queue(cursor::MoveTo(cell.0, cell.1))?;
                    out.queue(Print(glyph))?;
                    last = Some(cell);
                }
            }
        }
        Ok(())
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    fn draw_controls_hint<W: Write>(&self, out: &mut W, height: u16) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(self.palette.hint))?;
        out.queue(Print("← → / A D : Turn   SPACE : Fire   Q : Quit"))?;
        Ok(())
    }

    // ── Game-over overlay ─────────────────────────────────────────────────────

    fn draw_game_over<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        width: u16,
        height: u16,
    ) -> std::io::Result<()> {
        let score_line = format!("Final Score: {:>5}", state.score);
        let hint = "R - Play Again  Q - Quit";

        let lines: [(&str, Color); 5] = [
            ("╔════════════════════╗", self.palette.game_over),
            ("║     GAME  OVER!    ║", self.palette.game_over),
            ("╚════════════════════╝", self.palette.game_over),
            (score_line.as_str(), self.palette.score),
            (hint, Color::White),
        ];

        let cx = width / 2;
        let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let row = start_row + i as u16;
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(*msg))?;
        }

        Ok(())
    }
}

// ── Shapes ────────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    let run = glyph.repeat((c1 - c0 + 1) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

/// Square around a bullet's centre.  Collisions use the centre point only.
fn bullet_rect(x: f32, y: f32, radius: f32) -> Rect {
    Rect::new(x - radius, y - radius, radius * 2.0, radius * 2.0)
}

/// Canopy on the top row, body below it.
fn draw_parachute<W: Write>(out: &mut W, view: &Viewport, rect: &Rect, color: Color) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(c0, r0))?;
    out.queue(Print("▲".repeat((c1 - c0 + 1) as usize)))?;
    for row in (r0 + 1)..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print("█".repeat((c1 - c0 + 1) as usize)))?;
    }
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    view: &Viewport,
    explosion: &Explosion,
    color: Color,
) -> std::io::Result<()> {
    if let Some((c, r)) = view.cell(explosion.x, explosion.y) {
        let glyph = if explosion.ticks_left % 4 < 2 { "*" } else { "✶" };
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

/// Character that best matches the barrel's slope.
fn barrel_glyph(angle: f32) -> &'static str {
    match angle {
        a if a < 60.0 => "/",
        a if a <= 80.0 => "╱",
        a if a < 100.0 => "│",
        a if a <= 120.0 => "╲",
        _ => "\\",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paratrooper::compute::init_state;
    use paratrooper::entities::Bullet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn view() -> Viewport {
        // 80×24 terminal → 78×20 play area
        Viewport::new(80, 24, 800.0, 600.0)
    }

    #[test]
    fn world_corners_map_inside_play_area() {
        let v = view();
        assert_eq!(v.cell(0.0, 0.0), Some((1, 2)));
        assert_eq!(v.cell(799.0, 599.0), Some((78, 21)));
        assert_eq!(v.cell(-1.0, 10.0), None);
        assert_eq!(v.cell(10.0, 600.0), None);
    }

    #[test]
    fn off_screen_rect_is_clipped_away() {
        let v = view();
        assert_eq!(v.cells(&Rect::new(-30.0, 50.0, 30.0, 20.0)), None);
        let (c0, c1, _, _) = v.cells(&Rect::new(-15.0, 50.0, 30.0, 20.0)).unwrap();
        assert_eq!((c0, c1), (1, 2));
    }

    #[test]
    fn tiny_rect_covers_one_cell() {
        let v = view();
        let (c0, c1, r0, r1) = v.cells(&Rect::new(402.0, 302.0, 1.0, 1.0)).unwrap();
        assert_eq!(c0, c1);
        assert_eq!(r0, r1);
    }

    #[test]
    fn game_over_overlay_is_drawn_only_when_over() {
        let config = GameConfig::default();
        let renderer = Renderer::new(&config, Palette::default());
        let mut state = init_state(config, &mut StdRng::seed_from_u64(7));

        let mut out: Vec<u8> = Vec::new();
        renderer.render(&mut out, &state, (80, 24)).unwrap();
        let frame = String::from_utf8_lossy(&out);
        assert!(frame.contains("Score:    0"));
        assert!(!frame.contains("GAME  OVER"));

        state.status = GameStatus::GameOver;
        let mut out: Vec<u8> = Vec::new();
        renderer.render(&mut out, &state, (80, 24)).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("GAME  OVER"));
    }

    #[test]
    fn bullet_size_follows_configured_radius() {
        let v = view();
        let (c0, c1, r0, r1) = v.cells(&bullet_rect(400.0, 300.0, 0.0)).unwrap();
        assert_eq!((c0, r0), (c1, r1));

        // 80 world units span roughly 8 columns and 3 rows of an 80×24 terminal.
        let (c0, c1, r0, r1) = v.cells(&bullet_rect(400.0, 300.0, 40.0)).unwrap();
        assert!(c1 - c0 >= 6);
        assert!(r1 - r0 >= 2);
    }

    #[test]
    fn large_bullet_radius_draws_more_glyphs() {
        let count_bullet_glyphs = |radius: f32| {
            let mut config = GameConfig::default();
            config.bullet.radius = radius;
            let renderer = Renderer::new(&config, Palette::default());
            let mut state = init_state(config, &mut StdRng::seed_from_u64(7));
            state.bullets.push(Bullet::new(400.0, 300.0, 90.0));
            let mut out: Vec<u8> = Vec::new();
            renderer.render(&mut out, &state, (80, 24)).unwrap();
            String::from_utf8_lossy(&out).matches('●').count()
        };
        let small = count_bullet_glyphs(0.0);
        assert_eq!(small, 1);
        assert!(count_bullet_glyphs(40.0) > small);
    }

    #[test]
    fn barrel_glyph_tracks_angle() {
        assert_eq!(barrel_glyph(30.0), "/");
        assert_eq!(barrel_glyph(90.0), "│");
        assert_eq!(barrel_glyph(150.0), "\\");
    }
}
