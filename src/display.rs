//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! play-area pixels into terminal cells and queues draw commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use wizard_game::entities::{Entity, EntityKind, EntireGameStateInfo, GameStatus, Rect, Size};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_WIZARD: Color = Color::Magenta;
const C_WIZARD_FIRING: Color = Color::Yellow;
const C_FIREBALL: Color = Color::Red;
const C_CLOUD: Color = Color::Grey;
const C_BUG: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Pixel → cell projection ───────────────────────────────────────────────────

/// `v * cells / extent`, widened so large pixel values cannot overflow.
fn scale(v: i32, cells: i32, extent: i32) -> i32 {
    let cell = i64::from(v) * i64::from(cells) / i64::from(extent.max(1));
    cell.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Maps the play area onto the cells inside the border
/// (columns 1..width-1, rows 2..height-2).
struct Viewport {
    cols: i32,
    rows: i32,
    area: Size,
}

impl Viewport {
    fn new(term: (u16, u16), area: Size) -> Self {
        Viewport {
            cols: (term.0 as i32 - 2).max(1),
            rows: (term.1 as i32 - 4).max(1),
            area,
        }
    }

    fn col(&self, x: i32) -> i32 {
        1 + scale(x, self.cols, self.area.width)
    }

    fn row(&self, y: i32) -> i32 {
        2 + scale(y, self.rows, self.area.height)
    }

    /// Cells covered by `rect`, clipped to the viewport; at least one cell
    /// wide and tall when visible at all.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let left = self.col(rect.left).max(1);
        let right = self.col(rect.right).max(self.col(rect.left) + 1).min(self.cols + 1);
        let top = self.row(rect.top).max(2);
        let bottom = self.row(rect.bottom).max(self.row(rect.top) + 1).min(self.rows + 2);
        if left >= right || top >= bottom {
            return None;
        }
        Some((left as u16, top as u16, right as u16, bottom as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for any session status.
pub fn render<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    term: (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, term)?;
    draw_hud(out, state, term)?;

    let view = Viewport::new(term, state.config.area());
    for cloud in &state.scene.clouds {
        draw_entity(out, &view, state, cloud)?;
    }
    for bug in &state.scene.bugs {
        draw_entity(out, &view, state, bug)?;
    }
    for fireball in &state.scene.fireballs {
        draw_entity(out, &view, state, fireball)?;
    }

    if state.wizard.visible {
        draw_wizard(out, &view, state)?;
    }
    draw_controls_hint(out, term)?;

    match state.status {
        GameStatus::Idle => draw_start_control(out, term)?,
        GameStatus::Over => draw_game_over(out, state, term)?,
        GameStatus::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Blocking alert box drawn over the current frame; the caller waits for a
/// key before continuing.
pub fn render_alert<W: Write>(out: &mut W, message: &str, term: (u16, u16)) -> std::io::Result<()> {
    let body = format!("  {}  ", message);
    let hint = "  press any key  ";
    let inner = body.chars().count().max(hint.chars().count());
    let lines = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{:^w$}║", body, w = inner),
        format!("║{:^w$}║", hint, w = inner),
        format!("╚{}╝", "═".repeat(inner)),
    ];

    let cx = term.0 / 2;
    let start_row = (term.1 / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    let (width, h) = term;
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    term: (u16, u16),
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>8}", state.score)))?;

    let counts = format!(
        "Bugs:{:>3}  Fireballs:{:>2}",
        state.scene.bugs.len(),
        state.scene.fireballs.len()
    );
    let rx = term.0.saturating_sub(counts.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(counts))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    cells: (u16, u16, u16, u16),
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let (left, top, right, bottom) = cells;
    let row_text: String = std::iter::repeat(glyph)
        .take((right - left) as usize)
        .collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in top..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(&row_text))?;
    }
    Ok(())
}

fn draw_wizard<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &EntireGameStateInfo,
) -> std::io::Result<()> {
    let color = if state.wizard.firing {
        C_WIZARD_FIRING
    } else {
        C_WIZARD
    };
    if let Some(cells) = view.cells(&state.wizard.bounds(&state.config)) {
        fill(out, cells, '█', color)?;
    }
    Ok(())
}

fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &EntireGameStateInfo,
    entity: &Entity,
) -> std::io::Result<()> {
    let rect = Rect::new(entity.x, entity.y, state.config.size_of(&entity.kind));
    let Some(cells) = view.cells(&rect) else {
        return Ok(());
    };
    match entity.kind {
        EntityKind::Fireball => fill(out, cells, '●', C_FIREBALL),
        EntityKind::Cloud => fill(out, cells, '░', C_CLOUD),
        EntityKind::Bug => fill(out, cells, 'ж', C_BUG),
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    term: (u16, u16),
) -> std::io::Result<()> {
    let cx = term.0 / 2;
    let start_row = (term.1 / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_start_control<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    let lines = [
        ("✦  WIZARD  VS  BUGS  ✦".to_string(), Color::Cyan),
        (String::new(), Color::Reset),
        ("[ ENTER ]  Start".to_string(), Color::White),
    ];
    draw_centered(out, &lines, term)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    term: (u16, u16),
) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>8}", state.score), Color::Yellow),
        ("R - Play Again  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, &lines, term)
}
