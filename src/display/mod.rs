/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use apple_picker::config::WorldConfig;
use apple_picker::entities::{Basket, GameState, Item, ItemKind, Tree};
use apple_picker::hud::Hud;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_CANOPY: Color = Color::Green;
const C_TRUNK: Color = Color::DarkYellow;
const C_APPLE: Color = Color::Red;
const C_GOLDEN: Color = Color::Yellow;
const C_BASKET: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto the bordered play area of the terminal.
///
/// Columns `1..width-1` and rows `2..height-2` are inside the border.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    half_width: f32,
    top_y: f32,
    bottom_y: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, world: &WorldConfig) -> Self {
        Self {
            width,
            height,
            half_width: world.half_width,
            top_y: world.top_y,
            bottom_y: world.bottom_y,
        }
    }

    fn play_cols(&self) -> f32 {
        (self.width.saturating_sub(3)).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        (self.height.saturating_sub(5)).max(1) as f32
    }

    /// Terminal column for world `x`, unclamped.
    fn col_f(&self, x: f32) -> f32 {
        1.0 + (x + self.half_width) / (2.0 * self.half_width) * self.play_cols()
    }

    fn row_f(&self, y: f32) -> f32 {
        2.0 + (self.top_y - y) / (self.top_y - self.bottom_y) * self.play_rows()
    }

    /// Cell for a world point, or `None` when it is outside the play area.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = self.col_f(x).round();
        let row = self.row_f(y).round();
        let inside = col >= 1.0
            && col <= self.width.saturating_sub(2) as f32
            && row >= 2.0
            && row <= self.height.saturating_sub(3) as f32;
        inside.then_some((col as u16, row as u16))
    }

    /// World distance covered by `cols` terminal columns.
    pub fn cols_to_world(&self, cols: i32) -> f32 {
        cols as f32 * 2.0 * self.half_width / self.play_cols()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, hud, view)?;
    draw_tree(out, &state.tree, view)?;

    for item in &state.items {
        draw_item(out, item, view)?;
    }

    if let Some(basket) = &state.basket {
        draw_basket(out, basket, view)?;
    }
    draw_controls_hint(out, view)?;

    if let Some(line) = hud.final_line() {
        draw_game_over(out, line, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — the ground
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "▀".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&hud.score_text))?;

    // Lives — right
    let rx = view
        .width
        .saturating_sub(hud.lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hud.lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_tree<W: Write>(out: &mut W, tree: &Tree, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 5 cols):
    //  (@@@)    ← row y      (canopy)
    //    ║      ← row y+1    (trunk)
    let Some((col, row)) = view.to_cell(tree.x, tree.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_CANOPY))?;
    out.queue(cursor::MoveTo(col.saturating_sub(2).max(1), row))?;
    out.queue(Print("(@@@)"))?;

    if row + 1 < view.height.saturating_sub(2) {
        out.queue(style::SetForegroundColor(C_TRUNK))?;
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

fn draw_item<W: Write>(out: &mut W, item: &Item, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(item.x, item.y) else {
        return Ok(());
    };
    let (glyph, color) = match item.kind {
        ItemKind::Apple => ("●", C_APPLE),
        ItemKind::GoldenApple => ("◆", C_GOLDEN),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_basket<W: Write>(out: &mut W, basket: &Basket, view: &Viewport) -> std::io::Result<()> {
    let left = view.col_f(basket.x - basket.half_width).round().max(1.0) as u16;
    let right = (view.col_f(basket.x + basket.half_width).round() as u16)
        .min(view.width.saturating_sub(2));
    let row = view.row_f(basket.y).round() as u16;
    if right <= left {
        return Ok(());
    }

    let inner = "_".repeat((right - left).saturating_sub(1) as usize);
    out.queue(cursor::MoveTo(left, row))?;
    out.queue(style::SetForegroundColor(C_BASKET))?;
    out.queue(Print(format!("\\{inner}/")))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse / ← → / A D : Move   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, final_line: &str, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (final_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
