//! Rendering layer; every terminal write for the play field happens here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! stage.  No game logic is performed; this module only translates world
//! positions into terminal cells and draws them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shmup_core::entities::{Level, StrategyKind, Vec2, WeaponKind};
use shmup_core::enemy::EnemyController;
use shmup_core::stage::{Stage, StageStatus};

use crate::arena::{Arena, Projectile};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_WAVE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_BLINK: Color = Color::DarkGrey;
const C_ENEMY_SHOOTER: Color = Color::Green;
const C_ENEMY_SCATTER: Color = Color::Red;
const C_ENEMY_CRAZY: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP_ACTIVE: Color = Color::Yellow;

/// Terminal area used for the play field, in cells.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    /// Map a world position into the bordered play field (rows 2..h-2).
    fn cell(&self, stage: &Stage, p: Vec2) -> Option<(u16, u16)> {
        let world = stage.config().world;
        if !world.contains(p) {
            return None;
        }
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(4) as f32;
        let x = 1.0 + (p.x - world.min.x) / world.width() * (cols - 1.0);
        let y = 2.0 + (p.y - world.min.y) / world.height() * (rows - 1.0);
        Some((x.round() as u16, y.round() as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    screen: Screen,
    stage: &Stage,
    arena: &Arena,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;
    draw_hud(out, screen, stage)?;

    for enemy in stage.enemies() {
        draw_enemy(out, screen, stage, enemy)?;
    }
    for projectile in &arena.projectiles {
        draw_projectile(out, screen, stage, projectile)?;
    }

    draw_player(out, screen, stage)?;
    draw_controls_hint(out, screen)?;

    match stage.status() {
        StageStatus::GameOver => draw_banner(out, screen, stage, "GAME  OVER", Color::Red)?,
        StageStatus::LevelComplete => {
            draw_banner(out, screen, stage, "LEVEL CLEAR", Color::Green)?
        }
        StageStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, screen: Screen, stage: &Stage) -> std::io::Result<()> {
    // Wave, escalation and dodge gauge, left
    let wave = stage
        .scheduler()
        .current_index()
        .map(|i| format!("Wave:{i:>2}"))
        .unwrap_or_else(|| "Wave: --".to_string());
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(format!(
        "{wave}  Speed:x{:.2}  Dodge:{:>3}%",
        stage.scheduler().escalation().scroll_speed,
        stage.player().dodge_cooldown_percent()
    )))?;

    // Level, centre
    let level = stage.config().level;
    let level_str = match level {
        Level::Easy => "[ EASY ]",
        Level::Medium => "[ MEDIUM ]",
        Level::Hard => "[ HARD ]",
    };
    let level_color = match level {
        Level::Easy => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Hard => Color::Red,
    };
    let lx = (screen.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(level_str))?;

    // Active weapon + hearts, right-aligned
    let weapons = stage.player().weapons();
    let power_tag = match (weapons.active(), weapons.selection().remaining()) {
        (WeaponKind::Scatterer, Some(ms)) => format!("[SCATTER {:>2}s] ", ms / 1000 + 1),
        (WeaponKind::Heavy, Some(ms)) => format!("[HEAVY   {:>2}s] ", ms / 1000 + 1),
        _ => String::new(),
    };
    let hearts: String = "♥".repeat(stage.session().hearts() as usize);
    let lives_str = format!("Lives:{}", hearts);
    let right_str = format!("{}{}", power_tag, lives_str);

    let rx = screen
        .width
        .saturating_sub(right_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;

    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, screen: Screen, stage: &Stage) -> std::io::Result<()> {
    let player = stage.player();
    if !player.is_alive() {
        return Ok(());
    }
    let Some((x, y)) = screen.cell(stage, player.position()) else {
        return Ok(());
    };
    let color = if player.is_invulnerable() {
        C_PLAYER_BLINK
    } else {
        C_PLAYER
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(x.saturating_sub(1), y))?;
    out.queue(Print("=▶"))?;
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    screen: Screen,
    stage: &Stage,
    enemy: &EnemyController,
) -> std::io::Result<()> {
    let Some((x, y)) = screen.cell(stage, enemy.position()) else {
        return Ok(());
    };
    let (sprite, color) = match enemy.spec().strategy {
        StrategyKind::Single { .. } | StrategyKind::Tracking { .. } => ("«◆", C_ENEMY_SHOOTER),
        StrategyKind::Scatterer { .. } | StrategyKind::Spraying => ("«◎»", C_ENEMY_SCATTER),
        StrategyKind::CrazyScatter => ("<☠>", C_ENEMY_CRAZY),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(x.saturating_sub(1), y))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    screen: Screen,
    stage: &Stage,
    projectile: &Projectile,
) -> std::io::Result<()> {
    let Some((x, y)) = screen.cell(stage, projectile.position) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(x, y))?;
    if projectile.from_player() {
        out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
        out.queue(Print("-"))?;
    } else {
        out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / ←↑↓→ : Move   SPACE/J : Shoot   K : Dodge   Q : Quit"))?;
    Ok(())
}

// ── End-of-level overlay ──────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    screen: Screen,
    stage: &Stage,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗".to_string(),
        format!("║{:^20}║", title),
        "╚════════════════════╝".to_string(),
    ];

    let cx = screen.width / 2;
    let start_row = (screen.height / 2).saturating_sub(3);

    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(msg))?;
    }

    let hint = if stage.session().restart_ready() || stage.status() == StageStatus::LevelComplete {
        "R - Play Again  Q - Quit"
    } else {
        "..."
    };
    let hint_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
