//! Game scene rendering.
//!
//! Uses a cell buffer for per-character color control: the world (640x600
//! units) is projected onto the content area, entities are stamped into a
//! 2D grid, and the grid is emitted row-by-row as Paragraph lines.

use crate::core::types::{GamePhase, Star, Tier, World, GROUND_TOP, WORLD_HEIGHT, WORLD_WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const STAR_CHAR: char = '✦';

/// Render the whole game screen: play field, status bar, info panel, and
/// the lose overlay once the run has ended.
pub fn render_scene(frame: &mut Frame, area: Rect, world: &World, best_score: u32) {
    let layout = create_layout(frame, area);

    render_play_field(frame, layout.content, world);
    render_status_bar(frame, layout.status_bar, world);
    render_info_panel(frame, layout.info_panel, world, best_score);

    if world.phase == GamePhase::Ended {
        render_lose_overlay(frame, area, world, best_score);
    }
}

struct SceneLayout {
    content: Rect,
    status_bar: Rect,
    info_panel: Rect,
}

/// Outer border, play field + 2-line status bar on the left, info panel on
/// the right.
fn create_layout(frame: &mut Frame, area: Rect) -> SceneLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Starfall ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(20)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(h_chunks[0]);

    SceneLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Cell in the render buffer.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, world: &World) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let rows = area.height as usize;
    let cols = area.width as usize;
    let mut buffer: Vec<Vec<Cell>> = vec![vec![Cell::default(); cols]; rows];

    let x_scale = cols as f64 / WORLD_WIDTH;
    let y_scale = rows as f64 / WORLD_HEIGHT;

    // ── Background: a few drifting night-sky specks ───────────────────
    let drift = (world.tick_count as f64 * 0.01) % cols as f64;
    for &(base_x, world_y) in &[
        (80.0_f64, 40.0_f64),
        (210.0, 110.0),
        (340.0, 60.0),
        (470.0, 150.0),
        (560.0, 90.0),
    ] {
        let cx = ((base_x * x_scale - drift).rem_euclid(cols as f64)) as usize % cols;
        let cy = ((world_y * y_scale) as usize).min(rows - 1);
        if buffer[cy][cx].ch == ' ' {
            buffer[cy][cx] = Cell {
                ch: '·',
                fg: Color::Rgb(70, 70, 100),
            };
        }
    }

    // ── Ground ────────────────────────────────────────────────────────
    let ground_row = ((GROUND_TOP * y_scale) as usize).min(rows - 1);
    for row in buffer.iter_mut().take(rows).skip(ground_row) {
        for cell in row.iter_mut() {
            *cell = Cell {
                ch: GROUND_CHAR,
                fg: Color::Rgb(70, 130, 70),
            };
        }
    }
    if ground_row > 0 {
        for (i, cell) in buffer[ground_row - 1].iter_mut().enumerate() {
            if cell.ch == ' ' && i % 4 == 0 {
                *cell = Cell {
                    ch: GROUND_SUB,
                    fg: Color::Rgb(55, 100, 55),
                };
            }
        }
    }

    // ── Ledges ────────────────────────────────────────────────────────
    for ledge in &world.ledges {
        let plat = &ledge.platform;
        let row = (plat.y * y_scale) as i32;
        if row < 0 || row >= rows as i32 {
            continue;
        }
        let start = (plat.left().max(0.0) * x_scale) as usize;
        let end = ((plat.right().min(WORLD_WIDTH) * x_scale) as usize).min(cols);
        for cell in buffer[row as usize][start..end].iter_mut() {
            *cell = Cell {
                ch: GROUND_CHAR,
                fg: Color::Rgb(110, 160, 110),
            };
        }
    }

    // ── Stars ─────────────────────────────────────────────────────────
    for star in &world.stars {
        let cx = ((star.body.x + star.body.w / 2.0) * x_scale) as i32;
        let cy = ((star.body.y + star.body.h / 2.0) * y_scale) as i32;
        if cx >= 0 && cx < cols as i32 && cy >= 0 && cy < rows as i32 {
            buffer[cy as usize][cx as usize] = Cell {
                ch: STAR_CHAR,
                fg: star_color(star),
            };
        }
    }

    // ── Player (2 rows x 3 cols, anchored to the body's bottom) ───────
    let sprite = player_sprite(world.player.frame);
    let px = (world.player.body.x * x_scale) as i32;
    let py_bottom = ((world.player.body.bottom() * y_scale) as i32 - 1).max(1);
    for (row_offset, sprite_row) in sprite.iter().enumerate() {
        let cy = py_bottom - 1 + row_offset as i32;
        if cy < 0 || cy >= rows as i32 {
            continue;
        }
        for (col_offset, ch) in sprite_row.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let cx = px + col_offset as i32;
            if cx >= 0 && cx < cols as i32 {
                buffer[cy as usize][cx as usize] = Cell {
                    ch,
                    fg: Color::LightCyan,
                };
            }
        }
    }

    // ── Stamp the buffer ──────────────────────────────────────────────
    let lines: Vec<Line> = buffer
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| {
                        Span::styled(cell.ch.to_string(), Style::default().fg(cell.fg))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Stars fade as they sit uncollected.
fn star_color(star: &Star) -> Color {
    if star.still > 60 {
        Color::Rgb(150, 130, 40)
    } else {
        Color::Yellow
    }
}

/// Spritesheet: frames 0-3 walk left, 4 idle, 5-8 walk right.
fn player_sprite(frame: usize) -> [&'static str; 2] {
    match frame {
        0 => ["<o ", "/| "],
        1 => ["<o ", "|\\ "],
        2 => ["<o ", "/\\ "],
        3 => ["<o ", " | "],
        5 => [" o>", " |\\"],
        6 => [" o>", " /|"],
        7 => [" o>", " /\\"],
        8 => [" o>", " | "],
        _ => [" o ", "/ \\"],
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Steady => Color::White,
        Tier::Careful => Color::Rgb(0, 204, 0),
        Tier::Danger => Color::Rgb(255, 153, 0),
        Tier::Critical => Color::Rgb(255, 0, 0),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, world: &World) {
    if area.height < 1 {
        return;
    }

    let (message, color) = if world.quit_pending {
        ("Press Esc again to quit".to_string(), Color::Yellow)
    } else {
        (
            format!("{}{}", world.tier.prefix(), world.counter),
            tier_color(world.tier),
        )
    };

    let status = Paragraph::new(message)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 {
        let controls = Line::from(vec![
            Span::styled("[< >]", Style::default().fg(Color::White)),
            Span::styled(" Move  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Space]", Style::default().fg(Color::White)),
            Span::styled(" Jump  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(
            Paragraph::new(controls).alignment(Alignment::Center),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, world: &World, best_score: u32) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let seconds = world.tick_count * crate::core::types::PHYSICS_TICK_MS / 1000;
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Score  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                world.score.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best   ", Style::default().fg(Color::DarkGray)),
            Span::styled(best_score.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Stars  ", Style::default().fg(Color::DarkGray)),
            Span::styled(world.live_stars.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("Time   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}:{:02}", seconds / 60, seconds % 60),
                Style::default().fg(Color::White),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_lose_overlay(frame: &mut Frame, area: Rect, world: &World, best_score: u32) {
    let popup = centered_rect(area, 30, 8);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let best_line = if world.score > best_score {
        Line::from(Span::styled(
            "New best score!",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            format!("Best score: {}", best_score),
            Style::default().fg(Color::DarkGray),
        ))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Oh no! You lose!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final score: {}", world.score)),
        best_line,
        Line::from(""),
        Line::from(vec![
            Span::styled("[R]", Style::default().fg(Color::White)),
            Span::styled(" Restart   ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
