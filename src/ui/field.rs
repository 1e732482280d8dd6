use std::collections::HashMap;

use alien_invaders::consts::*;
use alien_invaders::models::{AlienTier, Bolt};
use alien_invaders::wave::Wave;
use ratatui::prelude::*;

const BACKGROUND: Color = Color::Rgb(0, 0, 5);
const STARS: usize = 48;

type Cell = (char, Style);

/// Braille dots keyed by terminal cell, each cell holding a 2x4 dot block.
struct Dots {
    cells: HashMap<(usize, usize), u8>,
    width: i32,
    height: i32,
}

impl Dots {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: HashMap::new(),
            width: (columns * 2) as i32,
            height: (rows * 4) as i32,
        }
    }

    /// Maps a world point (y up, origin bottom-left) onto the dot grid.
    fn project(&self, x: f32, y: f32) -> (i32, i32) {
        let dx = x / GAME_WIDTH * self.width as f32;
        let dy = (GAME_HEIGHT - y) / GAME_HEIGHT * self.height as f32;
        (dx as i32, dy as i32)
    }

    fn set(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        *self.cells.entry((x / 2, y / 4)).or_insert(0) |= braille_bit(x % 2, y % 4);
    }

    fn stamp(&mut self, (cx, cy): (i32, i32), pixels: &[(i32, i32)]) {
        for &(dx, dy) in pixels {
            self.set(cx + dx, cy + dy);
        }
    }

    fn paint(self, grid: &mut [Vec<Cell>], style: Style) {
        for ((cx, cy), bits) in self.cells {
            if bits == 0 {
                continue;
            }
            if let Some(cell) = grid.get_mut(cy).and_then(|row| row.get_mut(cx)) {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                *cell = (ch, style.bg(BACKGROUND));
            }
        }
    }
}

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

#[rustfmt::skip]
fn alien_sprite(tier: AlienTier, frame: bool) -> &'static [(i32, i32)] {
    match (tier, frame) {
        (AlienTier::Squid, false) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-1, 2), (1, 2),
        ],
        (AlienTier::Squid, true) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-3, 2), (3, 2),
        ],
        (AlienTier::Crab, false) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (-2, 2), (2, 2), (3, 2),
        ],
        (AlienTier::Crab, true) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (-1, 2), (1, 2), (2, 2),
        ],
        (AlienTier::Octopus, false) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (2, 2),
        ],
        (AlienTier::Octopus, true) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (3, 2),
        ],
    }
}

#[rustfmt::skip]
const SHIP_SPRITE: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
    (-4, 2), (-3, 2), (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2),
];

fn tier_color(tier: AlienTier) -> Color {
    match tier {
        AlienTier::Squid => Color::Rgb(255, 80, 80),
        AlienTier::Crab => Color::Rgb(80, 255, 150),
        AlienTier::Octopus => Color::Rgb(200, 180, 255),
    }
}

/// Fixed pseudo-random star field; a quarter of the stars dim each frame.
fn draw_stars(grid: &mut [Vec<Cell>], background_frame: u8) {
    let rows = grid.len();
    let columns = grid.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        return;
    }
    for i in 0..STARS {
        let hash = (i as u32).wrapping_mul(2_654_435_761);
        let x = (hash >> 8) as usize % columns;
        let y = (hash >> 20) as usize % rows;
        let color = if (i + background_frame as usize) % 4 != 0 {
            Color::Rgb(140, 140, 170)
        } else {
            Color::Rgb(40, 40, 60)
        };
        grid[y][x] = ('·', Style::default().fg(color).bg(BACKGROUND));
    }
}

fn draw_aliens(grid: &mut [Vec<Cell>], wave: &Wave) {
    let (columns, rows) = (grid.first().map_or(0, Vec::len), grid.len());
    for tier in [AlienTier::Octopus, AlienTier::Crab, AlienTier::Squid] {
        let mut dots = Dots::new(columns, rows);
        let aliens = wave.formation().iter().map(|(_, alien)| alien);
        for alien in aliens.filter(|alien| alien.tier == tier) {
            let center = dots.project(alien.x, alien.y);
            dots.stamp(center, alien_sprite(alien.tier, alien.frame));
        }
        dots.paint(grid, Style::default().fg(tier_color(tier)));
    }
}

fn draw_bolts(grid: &mut [Vec<Cell>], bolts: &[Bolt], background_frame: u8) {
    let (columns, rows) = (grid.first().map_or(0, Vec::len), grid.len());
    let mut player = Dots::new(columns, rows);
    let mut alien = Dots::new(columns, rows);
    let zigzag: &[(i32, i32)] = if background_frame % 2 == 0 {
        &[(0, 0), (1, 1), (0, 2), (-1, 3)]
    } else {
        &[(0, 0), (-1, 1), (0, 2), (1, 3)]
    };
    for bolt in bolts {
        if bolt.is_player_bolt() {
            let top = player.project(bolt.x, bolt.y + BOLT_HEIGHT / 2.0);
            player.stamp(top, &[(0, 0), (0, 1), (0, 2)]);
        } else {
            let top = alien.project(bolt.x, bolt.y + BOLT_HEIGHT / 2.0);
            alien.stamp(top, zigzag);
        }
    }
    player.paint(
        grid,
        Style::default().fg(Color::Rgb(255, 255, 200)).add_modifier(Modifier::BOLD),
    );
    alien.paint(
        grid,
        Style::default().fg(Color::Rgb(255, 100, 100)).add_modifier(Modifier::BOLD),
    );
}

fn draw_defense_line(grid: &mut [Vec<Cell>]) {
    let (columns, rows) = (grid.first().map_or(0, Vec::len), grid.len());
    let mut line = Dots::new(columns, rows);
    let (_, y) = line.project(0.0, DEFENSE_LINE);
    for x in (0..line.width).step_by(3) {
        line.set(x, y);
    }
    line.paint(grid, Style::default().fg(Color::Rgb(40, 80, 40)));
}

/// Rasterizes the playfield into `height` lines of `width` braille cells.
pub fn render_field(wave: Option<&Wave>, width: usize, height: usize) -> Vec<Line<'static>> {
    let mut grid: Vec<Vec<Cell>> = vec![vec![(' ', Style::default().bg(BACKGROUND)); width]; height];

    let background_frame = wave.map_or(0, Wave::background_frame);
    draw_stars(&mut grid, background_frame);

    if let Some(wave) = wave {
        draw_defense_line(&mut grid);
        draw_aliens(&mut grid, wave);
        draw_bolts(&mut grid, wave.bolts(), background_frame);

        if let Some(ship) = wave.ship() {
            let mut dots = Dots::new(width, height);
            let center = dots.project(ship.x, ship.y);
            dots.stamp(center, SHIP_SPRITE);
            dots.paint(
                &mut grid,
                Style::default().fg(Color::Rgb(80, 255, 80)).add_modifier(Modifier::BOLD),
            );
        }
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_origin_projects_to_the_bottom_left_dot() {
        let dots = Dots::new(80, 20);
        assert_eq!(dots.project(0.0, 0.0), (0, 80));
        assert_eq!(dots.project(GAME_WIDTH, GAME_HEIGHT), (160, 0));
    }

    #[test]
    fn field_has_the_requested_shape() {
        let wave = Wave::new(7).unwrap();
        let lines = render_field(Some(&wave), 40, 12);
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|line| line.spans.len() == 40));
    }

    #[test]
    fn ship_is_drawn_near_the_bottom_middle() {
        let wave = Wave::new(7).unwrap();
        let lines = render_field(Some(&wave), 80, 30);
        let ship_green = Color::Rgb(80, 255, 80);
        let row = lines
            .iter()
            .position(|line| line.spans.iter().any(|s| s.style.fg == Some(ship_green)))
            .expect("ship cells present");
        assert!(row > 25);
    }
}
