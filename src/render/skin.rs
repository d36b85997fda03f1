use clap::ValueEnum;
use ratatui::{
    style::{Color, Modifier, Style, Stylize},
    text::Span,
};

use super::scene::SceneCell;
use crate::game::Direction;

const GRASS: [Color; 5] = [
    Color::Rgb(10, 23, 53),
    Color::Rgb(23, 47, 18),
    Color::Rgb(20, 45, 20),
    Color::Rgb(25, 56, 25),
    Color::Rgb(28, 63, 28),
];
const HEAD_GREEN: Color = Color::Rgb(89, 199, 93);
const BODY_LIGHT: Color = Color::Rgb(63, 160, 67);
const BODY_DARK: Color = Color::Rgb(47, 135, 52);
const MOUTH_PINK: Color = Color::Rgb(255, 122, 162);
const APPLE_RED: Color = Color::Rgb(255, 46, 46);

/// How board cells are painted. Every cell is two terminal columns wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Skin {
    /// Flat glyphs on a dotted board
    #[default]
    Plain,
    /// Directional head, apple, tapered tail on grass
    Sprite,
}

impl Skin {
    /// `hue` tints the plain background; the sprite grass ignores it
    pub fn cell_span(&self, cell: SceneCell, x: usize, y: usize, hue: u16) -> Span<'static> {
        match self {
            Skin::Plain => plain(cell).bg(background(hue)),
            Skin::Sprite => sprite(cell, x, y),
        }
    }

    pub fn border_color(&self) -> Color {
        match self {
            Skin::Plain => Color::White,
            Skin::Sprite => Color::Rgb(4, 0, 255),
        }
    }
}

fn plain(cell: SceneCell) -> Span<'static> {
    match cell {
        SceneCell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        SceneCell::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        SceneCell::Head { .. } => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        SceneCell::Body { .. } | SceneCell::Tail { .. } => {
            Span::styled("□ ", Style::default().fg(Color::Green))
        }
    }
}

fn sprite(cell: SceneCell, x: usize, y: usize) -> Span<'static> {
    let grass = grass_shade(x, y);
    match cell {
        SceneCell::Empty => Span::styled("  ", Style::default().bg(grass)),
        SceneCell::Food => Span::styled(
            "● ",
            Style::default()
                .fg(APPLE_RED)
                .bg(grass)
                .add_modifier(Modifier::BOLD),
        ),
        SceneCell::Head { facing, mouth_open } => {
            let (glyph, fg) = if mouth_open {
                (open_mouth(facing), MOUTH_PINK)
            } else {
                (eyes(facing), Color::Rgb(11, 43, 16))
            };
            Span::styled(
                glyph,
                Style::default()
                    .fg(fg)
                    .bg(HEAD_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
        }
        SceneCell::Body { even } => Span::styled("  ", Style::default().bg(body_shade(even))),
        SceneCell::Tail { toward, even } => {
            // The half touching the previous segment stays body-coloured
            let glyph = match toward {
                Direction::Right => "█▌",
                Direction::Left => "▐█",
                Direction::Down => "▀▀",
                Direction::Up => "▄▄",
            };
            Span::styled(glyph, Style::default().fg(body_shade(even)).bg(grass))
        }
    }
}

fn eyes(facing: Direction) -> &'static str {
    match facing {
        Direction::Right => " :",
        Direction::Left => ": ",
        Direction::Up => "''",
        Direction::Down => "..",
    }
}

fn open_mouth(facing: Direction) -> &'static str {
    match facing {
        Direction::Right => ":<",
        Direction::Left => ">:",
        Direction::Up => "vv",
        Direction::Down => "^^",
    }
}

/// Very dark tint of `hue`: hsl(hue, 60%, 6%)
pub fn background(hue: u16) -> Color {
    let (r, g, b) = hsl_to_rgb(f32::from(hue % 360), 0.6, 0.06);
    Color::Rgb(r, g, b)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let channel = |v: f32| ((v + m) * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}

fn body_shade(even: bool) -> Color {
    if even { BODY_LIGHT } else { BODY_DARK }
}

/// Fixed per-cell shade so repeated draws of one scene look the same
fn grass_shade(x: usize, y: usize) -> Color {
    let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % GRASS.len();
    GRASS[h]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_two_columns() {
        let cells = [
            SceneCell::Empty,
            SceneCell::Food,
            SceneCell::Head {
                facing: Direction::Up,
                mouth_open: true,
            },
            SceneCell::Body { even: true },
            SceneCell::Tail {
                toward: Direction::Left,
                even: false,
            },
        ];

        for skin in [Skin::Plain, Skin::Sprite] {
            for cell in cells {
                assert_eq!(skin.cell_span(cell, 3, 7, 0).width(), 2, "{skin:?} {cell:?}");
            }
        }
    }

    #[test]
    fn test_head_distinct_from_body() {
        for skin in [Skin::Plain, Skin::Sprite] {
            let head = skin.cell_span(
                SceneCell::Head {
                    facing: Direction::Right,
                    mouth_open: false,
                },
                0,
                0,
                0,
            );
            let body = skin.cell_span(SceneCell::Body { even: true }, 0, 0, 0);
            assert_ne!(head, body);
        }
    }

    #[test]
    fn test_sprite_background_is_stable() {
        assert_eq!(grass_shade(4, 9), grass_shade(4, 9));
        assert_eq!(
            Skin::Sprite.cell_span(SceneCell::Empty, 12, 1, 40),
            Skin::Sprite.cell_span(SceneCell::Empty, 12, 1, 200)
        );
    }

    #[test]
    fn test_plain_background_follows_hue() {
        assert_eq!(background(0), Color::Rgb(24, 6, 6));
        assert_eq!(background(120), Color::Rgb(6, 24, 6));
        assert_eq!(background(240), Color::Rgb(6, 6, 24));
        assert_eq!(background(360), background(0));

        let cold = Skin::Plain.cell_span(SceneCell::Empty, 0, 0, 0);
        let warm = Skin::Plain.cell_span(SceneCell::Empty, 0, 0, 120);
        assert_eq!(cold.style.bg, Some(Color::Rgb(24, 6, 6)));
        assert_ne!(cold, warm);
    }
}
