//! Mahjongg seen from above.
//!
//! Each footprint cell shows its highest live tile as a two-character code
//! followed by the stack height. Free tiles are bright, blocked ones dim.

use crate::core::mahjongg::{Mahjongg, MahjonggMove, Tile};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, MUTED};
use crate::types::Pos;

const TILE_W: u16 = 4;

/// Suit colours for the four code letters.
const SUIT_FG: [Rgb; 4] = [
    Rgb::new(240, 140, 160),
    Rgb::new(120, 200, 240),
    Rgb::new(140, 220, 130),
    Rgb::new(230, 200, 100),
];

/// Single-width code for a tile type: `A1` .. `D9`.
pub fn tile_code(type_id: u8) -> [char; 2] {
    [(b'A' + type_id / 9) as char, (b'1' + type_id % 9) as char]
}

fn tile_pos(tile: &Tile) -> Pos {
    Pos::new(tile.row, tile.col)
}

impl BoardView for Mahjongg {
    fn extent(&self) -> (u8, u8) {
        let (cols, rows) = Mahjongg::extent(self);
        (rows, cols)
    }

    fn board_size(&self) -> (u16, u16) {
        let (cols, rows) = Mahjongg::extent(self);
        (cols as u16 * TILE_W, rows as u16 * 2)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, MahjonggMove>) {
        let ids = |mv: Option<&MahjonggMove>| mv.map(|m| [m.first, m.second]);
        let hinted = ids(marks.hint);
        let rejected = ids(marks.rejected);

        let (cols, rows) = Mahjongg::extent(self);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Pos::new(row, col);
                let px = x + col as u16 * TILE_W;
                let py = y + row as u16 * 2;
                let Some(id) = self.top_tile(col, row) else {
                    let bg = marks.background(pos, false, false);
                    fb.put_str(px, py, " ·  ", CellStyle::new(MUTED, bg).dim());
                    continue;
                };
                let Some(tile) = self.tile(id) else {
                    continue;
                };
                let bg = marks.background(
                    pos,
                    hinted.is_some_and(|h| h.contains(&id)),
                    rejected.is_some_and(|r| r.contains(&id)),
                );
                let fg = SUIT_FG[(tile.type_id / 9) as usize % SUIT_FG.len()];
                let style = if self.is_free(id) {
                    CellStyle::new(fg, bg).bold()
                } else {
                    CellStyle::new(fg, bg).dim()
                };
                let [a, b] = tile_code(tile.type_id);
                fb.put_char(px, py, a, style);
                fb.put_char(px + 1, py, b, style);
                let height = char::from_digit(tile.layer as u32 + 1, 10).unwrap_or('+');
                fb.put_char(px + 2, py, height, CellStyle::new(MUTED, bg));
            }
        }
    }

    fn describe(&self, mv: &MahjonggMove) -> String {
        let at = |id: usize| {
            self.tile(id).map(|t| {
                let p = tile_pos(t);
                format!("{}{} at {},{}", tile_code(t.type_id)[0], tile_code(t.type_id)[1], p.col + 1, p.row + 1)
            })
        };
        match (at(mv.first), at(mv.second)) {
            (Some(a), Some(b)) => format!("pair {a} and {b}"),
            _ => "pair".to_string(),
        }
    }

    fn help(&self) -> &'static str {
        "select two free matching tiles  s shuffle"
    }
}
