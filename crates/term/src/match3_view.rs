//! Bubble Pop gem grid.

use crate::core::match3::{BubblePop, Swap};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, TEXT};
use crate::types::Pos;

const CELL_W: u16 = 3;

/// Single-width stand-ins for the gem emoji, with their colours.
const GEM_GLYPHS: [(char, Rgb); 6] = [
    ('♥', Rgb::new(245, 130, 180)),
    ('★', Rgb::new(250, 220, 80)),
    ('♣', Rgb::new(110, 210, 120)),
    ('♦', Rgb::new(100, 170, 250)),
    ('●', Rgb::new(180, 120, 240)),
    ('▲', Rgb::new(250, 160, 70)),
];

fn gem_glyph(gem: u8) -> (char, Rgb) {
    GEM_GLYPHS[gem as usize % GEM_GLYPHS.len()]
}

impl BoardView for BubblePop {
    fn extent(&self) -> (u8, u8) {
        (self.rows() as u8, self.cols() as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        (self.cols() as u16 * CELL_W, self.rows() as u16)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, Swap>) {
        let touches = |mv: Option<&Swap>, pos: Pos| mv.is_some_and(|s| s.a == pos || s.b == pos);
        let popping = self.popping();

        for (r, row) in self.grid().iter().enumerate() {
            for (c, &gem) in row.iter().enumerate() {
                let pos = Pos::new(r as u8, c as u8);
                let bg = marks.background(pos, touches(marks.hint, pos), touches(marks.rejected, pos));
                let (ch, style) = if popping.is_some_and(|m| m.contains(pos)) {
                    ('*', CellStyle::new(TEXT, bg).bold())
                } else {
                    let (ch, fg) = gem_glyph(gem);
                    (ch, CellStyle::new(fg, bg))
                };
                let px = x + c as u16 * CELL_W;
                fb.put_char(px, y + r as u16, ' ', style);
                fb.put_char(px + 1, y + r as u16, ch, style);
                fb.put_char(px + 2, y + r as u16, ' ', style);
            }
        }
    }

    fn describe(&self, mv: &Swap) -> String {
        format!(
            "swap row {} column {} with row {} column {}",
            mv.a.row + 1,
            mv.a.col + 1,
            mv.b.row + 1,
            mv.b.col + 1
        )
    }

    fn help(&self) -> &'static str {
        "select a gem then a neighbour to swap"
    }
}
