//! Jigsaw board with the tray of loose pieces below it.
//!
//! Cursor rows `0..n` are board slots, rows `n..2n` walk the tray in order.

use crate::core::jigsaw::{Jigsaw, JigsawMove};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, BOARD_BG, MUTED, TEXT};
use crate::types::Pos;

const PIECE_W: u16 = 4;

const HOME_FG: Rgb = Rgb::new(120, 220, 140);
const TRAY_FG: Rgb = Rgb::new(230, 200, 130);

/// What sits under a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spot {
    Slot(usize),
    /// Index into the tray, not a piece id.
    Tray(usize),
    Empty,
}

pub fn spot_at(game: &Jigsaw, pos: Pos) -> Spot {
    let n = game.size();
    let (row, col) = (pos.row as usize, pos.col as usize);
    if col >= n {
        return Spot::Empty;
    }
    if row < n {
        return Spot::Slot(row * n + col);
    }
    let index = (row - n) * n + col;
    if index < game.tray().len() {
        Spot::Tray(index)
    } else {
        Spot::Empty
    }
}

fn label(piece: usize) -> String {
    format!("[{:02}]", piece + 1)
}

impl BoardView for Jigsaw {
    fn extent(&self) -> (u8, u8) {
        ((self.size() * 2) as u8, self.size() as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        let n = self.size() as u16;
        (n * PIECE_W, 2 * n + 1)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, JigsawMove>) {
        let n = self.size();
        let slot_pos = |slot: usize| Pos::new((slot / n) as u8, (slot % n) as u8);
        let tray_pos = |i: usize| Pos::new((n + i / n) as u8, (i % n) as u8);
        let tray_index = |piece: usize| self.tray().iter().position(|&p| p == piece);

        let touched = |mv: Option<&JigsawMove>| -> Vec<Pos> {
            match mv.copied() {
                Some(JigsawMove::Place { piece, slot }) | Some(JigsawMove::Exchange { slot, piece }) => {
                    let mut v = vec![slot_pos(slot)];
                    v.extend(tray_index(piece).map(tray_pos));
                    v
                }
                Some(JigsawMove::Shift { from, to }) => vec![slot_pos(from), slot_pos(to)],
                None => Vec::new(),
            }
        };
        let hinted = touched(marks.hint);
        let rejected = touched(marks.rejected);
        let bg = |pos: Pos| marks.background(pos, hinted.contains(&pos), rejected.contains(&pos));

        for (slot, piece) in self.slots().iter().enumerate() {
            let pos = slot_pos(slot);
            let px = x + pos.col as u16 * PIECE_W;
            let py = y + pos.row as u16;
            match piece {
                Some(p) if *p == slot => fb.put_str(px, py, &label(*p), CellStyle::new(HOME_FG, bg(pos)).bold()),
                Some(p) => fb.put_str(px, py, &label(*p), CellStyle::new(TEXT, bg(pos))),
                None => fb.put_str(px, py, "[  ]", CellStyle::new(MUTED, bg(pos)).dim()),
            }
        }

        fb.fill_rect(x, y + n as u16, n as u16 * PIECE_W, 1, '·', CellStyle::new(MUTED, BOARD_BG).dim());

        for (i, &piece) in self.tray().iter().enumerate() {
            let pos = tray_pos(i);
            let px = x + pos.col as u16 * PIECE_W;
            let py = y + pos.row as u16 + 1;
            fb.put_str(px, py, &label(piece), CellStyle::new(TRAY_FG, bg(pos)));
        }
    }

    fn describe(&self, mv: &JigsawMove) -> String {
        match *mv {
            JigsawMove::Place { piece, slot } => format!("piece {} to slot {}", piece + 1, slot + 1),
            JigsawMove::Shift { from, to } => format!("slot {} to slot {}", from + 1, to + 1),
            JigsawMove::Exchange { slot, piece } => {
                format!("swap slot {} with piece {}", slot + 1, piece + 1)
            }
        }
    }

    fn help(&self) -> &'static str {
        "select a piece then a slot  pieces belong in numbered order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;
    use crate::game_view::Cursor;

    #[test]
    fn spots_cover_board_then_tray() {
        let mut game = Jigsaw::from_tray(3, vec![8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(spot_at(&game, Pos::new(0, 0)), Spot::Slot(0));
        assert_eq!(spot_at(&game, Pos::new(2, 2)), Spot::Slot(8));
        assert_eq!(spot_at(&game, Pos::new(3, 0)), Spot::Tray(0));
        assert_eq!(spot_at(&game, Pos::new(5, 2)), Spot::Tray(8));

        assert!(game.apply(&JigsawMove::Place { piece: 0, slot: 0 }));
        assert_eq!(spot_at(&game, Pos::new(5, 2)), Spot::Empty);
        assert_eq!(spot_at(&game, Pos::new(0, 3)), Spot::Empty);
    }

    #[test]
    fn board_and_tray_render() {
        let mut game = Jigsaw::from_tray(3, vec![8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert!(game.apply(&JigsawMove::Place { piece: 0, slot: 0 }));
        assert!(game.apply(&JigsawMove::Place { piece: 8, slot: 1 }));
        assert_eq!(game.board_size(), (12, 7));

        let mut fb = FrameBuffer::new(12, 7);
        let cursor = Cursor::default();
        let marks = Marks {
            cursor: &cursor,
            hint: None,
            rejected: None,
        };
        game.draw_board(&mut fb, 0, 0, &marks);
        assert_eq!(fb.row_text(0), "[01][09][  ]");
        assert_eq!(fb.row_text(3), "············");
        assert_eq!(fb.row_text(4), "[08][07][06]");
        assert_eq!(fb.row_text(6), "[02]        ");
    }
}
