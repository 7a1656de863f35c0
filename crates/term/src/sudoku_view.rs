//! Sudoku grid with box rules.

use crate::core::sudoku::{Sudoku, SudokuMove, BOX, SIZE};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, BOARD_BG, MUTED};
use crate::types::Pos;

const CELL_W: u16 = 3;

const GIVEN_FG: Rgb = Rgb::new(235, 235, 235);
const ENTRY_FG: Rgb = Rgb::new(120, 190, 250);
const CONFLICT_FG: Rgb = Rgb::new(240, 90, 90);

fn move_pos(mv: &SudokuMove) -> Pos {
    match *mv {
        SudokuMove::Set { pos, .. } | SudokuMove::Clear { pos } | SudokuMove::Reveal { pos } => pos,
    }
}

/// Terminal offset of cell `i` along one axis, skipping rule lines.
fn offset(i: usize, cell: u16) -> u16 {
    i as u16 * cell + (i / BOX) as u16
}

impl BoardView for Sudoku {
    fn extent(&self) -> (u8, u8) {
        (SIZE as u8, SIZE as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        (offset(SIZE, CELL_W) - 1, offset(SIZE, 1) - 1)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, SudokuMove>) {
        let (w, h) = self.board_size();
        let rule = CellStyle::new(MUTED, BOARD_BG);
        for b in 1..BOX {
            let i = b * BOX;
            let rx = x + offset(i, CELL_W) - 1;
            let ry = y + offset(i, 1) - 1;
            fb.fill_rect(rx, y, 1, h, '│', rule);
            fb.fill_rect(x, ry, w, 1, '─', rule);
        }

        let hinted = marks.hint.map(move_pos);
        let rejected = marks.rejected.map(move_pos);
        for r in 0..SIZE {
            for c in 0..SIZE {
                let pos = Pos::new(r as u8, c as u8);
                let bg = marks.background(pos, hinted == Some(pos), rejected == Some(pos));
                let value = self.value(pos);
                let fg = if self.is_conflict(pos) {
                    CONFLICT_FG
                } else if self.is_given(pos) {
                    GIVEN_FG
                } else {
                    ENTRY_FG
                };
                let mut style = CellStyle::new(fg, bg);
                if self.is_given(pos) {
                    style = style.bold();
                }
                let ch = char::from_digit(value as u32, 10).filter(|_| value != 0).unwrap_or('·');
                let px = x + offset(c, CELL_W);
                let py = y + offset(r, 1);
                fb.put_char(px, py, ' ', style);
                fb.put_char(px + 1, py, ch, style);
                fb.put_char(px + 2, py, ' ', style);
            }
        }
    }

    fn describe(&self, mv: &SudokuMove) -> String {
        let pos = move_pos(mv);
        let at = format!("row {} column {}", pos.row + 1, pos.col + 1);
        match *mv {
            SudokuMove::Set { digit, .. } => format!("{digit} at {at}"),
            SudokuMove::Clear { .. } => format!("clear {at}"),
            SudokuMove::Reveal { pos } => {
                format!("{} revealed at {at}", self.solution()[pos.row as usize][pos.col as usize])
            }
        }
    }

    fn help(&self) -> &'static str {
        "1-9 enter digit  0/backspace clear  ? reveal a cell"
    }
}
