//! Letter grid with the word list beside it.

use crate::core::word_search::{Selection, WordSearch};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, BOARD_BG, MUTED, TEXT};
use crate::types::Pos;

const CELL_W: u16 = 2;
const LIST_GAP: u16 = 3;

const FOUND_FG: Rgb = Rgb::new(120, 220, 140);

fn cells(sel: Option<&Selection>) -> Vec<Pos> {
    sel.and_then(|s| s.start.line_to(s.end)).unwrap_or_default()
}

impl BoardView for WordSearch {
    fn extent(&self) -> (u8, u8) {
        (self.size() as u8, self.size() as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        let longest = self.words().iter().map(|w| w.word.len()).max().unwrap_or(0) as u16;
        let grid = self.size() as u16;
        (
            grid * CELL_W + LIST_GAP + longest + 2,
            grid.max(self.words().len() as u16),
        )
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, Selection>) {
        let hinted = cells(marks.hint);
        let rejected = cells(marks.rejected);
        // Cells between the marked start and the cursor preview the pick.
        let preview = marks
            .cursor
            .marked
            .and_then(|start| start.line_to(marks.cursor.pos))
            .unwrap_or_default();

        for (r, row) in self.grid().iter().enumerate() {
            for (c, &letter) in row.iter().enumerate() {
                let pos = Pos::new(r as u8, c as u8);
                let mut bg = marks.background(pos, hinted.contains(&pos), rejected.contains(&pos));
                if bg == BOARD_BG && preview.contains(&pos) {
                    bg = crate::game_view::MARK_BG;
                }
                let style = if self.in_found_word(pos) {
                    CellStyle::new(FOUND_FG, bg).bold()
                } else {
                    CellStyle::new(TEXT, bg)
                };
                let px = x + c as u16 * CELL_W;
                fb.put_char(px, y + r as u16, letter, style);
                fb.put_char(px + 1, y + r as u16, ' ', CellStyle::new(TEXT, bg));
            }
        }

        let list_x = x + self.size() as u16 * CELL_W + LIST_GAP;
        for (i, placed) in self.words().iter().enumerate() {
            let (mark, style) = if self.is_found(&placed.word) {
                ("✓ ", CellStyle::new(FOUND_FG, BOARD_BG).dim())
            } else {
                ("  ", CellStyle::new(TEXT, BOARD_BG))
            };
            fb.put_str(list_x, y + i as u16, mark, CellStyle::new(FOUND_FG, BOARD_BG));
            fb.put_str(list_x + 2, y + i as u16, &placed.word, style);
        }
        if self.words().is_empty() {
            fb.put_str(list_x, y, "no words", CellStyle::new(MUTED, BOARD_BG));
        }
    }

    fn describe(&self, mv: &Selection) -> String {
        let word = self.read(mv).unwrap_or_default();
        format!(
            "{word} from row {} column {}",
            mv.start.row + 1,
            mv.start.col + 1
        )
    }

    fn help(&self) -> &'static str {
        "select the first and last letter of a word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::word_search::PlacedWord;
    use crate::core::Game;
    use crate::game_view::Cursor;

    fn tiny() -> WordSearch {
        let rows = ["CATX", "XXXD", "XXXO", "XXXG"];
        WordSearch::from_parts(
            rows.iter().map(|r| r.chars().collect()).collect(),
            vec![
                PlacedWord {
                    word: "CAT".into(),
                    cells: vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)],
                },
                PlacedWord {
                    word: "DOG".into(),
                    cells: vec![Pos::new(1, 3), Pos::new(2, 3), Pos::new(3, 3)],
                },
            ],
        )
    }

    #[test]
    fn grid_and_word_list_render() {
        let mut game = tiny();
        game.apply(&Selection {
            start: Pos::new(0, 0),
            end: Pos::new(0, 2),
        });
        let (w, h) = game.board_size();
        assert_eq!((w, h), (4 * 2 + 3 + 3 + 2, 4));

        let mut fb = FrameBuffer::new(w, h);
        let cursor = Cursor::default();
        let marks = Marks {
            cursor: &cursor,
            hint: None,
            rejected: None,
        };
        game.draw_board(&mut fb, 0, 0, &marks);
        assert_eq!(fb.row_text(0), "C A T X    ✓ CAT");
        assert_eq!(fb.row_text(1), "X X X D      DOG");
    }

    #[test]
    fn describe_names_the_word() {
        let game = tiny();
        let hint = game.hint().unwrap();
        assert_eq!(game.describe(&hint), "CAT from row 1 column 1");
    }
}
