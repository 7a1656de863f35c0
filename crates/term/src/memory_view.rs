//! Memory Match card table.

use crate::core::memory::{Flip, MemoryCard, MemoryMatch};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, MUTED};
use crate::types::Pos;

const CARD_W: u16 = 5;
const STRIDE: u16 = CARD_W + 1;

/// Single-width faces, indexed like the symbol table.
const FACES: [char; 8] = ['♥', '¤', '★', '☾', '♣', '♪', '☼', '♦'];
const FACE_FG: Rgb = Rgb::new(250, 210, 120);
const BACK_FG: Rgb = Rgb::new(140, 160, 230);

/// Cards per row for a table of `cards`.
pub fn columns(cards: usize) -> usize {
    if cards > 6 {
        4
    } else {
        3
    }
}

/// Card under the cursor, if the spot holds one.
pub fn card_at(game: &MemoryMatch, pos: Pos) -> Option<usize> {
    let cols = columns(game.cards().len());
    let index = pos.row as usize * cols + pos.col as usize;
    ((pos.col as usize) < cols && index < game.cards().len()).then_some(index)
}

fn spot(index: usize, cols: usize) -> Pos {
    Pos::new((index / cols) as u8, (index % cols) as u8)
}

fn face(card: &MemoryCard) -> char {
    FACES[card.symbol as usize % FACES.len()]
}

impl BoardView for MemoryMatch {
    fn extent(&self) -> (u8, u8) {
        let cols = columns(self.cards().len());
        (self.cards().len().div_ceil(cols) as u8, cols as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        let (rows, cols) = BoardView::extent(self);
        (cols as u16 * STRIDE - 1, (rows as u16 * 2).saturating_sub(1))
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, Flip>) {
        let cols = columns(self.cards().len());
        for (i, card) in self.cards().iter().enumerate() {
            let pos = spot(i, cols);
            let bg = marks.background(
                pos,
                marks.hint.is_some_and(|f| f.index == i),
                marks.rejected.is_some_and(|f| f.index == i),
            );
            let px = x + pos.col as u16 * STRIDE;
            let py = y + pos.row as u16 * 2;
            let text = if card.face_up || card.matched {
                format!("[ {} ]", face(card))
            } else {
                "[ ? ]".to_string()
            };
            let style = match (card.matched, card.face_up) {
                (true, _) => CellStyle::new(MUTED, bg).dim(),
                (false, true) => CellStyle::new(FACE_FG, bg).bold(),
                (false, false) => CellStyle::new(BACK_FG, bg),
            };
            fb.put_str(px, py, &text, style);
        }
    }

    fn describe(&self, mv: &Flip) -> String {
        let pos = spot(mv.index, columns(self.cards().len()));
        format!("card at row {} column {}", pos.row + 1, pos.col + 1)
    }

    fn help(&self) -> &'static str {
        "turn two cards to find a pair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;
    use crate::game_view::Cursor;

    #[test]
    fn small_tables_use_three_columns() {
        let game = MemoryMatch::from_symbols(&[0, 2, 0, 1, 2, 1]);
        assert_eq!(BoardView::extent(&game), (2, 3));
        assert_eq!(game.board_size(), (17, 3));
        assert_eq!(card_at(&game, Pos::new(1, 2)), Some(5));

        let big = MemoryMatch::from_symbols(&[0, 0, 1, 1, 2, 2, 3, 3]);
        assert_eq!(BoardView::extent(&big), (2, 4));
        assert_eq!(card_at(&big, Pos::new(0, 3)), Some(3));
    }

    #[test]
    fn spots_past_the_last_card_are_empty() {
        let game = MemoryMatch::from_symbols(&[0, 0, 1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(BoardView::extent(&game), (3, 4));
        assert_eq!(card_at(&game, Pos::new(2, 1)), Some(9));
        assert_eq!(card_at(&game, Pos::new(2, 2)), None);
    }

    #[test]
    fn flipped_cards_show_their_face() {
        let mut game = MemoryMatch::from_symbols(&[0, 2, 0, 1, 2, 1]);
        assert!(game.apply(&Flip { index: 1 }));
        let mut fb = FrameBuffer::new(17, 3);
        let cursor = Cursor::default();
        let marks = Marks {
            cursor: &cursor,
            hint: None,
            rejected: None,
        };
        game.draw_board(&mut fb, 0, 0, &marks);
        assert_eq!(fb.row_text(0), "[ ? ] [ ★ ] [ ? ]");
        assert_eq!(fb.row_text(2), "[ ? ] [ ? ] [ ? ]");
    }
}
