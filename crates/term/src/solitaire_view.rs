//! Klondike table layout.
//!
//! The cursor moves over two rows of spots: stock, waste and the four
//! foundations on top (column 2 is a gap), the seven tableau columns below.

use crate::core::solitaire::{Card, CardColor, Solitaire, SolitaireMove, FOUNDATIONS, TABLEAU_COLUMNS};
use crate::core::Game;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, MUTED, TEXT};
use crate::types::Pos;

pub const STOCK: Pos = Pos::new(0, 0);
pub const WASTE: Pos = Pos::new(0, 1);
const FIRST_FOUNDATION_COL: u8 = 3;

const PILE_W: u16 = 5;
const STRIDE: u16 = PILE_W + 1;

const RED: Rgb = Rgb::new(230, 90, 90);
const BLACK: Rgb = Rgb::new(230, 230, 230);

pub fn foundation_spot(i: usize) -> Pos {
    Pos::new(0, FIRST_FOUNDATION_COL + i as u8)
}

pub fn tableau_spot(i: usize) -> Pos {
    Pos::new(1, i as u8)
}

/// Foundation index shown at `pos`, if any.
pub fn foundation_at(pos: Pos) -> Option<usize> {
    let i = pos.col.checked_sub(FIRST_FOUNDATION_COL)? as usize;
    (pos.row == 0 && i < FOUNDATIONS).then_some(i)
}

/// Tableau column shown at `pos`, if any.
pub fn tableau_at(pos: Pos) -> Option<usize> {
    (pos.row == 1 && (pos.col as usize) < TABLEAU_COLUMNS).then_some(pos.col as usize)
}

/// Spots a move touches, source first.
fn move_spots(mv: &SolitaireMove) -> Vec<Pos> {
    match *mv {
        SolitaireMove::Draw => vec![STOCK],
        SolitaireMove::WasteToFoundation { foundation } => vec![WASTE, foundation_spot(foundation)],
        SolitaireMove::WasteToTableau { to } => vec![WASTE, tableau_spot(to)],
        SolitaireMove::TableauToFoundation { from, foundation } => {
            vec![tableau_spot(from), foundation_spot(foundation)]
        }
        SolitaireMove::TableauToTableau { from, to, .. } => vec![tableau_spot(from), tableau_spot(to)],
        SolitaireMove::Undo => Vec::new(),
    }
}

fn card_text(card: &Card) -> String {
    if card.face_up {
        format!("[{:>3}]", card.label())
    } else {
        "[###]".to_string()
    }
}

fn card_fg(card: &Card) -> Rgb {
    match (card.face_up, card.color()) {
        (false, _) => MUTED,
        (true, CardColor::Red) => RED,
        (true, CardColor::Black) => BLACK,
    }
}

impl BoardView for Solitaire {
    fn extent(&self) -> (u8, u8) {
        (2, TABLEAU_COLUMNS as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        let tallest = (0..TABLEAU_COLUMNS)
            .map(|i| self.column(i).len())
            .max()
            .unwrap_or(0)
            .max(7);
        (STRIDE * TABLEAU_COLUMNS as u16 - 1, 3 + tallest as u16)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, SolitaireMove>) {
        let hinted = marks.hint.map(move_spots).unwrap_or_default();
        let rejected = marks.rejected.map(move_spots).unwrap_or_default();
        let bg = |pos: Pos| marks.background(pos, hinted.contains(&pos), rejected.contains(&pos));
        let empty = |pos: Pos, text: &str, fb: &mut FrameBuffer| {
            let px = x + pos.col as u16 * STRIDE;
            let py = y + pos.row as u16 * 2;
            fb.put_str(px, py, text, CellStyle::new(MUTED, bg(pos)).dim());
        };

        // Stock and waste.
        if self.stock().is_empty() {
            empty(STOCK, "[ ↺ ]", fb);
        } else {
            fb.put_str(x, y, "[###]", CellStyle::new(MUTED, bg(STOCK)));
        }
        match self.waste_top() {
            Some(card) => fb.put_str(
                x + STRIDE,
                y,
                &card_text(card),
                CellStyle::new(card_fg(card), bg(WASTE)).bold(),
            ),
            None => empty(WASTE, "[   ]", fb),
        }

        for f in 0..FOUNDATIONS {
            let spot = foundation_spot(f);
            match self.foundation(f).last() {
                Some(card) => fb.put_str(
                    x + spot.col as u16 * STRIDE,
                    y,
                    &card_text(card),
                    CellStyle::new(card_fg(card), bg(spot)).bold(),
                ),
                None => empty(spot, "[ - ]", fb),
            }
        }

        for col in 0..TABLEAU_COLUMNS {
            let spot = tableau_spot(col);
            let cards = self.column(col);
            if cards.is_empty() {
                empty(spot, "[   ]", fb);
                continue;
            }
            let px = x + col as u16 * STRIDE;
            let top = cards.len() - 1;
            for (i, card) in cards.iter().enumerate() {
                // Highlight the movable run, or the top card.
                let lit = card.face_up || i == top;
                let back = if lit { bg(spot) } else { crate::game_view::BOARD_BG };
                fb.put_str(
                    px,
                    y + 2 + i as u16,
                    &card_text(card),
                    CellStyle::new(card_fg(card), back),
                );
            }
        }

        let info = format!("stock {}  draw {}", self.stock().len(), self.draw_count().count());
        let (_, h) = self.board_size();
        fb.put_str(x, y + h - 1, &info, CellStyle::new(TEXT, crate::game_view::BOARD_BG).dim());
    }

    fn describe(&self, mv: &SolitaireMove) -> String {
        let waste = self.waste_top().map(Card::label).unwrap_or_default();
        match *mv {
            SolitaireMove::Draw if self.stock().is_empty() => "turn the waste over".to_string(),
            SolitaireMove::Draw => "draw from the stock".to_string(),
            SolitaireMove::WasteToFoundation { .. } => format!("{waste} from the waste to a foundation"),
            SolitaireMove::WasteToTableau { to } => format!("{waste} from the waste to column {}", to + 1),
            SolitaireMove::TableauToFoundation { from, .. } => {
                let card = self.column(from).last().map(Card::label).unwrap_or_default();
                format!("{card} from column {} to a foundation", from + 1)
            }
            SolitaireMove::TableauToTableau { from, index, to } => {
                let card = self.column(from).get(index).map(Card::label).unwrap_or_default();
                format!("{card} from column {} to column {}", from + 1, to + 1)
            }
            SolitaireMove::Undo => "undo".to_string(),
        }
    }

    fn help(&self) -> &'static str {
        "select a pile then its target  d draw  u undo"
    }
}
