//! Game picker shown between sessions.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{Viewport, CURSOR_BG, MUTED, TEXT};
use crate::types::{Difficulty, GameKind};

const TITLE: &str = "PUZZLE PARLOR";
const ENTRY_W: u16 = 24;

/// What the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardState<'a> {
    /// Index into [`GameKind::ALL`].
    pub selected: usize,
    pub difficulty: Difficulty,
    /// One line under the list, e.g. the outcome of the last game.
    pub notice: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct DashboardView;

impl DashboardView {
    pub fn render_into(&self, state: &DashboardState<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let black = Rgb::new(0, 0, 0);
        let rows = GameKind::ALL.len() as u16 + 6;
        let top = viewport.height.saturating_sub(rows) / 2;
        let left = viewport.width.saturating_sub(ENTRY_W) / 2;

        fb.put_str_centered(0, viewport.width, top, TITLE, CellStyle::new(TEXT, black).bold());

        for (i, kind) in GameKind::ALL.iter().enumerate() {
            let y = top + 2 + i as u16;
            let line = format!(" {}  {:<w$}", i + 1, kind.title(), w = ENTRY_W as usize - 4);
            let style = if i == state.selected {
                CellStyle::new(TEXT, CURSOR_BG).bold()
            } else {
                CellStyle::new(TEXT, black)
            };
            fb.put_str(left, y, &line, style);
        }

        let footer_y = top + 3 + GameKind::ALL.len() as u16;
        let difficulty = format!("difficulty: {}", state.difficulty.as_str());
        fb.put_str(left, footer_y, &difficulty, CellStyle::new(TEXT, black));
        if let Some(notice) = state.notice {
            fb.put_str(left, footer_y + 1, notice, CellStyle::new(MUTED, black));
        }

        fb.put_str(
            0,
            viewport.height.saturating_sub(1),
            "arrows choose  enter play  f difficulty  q quit",
            CellStyle::new(MUTED, black),
        );
    }

    pub fn render(&self, state: &DashboardState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_game_and_marks_selection() {
        let state = DashboardState {
            selected: 2,
            difficulty: Difficulty::Hard,
            notice: Some("Sudoku solved in 03:10"),
        };
        let fb = DashboardView.render(&state, Viewport::new(40, 20));
        let all: Vec<String> = (0..20).map(|y| fb.row_text(y)).collect();

        for kind in GameKind::ALL {
            assert!(all.iter().any(|row| row.contains(kind.title())), "{kind:?}");
        }
        assert!(all.iter().any(|row| row.contains("difficulty: hard")));
        assert!(all.iter().any(|row| row.contains("solved in 03:10")));

        let top = (20 - 14) / 2;
        let sudoku_row = top + 2 + 2;
        let left = (40 - ENTRY_W) / 2;
        let cell = fb.get(left, sudoku_row).unwrap();
        assert_eq!(cell.style.bg, CURSOR_BG);
    }
}
