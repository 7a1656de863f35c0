//! GameView: frames a [`Session`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The chrome (title, side panel, hint bar,
//! footer and win/stuck overlays) is shared; the board itself is drawn by the
//! game's [`BoardView`] impl.

use tui_parlor_engine::{HintState, Session};

use crate::core::Game;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Pos, SessionStatus, ShellAction};

pub const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
pub const CURSOR_BG: Rgb = Rgb::new(90, 90, 140);
pub const MARK_BG: Rgb = Rgb::new(40, 110, 70);
pub const HINT_BG: Rgb = Rgb::new(150, 120, 30);
pub const REJECT_BG: Rgb = Rgb::new(150, 40, 40);
pub const TEXT: Rgb = Rgb::new(220, 220, 220);
pub const MUTED: Rgb = Rgb::new(110, 110, 120);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board cursor plus the first half of a two-step pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub pos: Pos,
    pub marked: Option<Pos>,
}

impl Cursor {
    /// Move one step within `rows` x `cols`, wrapping at the edges.
    pub fn step(&mut self, action: ShellAction, (rows, cols): (u8, u8)) {
        if rows == 0 || cols == 0 {
            return;
        }
        let (r, c) = (self.pos.row.min(rows - 1), self.pos.col.min(cols - 1));
        self.pos = match action {
            ShellAction::Up => Pos::new(wrap(r, -1, rows), c),
            ShellAction::Down => Pos::new(wrap(r, 1, rows), c),
            ShellAction::Left => Pos::new(r, wrap(c, -1, cols)),
            ShellAction::Right => Pos::new(r, wrap(c, 1, cols)),
            _ => Pos::new(r, c),
        };
    }

    /// Keep the cursor inside a board that changed shape.
    pub fn clamp(&mut self, (rows, cols): (u8, u8)) {
        self.pos = Pos::new(
            self.pos.row.min(rows.saturating_sub(1)),
            self.pos.col.min(cols.saturating_sub(1)),
        );
    }
}

/// `at + delta` wrapped into `0..len` (`len` is non-zero).
fn wrap(at: u8, delta: i16, len: u8) -> u8 {
    (at as i16 + delta).rem_euclid(len as i16) as u8
}

/// What the board should highlight this frame.
#[derive(Debug)]
pub struct Marks<'a, M> {
    pub cursor: &'a Cursor,
    pub hint: Option<&'a M>,
    pub rejected: Option<&'a M>,
}

impl<M> Marks<'_, M> {
    /// Background for the cell at `pos`.
    ///
    /// `hinted` and `rejected` say whether the cell is part of the shown hint
    /// or the refused move. The cursor wins over everything else.
    pub fn background(&self, pos: Pos, hinted: bool, rejected: bool) -> Rgb {
        if self.cursor.pos == pos {
            CURSOR_BG
        } else if rejected {
            REJECT_BG
        } else if self.cursor.marked == Some(pos) {
            MARK_BG
        } else if hinted {
            HINT_BG
        } else {
            BOARD_BG
        }
    }
}

/// How a game lays itself out on the terminal.
pub trait BoardView: Game {
    /// Rows and columns the cursor moves over.
    fn extent(&self) -> (u8, u8);

    /// Terminal columns and rows the board occupies.
    fn board_size(&self) -> (u16, u16);

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, Self::Move>);

    /// One-line description of a move for the hint bar.
    fn describe(&self, mv: &Self::Move) -> String;

    /// Game-specific keys for the footer.
    fn help(&self) -> &'static str;
}

/// Renders any session through its [`BoardView`].
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into<G: BoardView>(
        &self,
        session: &Session<G>,
        cursor: &Cursor,
        subtitle: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let game = session.game();
        let (board_w, board_h) = game.board_size();
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + 4) / 2 + 1,
            AnchorY::Top => 1,
        };

        let title = CellStyle::new(TEXT, Rgb::new(0, 0, 0)).bold();
        fb.put_str(start_x, start_y.saturating_sub(1), G::KIND.title(), title);
        let title_len = G::KIND.title().chars().count() as u16;
        fb.put_str(
            start_x + title_len + 2,
            start_y.saturating_sub(1),
            subtitle,
            CellStyle::new(MUTED, Rgb::new(0, 0, 0)),
        );

        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', CellStyle::new(TEXT, BOARD_BG));
        fb.draw_box(start_x, start_y, frame_w, frame_h, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        let hint = match session.hint() {
            HintState::Showing(mv) => Some(mv),
            _ => None,
        };
        let marks = Marks {
            cursor,
            hint,
            rejected: session.rejected(),
        };
        game.draw_board(fb, start_x + 1, start_y + 1, &marks);

        self.draw_side_panel(fb, session, viewport, start_x + frame_w + 2, start_y);

        let bar_y = start_y + frame_h;
        let message = match (session.hint(), session.rejected()) {
            (_, Some(_)) => Some(("Not a legal move".to_string(), REJECT_BG)),
            (HintState::Showing(mv), _) => Some((format!("Hint: {}", game.describe(mv)), HINT_BG)),
            (HintState::NoMoves, _) => Some(("No moves available".to_string(), REJECT_BG)),
            (HintState::None, None) => None,
        };
        if let Some((text, bg)) = message {
            fb.put_str(start_x, bar_y, &text, CellStyle::new(TEXT, bg).bold());
        }

        let footer = CellStyle::new(MUTED, Rgb::new(0, 0, 0));
        fb.put_str(0, viewport.height.saturating_sub(2), game.help(), footer);
        fb.put_str(
            0,
            viewport.height.saturating_sub(1),
            "arrows/hjkl move  enter select  x cancel  ? hint  n new  f difficulty  esc back  q quit",
            footer,
        );

        if game.is_won() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, " SOLVED! ");
        } else if session.is_stuck() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, " NO MOVES LEFT ");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<G: BoardView>(
        &self,
        session: &Session<G>,
        cursor: &Cursor,
        subtitle: &str,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, cursor, subtitle, viewport, &mut fb);
        fb
    }

    fn draw_side_panel<G: BoardView>(
        &self,
        fb: &mut FrameBuffer,
        session: &Session<G>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }
        let label = CellStyle::new(TEXT, Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let game = session.game();

        let mut y = start_y;
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x, y + 1, game.moves(), value);
        y += 3;

        if let Some(score) = game.score() {
            fb.put_str(panel_x, y, "SCORE", label);
            fb.put_u32(panel_x, y + 1, score, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "TIME", label);
        fb.put_str(panel_x, y + 1, &format_clock(session.elapsed_ms()), value);
        y += 3;

        fb.put_str(panel_x, y, "STATUS", label);
        let status = match session.status() {
            SessionStatus::Resolving => "busy",
            SessionStatus::Idle => "idle",
            SessionStatus::AwaitingInput if game.is_won() => "won",
            SessionStatus::AwaitingInput => "play",
        };
        fb.put_str(panel_x, y + 1, status, value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str_centered(start_x, frame_w, start_y.saturating_add(frame_h / 2), text, style);
    }
}

const SIDE_PANEL_W: u16 = 12;

/// `mm:ss`, hours folded into minutes.
pub fn format_clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_around_the_board() {
        let mut c = Cursor::default();
        c.step(ShellAction::Up, (3, 4));
        assert_eq!(c.pos, Pos::new(2, 0));
        c.step(ShellAction::Left, (3, 4));
        assert_eq!(c.pos, Pos::new(2, 3));
        c.step(ShellAction::Right, (3, 4));
        assert_eq!(c.pos, Pos::new(2, 0));
        c.step(ShellAction::Down, (3, 4));
        assert_eq!(c.pos, Pos::new(0, 0));
    }

    #[test]
    fn cursor_wraps_on_the_largest_boards() {
        let extent = (u8::MAX, 200);
        let mut c = Cursor::default();
        c.step(ShellAction::Up, extent);
        assert_eq!(c.pos, Pos::new(254, 0));
        c.step(ShellAction::Down, extent);
        assert_eq!(c.pos, Pos::new(0, 0));
        c.step(ShellAction::Left, extent);
        assert_eq!(c.pos, Pos::new(0, 199));
        c.step(ShellAction::Right, extent);
        assert_eq!(c.pos, Pos::new(0, 0));

        c.pos = Pos::new(254, 150);
        c.step(ShellAction::Up, extent);
        assert_eq!(c.pos, Pos::new(253, 150));
    }

    #[test]
    fn cursor_clamps_to_a_smaller_board() {
        let mut c = Cursor {
            pos: Pos::new(7, 7),
            marked: None,
        };
        c.clamp((3, 5));
        assert_eq!(c.pos, Pos::new(2, 4));
    }

    #[test]
    fn highlight_priority() {
        let cursor = Cursor {
            pos: Pos::new(0, 0),
            marked: Some(Pos::new(0, 1)),
        };
        let marks: Marks<'_, ()> = Marks {
            cursor: &cursor,
            hint: None,
            rejected: None,
        };
        assert_eq!(marks.background(Pos::new(0, 0), true, true), CURSOR_BG);
        assert_eq!(marks.background(Pos::new(0, 1), true, false), MARK_BG);
        assert_eq!(marks.background(Pos::new(0, 1), false, true), REJECT_BG);
        assert_eq!(marks.background(Pos::new(3, 3), true, false), HINT_BG);
        assert_eq!(marks.background(Pos::new(3, 3), false, false), BOARD_BG);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(61_500), "01:01");
        assert_eq!(format_clock(3_600_000), "60:00");
    }
}
