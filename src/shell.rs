//! The dashboard and the game screen.
//!
//! [`Shell`] owns at most one live game. Leaving a game tears its session
//! down so nothing queued on it can fire once it is off screen. Key handling
//! is split in two: [`Play::handle`] deals with what every game shares
//! (cursor, hints, shuffle, cancel) and each game's [`Controls`] impl turns
//! the rest into moves.

use log::{debug, info};

use crate::config::ShellConfig;
use crate::core::garden::{Stage, TOTAL_PLOTS};
use crate::core::{
    BubblePop, Flip, Flower, FlowerGarden, Game, GameConfig, GameError, GardenMove, Jigsaw,
    JigsawMove, Mahjongg, MahjonggMove, MemoryMatch, Selection, SimpleRng, Solitaire,
    SolitaireMove, Sudoku, SudokuMove, Swap, WordSearch,
};
use crate::core::solitaire::{DECK_SIZE, FOUNDATIONS};
use crate::engine::Session;
use crate::term::garden_view::plot_index;
use crate::term::jigsaw_view::{spot_at, Spot};
use crate::term::memory_view::card_at;
use crate::term::solitaire_view::{foundation_at, tableau_at, STOCK, WASTE};
use crate::term::{
    BoardView, Cursor, DashboardState, DashboardView, FrameBuffer, GameView, Viewport,
};
use crate::types::{Difficulty, GameKind, Orientation, Pos, ShellAction};

/// A session plus the cursor over its board.
#[derive(Debug)]
pub struct Play<G: Game> {
    pub session: Session<G>,
    pub cursor: Cursor,
}

impl<G: Controls> Play<G> {
    pub fn new(config: G::Config) -> Result<Self, GameError> {
        Ok(Self {
            session: Session::new(config)?,
            cursor: Cursor::default(),
        })
    }

    pub fn handle(&mut self, action: ShellAction) {
        match action {
            ShellAction::Up | ShellAction::Down | ShellAction::Left | ShellAction::Right => {
                self.cursor.step(action, BoardView::extent(self.session.game()));
            }
            ShellAction::Hint => {
                self.cursor.marked = None;
                self.session.request_hint();
            }
            ShellAction::Shuffle => {
                if self.session.refresh() {
                    self.cursor.marked = None;
                }
            }
            ShellAction::Cancel if self.cursor.marked.is_some() => self.cursor.marked = None,
            _ => G::press(self, action),
        }
        self.cursor.clamp(BoardView::extent(self.session.game()));
    }

    fn restart(&mut self) -> Result<(), GameError> {
        self.session.restart()?;
        self.cursor = Cursor::default();
        Ok(())
    }

    fn subtitle(&self) -> String {
        let config = self.session.config();
        let mut parts = Vec::new();
        if let Some(difficulty) = G::difficulty(config) {
            parts.push(difficulty.as_str().to_string());
        }
        parts.push(format!("seed {}", config.seed()));
        let progress = self.session.game().progress();
        if !progress.is_empty() {
            parts.push(progress);
        }
        parts.join("  ")
    }

    /// One line for the dashboard after leaving the game.
    fn summary(&self) -> String {
        let game = self.session.game();
        let title = G::KIND.title();
        if game.is_won() {
            format!(
                "{title} solved in {} ({} moves)",
                crate::term::game_view::format_clock(self.session.elapsed_ms()),
                game.moves()
            )
        } else {
            format!("{title} left after {} moves", game.moves())
        }
    }
}

/// Game-specific keys.
pub trait Controls: BoardView {
    /// Turn `action` at the cursor into a move.
    fn press(play: &mut Play<Self>, action: ShellAction);

    /// Short progress note for the title line.
    fn progress(&self) -> String;

    fn difficulty(_config: &Self::Config) -> Option<Difficulty> {
        None
    }
}

/// Second pick of a two-step selection: `Some(first)` once both are known.
fn pick(cursor: &mut Cursor) -> Option<Pos> {
    match cursor.marked.take() {
        None => {
            cursor.marked = Some(cursor.pos);
            None
        }
        Some(first) if first == cursor.pos => None,
        Some(first) => Some(first),
    }
}

impl Controls for Solitaire {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        let mv = match action {
            ShellAction::Draw => Some(SolitaireMove::Draw),
            ShellAction::Undo => Some(SolitaireMove::Undo),
            ShellAction::Select => {
                let pos = play.cursor.pos;
                let game = play.session.game();
                match play.cursor.marked.take() {
                    None if pos == STOCK => Some(SolitaireMove::Draw),
                    None => {
                        let has_card = if pos == WASTE {
                            game.waste_top().is_some()
                        } else {
                            tableau_at(pos).is_some_and(|c| !game.column(c).is_empty())
                        };
                        if has_card {
                            play.cursor.marked = Some(pos);
                        }
                        None
                    }
                    // Selecting a pile twice sends its top card home.
                    Some(from) if from == pos => send_home(game, from),
                    Some(from) => solitaire_move(game, from, pos),
                }
            }
            _ => None,
        };
        if let Some(mv) = mv {
            play.session.attempt(&mv);
        }
    }

    fn progress(&self) -> String {
        let home: usize = (0..FOUNDATIONS).map(|f| self.foundation(f).len()).sum();
        format!("home {home}/{DECK_SIZE}")
    }
}

fn send_home(game: &Solitaire, from: Pos) -> Option<SolitaireMove> {
    (0..FOUNDATIONS)
        .filter_map(|foundation| {
            if from == WASTE {
                Some(SolitaireMove::WasteToFoundation { foundation })
            } else {
                tableau_at(from).map(|from| SolitaireMove::TableauToFoundation { from, foundation })
            }
        })
        .find(|mv| game.is_legal(mv))
}

/// Move from spot `from` to spot `to`.
///
/// Tableau to tableau picks the first face-up card whose run may move, or
/// the top of the face-up run so the refusal is shown.
fn solitaire_move(game: &Solitaire, from: Pos, to: Pos) -> Option<SolitaireMove> {
    if let Some(foundation) = foundation_at(to) {
        if from == WASTE {
            return Some(SolitaireMove::WasteToFoundation { foundation });
        }
        return tableau_at(from).map(|from| SolitaireMove::TableauToFoundation { from, foundation });
    }
    let to = tableau_at(to)?;
    if from == WASTE {
        return Some(SolitaireMove::WasteToTableau { to });
    }
    let from = tableau_at(from)?;
    let column = game.column(from);
    let first_up = column.iter().position(|c| c.face_up)?;
    let index = (first_up..column.len())
        .find(|&index| game.is_legal(&SolitaireMove::TableauToTableau { from, index, to }))
        .unwrap_or(first_up);
    Some(SolitaireMove::TableauToTableau { from, index, to })
}

impl Controls for Mahjongg {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        if action != ShellAction::Select {
            return;
        }
        let game = play.session.game();
        let pos = play.cursor.pos;
        let Some(second) = game.top_tile(pos.col, pos.row) else {
            return;
        };
        let Some(first) = pick(&mut play.cursor).and_then(|m| game.top_tile(m.col, m.row)) else {
            return;
        };
        play.session.attempt(&MahjonggMove { first, second });
    }

    fn progress(&self) -> String {
        format!("tiles {}", self.remaining())
    }

    fn difficulty(config: &Self::Config) -> Option<Difficulty> {
        Some(config.difficulty)
    }
}

impl Controls for Sudoku {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        let pos = play.cursor.pos;
        let mv = match action {
            ShellAction::Digit(digit) => SudokuMove::Set { pos, digit },
            ShellAction::Erase => SudokuMove::Clear { pos },
            _ => return,
        };
        play.session.attempt(&mv);
    }

    fn progress(&self) -> String {
        format!("empty {}", self.empty_cells().len())
    }

    fn difficulty(config: &Self::Config) -> Option<Difficulty> {
        Some(config.difficulty)
    }
}

impl Controls for WordSearch {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        if action != ShellAction::Select {
            return;
        }
        let end = play.cursor.pos;
        if let Some(start) = pick(&mut play.cursor) {
            play.session.attempt(&Selection { start, end });
        }
    }

    fn progress(&self) -> String {
        format!("found {}/{}", self.found().len(), self.words().len())
    }
}

impl Controls for MemoryMatch {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        if action != ShellAction::Select {
            return;
        }
        if let Some(index) = card_at(play.session.game(), play.cursor.pos) {
            play.session.attempt(&Flip { index });
        }
    }

    fn progress(&self) -> String {
        format!("pairs {}/{}", self.matched_pairs(), self.pairs())
    }
}

impl Controls for Jigsaw {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        if action != ShellAction::Select {
            return;
        }
        let game = play.session.game();
        let pos = play.cursor.pos;
        let here = spot_at(game, pos);
        let occupied = |spot: Spot| match spot {
            Spot::Slot(s) => game.slots().get(s).copied().flatten().is_some(),
            Spot::Tray(_) => true,
            Spot::Empty => false,
        };
        let tray_piece = |i: usize| game.tray().get(i).copied();

        let mv = match play.cursor.marked.take().map(|m| spot_at(game, m)) {
            None | Some(Spot::Tray(_)) if matches!(here, Spot::Tray(_)) => {
                play.cursor.marked = Some(pos);
                None
            }
            None => {
                if occupied(here) {
                    play.cursor.marked = Some(pos);
                }
                None
            }
            Some(Spot::Tray(i)) => match here {
                Spot::Slot(slot) => tray_piece(i).map(|piece| JigsawMove::Place { piece, slot }),
                _ => None,
            },
            Some(Spot::Slot(from)) => match here {
                Spot::Slot(to) if to != from => Some(JigsawMove::Shift { from, to }),
                Spot::Tray(i) => tray_piece(i).map(|piece| JigsawMove::Exchange { slot: from, piece }),
                _ => None,
            },
            Some(Spot::Empty) => None,
        };
        if let Some(mv) = mv {
            play.session.attempt(&mv);
        }
    }

    fn progress(&self) -> String {
        format!("placed {}/{}", self.correct(), self.slots().len())
    }

    fn difficulty(config: &Self::Config) -> Option<Difficulty> {
        Some(config.difficulty)
    }
}

impl Controls for BubblePop {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        if action != ShellAction::Select {
            return;
        }
        let b = play.cursor.pos;
        match pick(&mut play.cursor) {
            Some(a) if a.is_adjacent(b) => {
                play.session.attempt(&Swap { a, b });
            }
            // Not a neighbour: start over from here.
            Some(_) => play.cursor.marked = Some(b),
            None => {}
        }
    }

    fn progress(&self) -> String {
        match self.popping() {
            Some(matches) => format!("pop {}", matches.count()),
            None => String::new(),
        }
    }
}

impl Controls for FlowerGarden {
    fn press(play: &mut Play<Self>, action: ShellAction) {
        let plot = plot_index(play.cursor.pos);
        let Some(stage) = play.session.game().plot(plot).map(|p| p.stage) else {
            return;
        };
        let mv = match action {
            ShellAction::Digit(d @ 1..=6) => GardenMove::Plant {
                plot,
                flower: Flower::ALL[d as usize - 1],
            },
            ShellAction::Select => match stage {
                Stage::Empty => GardenMove::Plant {
                    plot,
                    flower: Flower::ALL[plot % Flower::ALL.len()],
                },
                Stage::Bloom => GardenMove::Clear { plot },
                Stage::Seed | Stage::Sprout | Stage::Bud => GardenMove::Water { plot },
            },
            _ => return,
        };
        play.session.attempt(&mv);
    }

    fn progress(&self) -> String {
        format!("blooming {}/{TOTAL_PLOTS}", self.blooming())
    }
}

/// The game on screen.
#[derive(Debug)]
pub enum ActiveGame {
    Solitaire(Play<Solitaire>),
    Mahjongg(Play<Mahjongg>),
    Sudoku(Play<Sudoku>),
    WordSearch(Play<WordSearch>),
    MemoryMatch(Play<MemoryMatch>),
    Jigsaw(Play<Jigsaw>),
    BubblePop(Play<BubblePop>),
    FlowerGarden(Play<FlowerGarden>),
}

macro_rules! each_game {
    ($game:expr, $play:ident => $body:expr) => {
        match $game {
            ActiveGame::Solitaire($play) => $body,
            ActiveGame::Mahjongg($play) => $body,
            ActiveGame::Sudoku($play) => $body,
            ActiveGame::WordSearch($play) => $body,
            ActiveGame::MemoryMatch($play) => $body,
            ActiveGame::Jigsaw($play) => $body,
            ActiveGame::BubblePop($play) => $body,
            ActiveGame::FlowerGarden($play) => $body,
        }
    };
}

impl ActiveGame {
    pub fn open(kind: GameKind, config: &ShellConfig, seed: u32) -> Result<Self, GameError> {
        Ok(match kind {
            GameKind::Solitaire => ActiveGame::Solitaire(Play::new(config.solitaire(seed))?),
            GameKind::Mahjongg => ActiveGame::Mahjongg(Play::new(config.mahjongg(seed))?),
            GameKind::Sudoku => ActiveGame::Sudoku(Play::new(config.sudoku(seed))?),
            GameKind::WordSearch => ActiveGame::WordSearch(Play::new(config.word_search(seed))?),
            GameKind::MemoryMatch => ActiveGame::MemoryMatch(Play::new(config.memory(seed))?),
            GameKind::Jigsaw => ActiveGame::Jigsaw(Play::new(config.jigsaw(seed))?),
            GameKind::BubblePop => ActiveGame::BubblePop(Play::new(config.bubble_pop(seed))?),
            GameKind::FlowerGarden => ActiveGame::FlowerGarden(Play::new(config.garden(seed))?),
        })
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Solitaire(_) => GameKind::Solitaire,
            ActiveGame::Mahjongg(_) => GameKind::Mahjongg,
            ActiveGame::Sudoku(_) => GameKind::Sudoku,
            ActiveGame::WordSearch(_) => GameKind::WordSearch,
            ActiveGame::MemoryMatch(_) => GameKind::MemoryMatch,
            ActiveGame::Jigsaw(_) => GameKind::Jigsaw,
            ActiveGame::BubblePop(_) => GameKind::BubblePop,
            ActiveGame::FlowerGarden(_) => GameKind::FlowerGarden,
        }
    }

    pub fn handle(&mut self, action: ShellAction) {
        each_game!(self, play => play.handle(action))
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        each_game!(self, play => play.session.tick(elapsed_ms))
    }

    pub fn restart(&mut self) -> Result<(), GameError> {
        each_game!(self, play => play.restart())
    }

    pub fn teardown(&mut self) {
        each_game!(self, play => play.session.teardown())
    }

    pub fn is_won(&self) -> bool {
        each_game!(self, play => play.session.is_won())
    }

    pub fn summary(&self) -> String {
        each_game!(self, play => play.summary())
    }

    pub fn render_into(&self, view: &GameView, viewport: Viewport, fb: &mut FrameBuffer) {
        each_game!(self, play => {
            view.render_into(&play.session, &play.cursor, &play.subtitle(), viewport, fb)
        })
    }
}

#[derive(Debug)]
pub enum Screen {
    Dashboard,
    Playing(ActiveGame),
}

/// Everything on screen, driven by [`ShellAction`]s and the tick.
pub struct Shell {
    config: ShellConfig,
    next_seed: u32,
    selected: usize,
    notice: Option<String>,
    screen: Screen,
    game_view: GameView,
    dashboard: DashboardView,
}

impl Shell {
    /// Start on the dashboard, or straight in `config.game`.
    pub fn new(config: ShellConfig) -> Result<Self, GameError> {
        let mut shell = Self {
            next_seed: config.seed_or_random(),
            config,
            selected: 0,
            notice: None,
            screen: Screen::Dashboard,
            game_view: GameView::default(),
            dashboard: DashboardView,
        };
        if let Some(kind) = shell.config.game {
            shell.open(kind)?;
        }
        Ok(shell)
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        match &self.screen {
            Screen::Playing(game) => Some(game),
            Screen::Dashboard => None,
        }
    }

    /// Dashboard entry under the cursor, as an index into [`GameKind::ALL`].
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Mahjongg picks its layout from the terminal width (eight pixels per column).
    pub fn set_terminal_width(&mut self, cols: u16) {
        self.config.orientation = Orientation::for_width(cols.saturating_mul(8));
    }

    pub fn handle(&mut self, action: ShellAction) -> Result<(), GameError> {
        if matches!(self.screen, Screen::Dashboard) {
            return self.handle_dashboard(action);
        }
        let Screen::Playing(game) = &mut self.screen else {
            return Ok(());
        };
        match action {
            ShellAction::Back => self.close(),
            ShellAction::NewGame => {
                game.restart()?;
                debug!("{}: new deal", game.kind().as_str());
            }
            ShellAction::Difficulty => {
                let kind = game.kind();
                self.config.difficulty = self.config.difficulty.next();
                self.open(kind)?;
            }
            _ => game.handle(action),
        }
        Ok(())
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Screen::Playing(game) = &mut self.screen {
            game.tick(elapsed_ms);
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.screen {
            Screen::Dashboard => {
                let state = DashboardState {
                    selected: self.selected,
                    difficulty: self.config.difficulty,
                    notice: self.notice.as_deref(),
                };
                self.dashboard.render_into(&state, viewport, fb);
            }
            Screen::Playing(game) => game.render_into(&self.game_view, viewport, fb),
        }
    }

    fn handle_dashboard(&mut self, action: ShellAction) -> Result<(), GameError> {
        let count = GameKind::ALL.len();
        match action {
            ShellAction::Up | ShellAction::Left => self.selected = (self.selected + count - 1) % count,
            ShellAction::Down | ShellAction::Right => self.selected = (self.selected + 1) % count,
            ShellAction::Difficulty => self.config.difficulty = self.config.difficulty.next(),
            ShellAction::Digit(d) if (1..=count).contains(&(d as usize)) => {
                self.selected = d as usize - 1;
                self.open(GameKind::ALL[self.selected])?;
            }
            ShellAction::Select | ShellAction::NewGame => self.open(GameKind::ALL[self.selected])?,
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, kind: GameKind) -> Result<(), GameError> {
        self.close();
        let seed = self.next_seed;
        self.next_seed = SimpleRng::new(seed).next_u32();
        let game = ActiveGame::open(kind, &self.config, seed)?;
        info!("opening {} with seed {seed}", kind.as_str());
        if let Some(i) = GameKind::ALL.iter().position(|k| *k == kind) {
            self.selected = i;
        }
        self.notice = None;
        self.screen = Screen::Playing(game);
        Ok(())
    }

    fn close(&mut self) {
        if let Screen::Playing(mut game) = std::mem::replace(&mut self.screen, Screen::Dashboard) {
            game.teardown();
            self.notice = Some(game.summary());
            debug!("closed {}", game.kind().as_str());
        }
    }
}
