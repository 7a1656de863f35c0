//! Klondike solitaire.
//!
//! Zones follow the usual table: a face-down stock, the waste it is drawn
//! into, four foundations built up by suit from the ace, and seven tableau
//! columns built down in alternating colours. Every pile keeps its top card at
//! the end of its `Vec`.
//!
//! Only the top card of a foundation or tableau column is consulted when
//! checking a placement. A face-up tail of a tableau column may move as a
//! unit; the card uncovered by a tableau move is turned face up.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::GameKind;

pub const TABLEAU_COLUMNS: usize = 7;
pub const FOUNDATIONS: usize = 4;
pub const DECK_SIZE: usize = 52;
pub const KING: u8 = 13;
pub const ACE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn color(&self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Spades | Suit::Clubs => CardColor::Black,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// 1 (ace) through 13 (king)
    pub rank: u8,
    pub suit: Suit,
    pub face_up: bool,
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    pub fn turned_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn color(&self) -> CardColor {
        self.suit.color()
    }

    pub fn rank_str(&self) -> &'static str {
        const RANKS: [&str; 13] = [
            "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
        ];
        RANKS
            .get(self.rank.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }

    /// Short face label such as `10♥`.
    pub fn label(&self) -> String {
        format!("{}{}", self.rank_str(), self.suit.symbol())
    }
}

/// Ordered 52-card deck, spades first, ace to king within a suit.
pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (ACE..=KING).map(move |rank| Card::new(rank, suit)))
        .collect()
}

/// Can `card` go onto the foundation whose top is `top`?
pub fn can_stack_on_foundation(card: &Card, top: Option<&Card>) -> bool {
    match top {
        None => card.rank == ACE,
        Some(top) => card.suit == top.suit && card.rank == top.rank + 1,
    }
}

/// Can `card` go onto the tableau column whose top is `top`?
pub fn can_stack_on_tableau(card: &Card, top: Option<&Card>) -> bool {
    match top {
        None => card.rank == KING,
        Some(top) => card.color() != top.color() && card.rank + 1 == top.rank,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawCount {
    #[default]
    One,
    Three,
}

impl DrawCount {
    pub fn count(&self) -> usize {
        match self {
            DrawCount::One => 1,
            DrawCount::Three => 3,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1" | "one" => Some(DrawCount::One),
            "3" | "three" => Some(DrawCount::Three),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolitaireConfig {
    pub seed: u32,
    pub draw: DrawCount,
}

impl GameConfig for SolitaireConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolitaireMove {
    /// Turn stock cards onto the waste, or recycle the waste when the stock is empty.
    Draw,
    WasteToFoundation { foundation: usize },
    WasteToTableau { to: usize },
    TableauToFoundation { from: usize, foundation: usize },
    /// Move the run starting at `index` of column `from` onto column `to`.
    TableauToTableau { from: usize, index: usize, to: usize },
    /// Restore the table as it was before the previous move.
    Undo,
}

/// The cards on the table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATIONS],
    pub tableau: [Vec<Card>; TABLEAU_COLUMNS],
    pub moves: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solitaire {
    table: Table,
    draw: DrawCount,
    #[serde(skip)]
    history: Vec<Table>,
}

impl Solitaire {
    /// Deal a shuffled deck.
    pub fn deal(config: &SolitaireConfig) -> Self {
        let mut deck = full_deck();
        SimpleRng::new(config.seed).shuffle(&mut deck);
        Self::from_deck(deck, config.draw)
    }

    /// Deal `deck` in order: column `i` takes the next `i + 1` cards with only
    /// the last face up, and the rest becomes the stock.
    ///
    /// The stock is drawn from the front of the remaining deck.
    pub fn from_deck(deck: Vec<Card>, draw: DrawCount) -> Self {
        let mut cards = deck.into_iter();
        let mut table = Table::default();
        for (col, column) in table.tableau.iter_mut().enumerate() {
            for row in 0..=col {
                if let Some(mut card) = cards.next() {
                    card.face_up = row == col;
                    column.push(card);
                }
            }
        }
        let mut stock: Vec<Card> = cards
            .map(|mut c| {
                c.face_up = false;
                c
            })
            .collect();
        stock.reverse();
        table.stock = stock;

        Self {
            table,
            draw,
            history: Vec::new(),
        }
    }

    /// Build a game from explicit piles (tests, puzzles).
    pub fn from_table(table: Table, draw: DrawCount) -> Self {
        Self {
            table,
            draw,
            history: Vec::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn stock(&self) -> &[Card] {
        &self.table.stock
    }

    pub fn waste(&self) -> &[Card] {
        &self.table.waste
    }

    pub fn foundation(&self, i: usize) -> &[Card] {
        self.table.foundations.get(i).map_or(&[], |f| f.as_slice())
    }

    pub fn column(&self, i: usize) -> &[Card] {
        self.table.tableau.get(i).map_or(&[], |c| c.as_slice())
    }

    pub fn draw_count(&self) -> DrawCount {
        self.draw
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn waste_top(&self) -> Option<&Card> {
        self.table.waste.last()
    }

    fn foundation_accepts(&self, card: &Card, foundation: usize) -> bool {
        self.table
            .foundations
            .get(foundation)
            .is_some_and(|f| can_stack_on_foundation(card, f.last()))
    }

    fn tableau_accepts(&self, card: &Card, col: usize) -> bool {
        self.table
            .tableau
            .get(col)
            .is_some_and(|c| can_stack_on_tableau(card, c.last()))
    }

    /// Is `mv` legal on the current table?
    pub fn is_legal(&self, mv: &SolitaireMove) -> bool {
        match *mv {
            SolitaireMove::Draw => !self.table.stock.is_empty() || !self.table.waste.is_empty(),
            SolitaireMove::WasteToFoundation { foundation } => self
                .waste_top()
                .is_some_and(|c| self.foundation_accepts(c, foundation)),
            SolitaireMove::WasteToTableau { to } => {
                self.waste_top().is_some_and(|c| self.tableau_accepts(c, to))
            }
            SolitaireMove::TableauToFoundation { from, foundation } => self
                .column(from)
                .last()
                .is_some_and(|c| c.face_up && self.foundation_accepts(c, foundation)),
            SolitaireMove::TableauToTableau { from, index, to } => {
                if from == to || to >= TABLEAU_COLUMNS {
                    return false;
                }
                let column = self.column(from);
                match column.get(index) {
                    Some(card) => {
                        column[index..].iter().all(|c| c.face_up) && self.tableau_accepts(card, to)
                    }
                    None => false,
                }
            }
            SolitaireMove::Undo => self.can_undo(),
        }
    }

    fn draw_from_stock(&mut self) {
        let table = &mut self.table;
        if table.stock.is_empty() {
            // Recycle: the oldest waste card becomes the next one drawn.
            table.stock = table
                .waste
                .drain(..)
                .rev()
                .map(|mut c| {
                    c.face_up = false;
                    c
                })
                .collect();
            debug!("solitaire: recycled {} cards into the stock", table.stock.len());
            return;
        }

        let n = self.draw.count().min(table.stock.len());
        let mut drawn: Vec<Card> = (0..n).filter_map(|_| table.stock.pop()).collect();
        // The first card turned ends up on top of the waste.
        drawn.reverse();
        table.waste.extend(drawn.into_iter().map(Card::turned_up));
        table.moves += 1;
    }

    /// Turn the new top of a tableau column face up.
    fn reveal_top(&mut self, col: usize) {
        if let Some(top) = self.table.tableau[col].last_mut() {
            top.face_up = true;
        }
    }

    /// Every stock and waste card that could currently be placed somewhere.
    fn reserve_has_playable_card(&self) -> bool {
        self.table
            .stock
            .iter()
            .chain(self.table.waste.iter())
            .any(|card| {
                (0..FOUNDATIONS).any(|f| self.foundation_accepts(card, f))
                    || (0..TABLEAU_COLUMNS).any(|t| self.tableau_accepts(card, t))
            })
    }
}

impl Game for Solitaire {
    type Config = SolitaireConfig;
    type Move = SolitaireMove;

    const KIND: GameKind = GameKind::Solitaire;

    fn new_game(config: &SolitaireConfig) -> Result<Self, GameError> {
        Ok(Self::deal(config))
    }

    fn apply(&mut self, mv: &SolitaireMove) -> bool {
        if !self.is_legal(mv) {
            return false;
        }

        if let SolitaireMove::Undo = mv {
            if let Some(previous) = self.history.pop() {
                self.table = previous;
            }
            return true;
        }

        self.history.push(self.table.clone());

        match *mv {
            SolitaireMove::Draw => {
                self.draw_from_stock();
                return true;
            }
            SolitaireMove::WasteToFoundation { foundation } => {
                if let Some(card) = self.table.waste.pop() {
                    self.table.foundations[foundation].push(card);
                }
            }
            SolitaireMove::WasteToTableau { to } => {
                if let Some(card) = self.table.waste.pop() {
                    self.table.tableau[to].push(card);
                }
            }
            SolitaireMove::TableauToFoundation { from, foundation } => {
                if let Some(card) = self.table.tableau[from].pop() {
                    self.table.foundations[foundation].push(card);
                }
                self.reveal_top(from);
            }
            SolitaireMove::TableauToTableau { from, index, to } => {
                let run = self.table.tableau[from].split_off(index);
                self.table.tableau[to].extend(run);
                self.reveal_top(from);
            }
            SolitaireMove::Undo => {}
        }

        self.table.moves += 1;
        true
    }

    /// Priority: waste to foundation, waste to tableau, a tableau top to a
    /// foundation, then any face-up tableau card to another column.
    fn hint(&self) -> Option<SolitaireMove> {
        if let Some(card) = self.waste_top() {
            if let Some(foundation) = (0..FOUNDATIONS).find(|&f| self.foundation_accepts(card, f)) {
                return Some(SolitaireMove::WasteToFoundation { foundation });
            }
            if let Some(to) = (0..TABLEAU_COLUMNS).find(|&t| self.tableau_accepts(card, t)) {
                return Some(SolitaireMove::WasteToTableau { to });
            }
        }

        for from in 0..TABLEAU_COLUMNS {
            if let Some(card) = self.column(from).last().filter(|c| c.face_up) {
                if let Some(foundation) =
                    (0..FOUNDATIONS).find(|&f| self.foundation_accepts(card, f))
                {
                    return Some(SolitaireMove::TableauToFoundation { from, foundation });
                }
            }
        }

        for from in 0..TABLEAU_COLUMNS {
            for (index, card) in self.column(from).iter().enumerate() {
                if !card.face_up {
                    continue;
                }
                if let Some(to) =
                    (0..TABLEAU_COLUMNS).find(|&t| t != from && self.tableau_accepts(card, t))
                {
                    return Some(SolitaireMove::TableauToTableau { from, index, to });
                }
            }
        }

        None
    }

    fn is_won(&self) -> bool {
        self.table
            .foundations
            .iter()
            .all(|f| f.len() == KING as usize)
    }

    fn is_stuck(&self) -> bool {
        !self.is_won() && self.hint().is_none() && !self.reserve_has_playable_card()
    }

    fn moves(&self) -> u32 {
        self.table.moves
    }
}
