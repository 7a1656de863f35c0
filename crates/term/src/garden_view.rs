//! Flower Garden plots.

use crate::core::garden::{Flower, FlowerGarden, GardenMove, Plot, Stage, GARDEN_COLS, GARDEN_ROWS};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{BoardView, Marks, MUTED};
use crate::types::Pos;

const PLOT_W: u16 = 5;

const SOIL_FG: Rgb = Rgb::new(170, 130, 90);
const LEAF_FG: Rgb = Rgb::new(110, 200, 110);

/// Letter and colour a flower shows in bloom.
pub fn flower_mark(flower: Flower) -> (char, Rgb) {
    match flower {
        Flower::Rose => ('R', Rgb::new(235, 70, 90)),
        Flower::Tulip => ('T', Rgb::new(245, 130, 190)),
        Flower::Sunflower => ('S', Rgb::new(250, 210, 60)),
        Flower::Daisy => ('D', Rgb::new(245, 245, 245)),
        Flower::Cherry => ('C', Rgb::new(250, 180, 210)),
        Flower::Bluebell => ('B', Rgb::new(110, 140, 250)),
    }
}

pub fn plot_pos(index: usize) -> Pos {
    Pos::new((index / GARDEN_COLS) as u8, (index % GARDEN_COLS) as u8)
}

pub fn plot_index(pos: Pos) -> usize {
    pos.row as usize * GARDEN_COLS + pos.col as usize
}

fn plot_mark(plot: &Plot) -> (char, Rgb) {
    match (plot.stage, plot.flower) {
        (Stage::Bloom, Some(flower)) => flower_mark(flower),
        (Stage::Empty, _) => ('·', MUTED),
        (Stage::Seed, _) => ('.', SOIL_FG),
        (Stage::Sprout, _) => (',', LEAF_FG),
        (Stage::Bud, _) | (Stage::Bloom, None) => ('o', LEAF_FG),
    }
}

fn move_plot(mv: &GardenMove) -> usize {
    match *mv {
        GardenMove::Plant { plot, .. } | GardenMove::Water { plot } | GardenMove::Clear { plot } => plot,
    }
}

impl BoardView for FlowerGarden {
    fn extent(&self) -> (u8, u8) {
        (GARDEN_ROWS as u8, GARDEN_COLS as u8)
    }

    fn board_size(&self) -> (u16, u16) {
        (GARDEN_COLS as u16 * PLOT_W, GARDEN_ROWS as u16 * 2 - 1)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, marks: &Marks<'_, GardenMove>) {
        let hinted = marks.hint.map(move_plot);
        let rejected = marks.rejected.map(move_plot);
        for (i, plot) in self.plots().iter().enumerate() {
            let pos = plot_pos(i);
            let bg = marks.background(pos, hinted == Some(i), rejected == Some(i));
            let (ch, fg) = plot_mark(plot);
            let mut style = CellStyle::new(fg, bg);
            if plot.stage == Stage::Bloom {
                style = style.bold();
            }
            let px = x + pos.col as u16 * PLOT_W;
            let py = y + pos.row as u16 * 2;
            fb.put_str(px, py, " [", CellStyle::new(SOIL_FG, bg));
            fb.put_char(px + 2, py, ch, style);
            fb.put_str(px + 3, py, "] ", CellStyle::new(SOIL_FG, bg));
        }
    }

    fn describe(&self, mv: &GardenMove) -> String {
        let pos = plot_pos(move_plot(mv));
        let at = format!("row {} column {}", pos.row + 1, pos.col + 1);
        match *mv {
            GardenMove::Plant { flower, .. } => format!("plant a {} at {at}", flower.name()),
            GardenMove::Water { .. } => format!("water {at}"),
            GardenMove::Clear { .. } => format!("pick the bloom at {at}"),
        }
    }

    fn help(&self) -> &'static str {
        "enter plant, water or pick  1-6 plant a chosen flower"
    }
}
