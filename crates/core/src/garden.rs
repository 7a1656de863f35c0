//! Flower Garden: a relaxed real-time grower.
//!
//! Plots go Empty → Seed → Sprout → Bud → Bloom. Planting starts the clock;
//! each stage waits its entry in [`GARDEN_STAGE_MS`] before moving on. Watering
//! shortens the current wait. Growth happens in [`Game::tick`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::types::{
    GameKind, GARDEN_STAGE_MS, GARDEN_WATER_BOOST_MS, GARDEN_WATER_FLOOR_MS,
};

pub const GARDEN_ROWS: usize = 4;
pub const GARDEN_COLS: usize = 5;
pub const TOTAL_PLOTS: usize = GARDEN_ROWS * GARDEN_COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flower {
    Rose,
    Tulip,
    Sunflower,
    Daisy,
    Cherry,
    Bluebell,
}

impl Flower {
    pub const ALL: [Flower; 6] = [
        Flower::Rose,
        Flower::Tulip,
        Flower::Sunflower,
        Flower::Daisy,
        Flower::Cherry,
        Flower::Bluebell,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Flower::Rose => "Rose",
            Flower::Tulip => "Tulip",
            Flower::Sunflower => "Sunflower",
            Flower::Daisy => "Daisy",
            Flower::Cherry => "Cherry Blossom",
            Flower::Bluebell => "Bluebell",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Flower::Rose => "🌹",
            Flower::Tulip => "🌷",
            Flower::Sunflower => "🌻",
            Flower::Daisy => "🌼",
            Flower::Cherry => "🌸",
            Flower::Bluebell => "💐",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Empty,
    Seed,
    Sprout,
    Bud,
    Bloom,
}

impl Stage {
    fn next(&self) -> Stage {
        match self {
            Stage::Empty => Stage::Empty,
            Stage::Seed => Stage::Sprout,
            Stage::Sprout => Stage::Bud,
            Stage::Bud | Stage::Bloom => Stage::Bloom,
        }
    }

    /// Wait before leaving this stage, for stages that grow.
    fn duration_ms(&self) -> Option<u32> {
        match self {
            Stage::Seed => Some(GARDEN_STAGE_MS[0]),
            Stage::Sprout => Some(GARDEN_STAGE_MS[1]),
            Stage::Bud => Some(GARDEN_STAGE_MS[2]),
            Stage::Empty | Stage::Bloom => None,
        }
    }

    pub fn is_growing(&self) -> bool {
        self.duration_ms().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Plot {
    pub stage: Stage,
    pub flower: Option<Flower>,
    /// Time left in the current stage; zero when not growing.
    pub remaining_ms: u32,
}

impl Plot {
    /// Advance the growth clock, crossing as many stages as `elapsed_ms` covers.
    fn grow(&mut self, mut elapsed_ms: u32) {
        while self.stage.is_growing() && elapsed_ms >= self.remaining_ms {
            elapsed_ms -= self.remaining_ms;
            self.stage = self.stage.next();
            self.remaining_ms = self.stage.duration_ms().unwrap_or(0);
        }
        if self.stage.is_growing() {
            self.remaining_ms -= elapsed_ms;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GardenMove {
    Plant { plot: usize, flower: Flower },
    Water { plot: usize },
    Clear { plot: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GardenConfig {
    pub seed: u32,
}

impl GameConfig for GardenConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowerGarden {
    plots: [Plot; TOTAL_PLOTS],
    moves: u32,
}

impl FlowerGarden {
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, index: usize) -> Option<&Plot> {
        self.plots.get(index)
    }

    pub fn blooming(&self) -> usize {
        self.plots.iter().filter(|p| p.stage == Stage::Bloom).count()
    }

    fn first_where(&self, pred: impl Fn(&Plot) -> bool) -> Option<usize> {
        self.plots.iter().position(pred)
    }
}

impl Game for FlowerGarden {
    type Config = GardenConfig;
    type Move = GardenMove;

    const KIND: GameKind = GameKind::FlowerGarden;

    fn new_game(_config: &GardenConfig) -> Result<Self, GameError> {
        Ok(Self {
            plots: [Plot::default(); TOTAL_PLOTS],
            moves: 0,
        })
    }

    fn apply(&mut self, mv: &GardenMove) -> bool {
        let index = match *mv {
            GardenMove::Plant { plot, .. }
            | GardenMove::Water { plot }
            | GardenMove::Clear { plot } => plot,
        };
        let Some(plot) = self.plots.get_mut(index) else {
            return false;
        };

        match *mv {
            GardenMove::Plant { flower, .. } => {
                if plot.stage != Stage::Empty {
                    return false;
                }
                plot.stage = Stage::Seed;
                plot.flower = Some(flower);
                plot.remaining_ms = GARDEN_STAGE_MS[0];
                debug!("garden: planted {} in plot {index}", flower.name());
            }
            GardenMove::Water { .. } => {
                if !plot.stage.is_growing() {
                    return false;
                }
                plot.remaining_ms = plot
                    .remaining_ms
                    .saturating_sub(GARDEN_WATER_BOOST_MS)
                    .max(GARDEN_WATER_FLOOR_MS);
            }
            GardenMove::Clear { .. } => {
                if plot.stage != Stage::Bloom {
                    return false;
                }
                *plot = Plot::default();
            }
        }
        self.moves += 1;
        true
    }

    /// Plant the first empty plot, else water the first growing one, else
    /// clear the first bloom.
    fn hint(&self) -> Option<GardenMove> {
        if let Some(plot) = self.first_where(|p| p.stage == Stage::Empty) {
            let flower = Flower::ALL[plot % Flower::ALL.len()];
            return Some(GardenMove::Plant { plot, flower });
        }
        if let Some(plot) = self.first_where(|p| p.stage.is_growing()) {
            return Some(GardenMove::Water { plot });
        }
        self.first_where(|p| p.stage == Stage::Bloom)
            .map(|plot| GardenMove::Clear { plot })
    }

    fn is_won(&self) -> bool {
        self.blooming() == TOTAL_PLOTS
    }

    fn is_stuck(&self) -> bool {
        false
    }

    fn moves(&self) -> u32 {
        self.moves
    }

    fn tick(&mut self, elapsed_ms: u32) {
        for plot in &mut self.plots {
            plot.grow(elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> FlowerGarden {
        FlowerGarden::new_game(&GardenConfig::default()).unwrap()
    }

    fn plant(game: &mut FlowerGarden, plot: usize) -> bool {
        game.apply(&GardenMove::Plant {
            plot,
            flower: Flower::Tulip,
        })
    }

    #[test]
    fn new_garden_is_empty() {
        let game = garden();
        assert_eq!(game.plots().len(), 20);
        assert!(game.plots().iter().all(|p| p.stage == Stage::Empty));
        assert!(!game.is_won());
    }

    #[test]
    fn planted_seed_grows_through_each_stage() {
        let mut game = garden();
        assert!(plant(&mut game, 0));
        assert!(!plant(&mut game, 0));
        assert_eq!(game.plot(0).unwrap().remaining_ms, 4000);

        game.tick(3999);
        assert_eq!(game.plot(0).unwrap().stage, Stage::Seed);
        game.tick(1);
        assert_eq!(game.plot(0).unwrap().stage, Stage::Sprout);
        assert_eq!(game.plot(0).unwrap().remaining_ms, 5000);
        game.tick(5000);
        assert_eq!(game.plot(0).unwrap().stage, Stage::Bud);
        game.tick(6000);
        assert_eq!(game.plot(0).unwrap().stage, Stage::Bloom);
        assert_eq!(game.plot(0).unwrap().flower, Some(Flower::Tulip));
        // Empty plots stay empty.
        assert_eq!(game.plot(1).unwrap().stage, Stage::Empty);
    }

    #[test]
    fn large_tick_crosses_several_stages() {
        let mut game = garden();
        plant(&mut game, 3);
        game.tick(4000 + 5000 + 100);
        let plot = game.plot(3).unwrap();
        assert_eq!(plot.stage, Stage::Bud);
        assert_eq!(plot.remaining_ms, 5900);
    }

    #[test]
    fn watering_shortens_the_wait_but_not_below_the_floor() {
        let mut game = garden();
        plant(&mut game, 0);
        assert!(game.apply(&GardenMove::Water { plot: 0 }));
        assert_eq!(game.plot(0).unwrap().remaining_ms, 2000);
        assert!(game.apply(&GardenMove::Water { plot: 0 }));
        assert_eq!(game.plot(0).unwrap().remaining_ms, 300);
        assert!(game.apply(&GardenMove::Water { plot: 0 }));
        assert_eq!(game.plot(0).unwrap().remaining_ms, 300);
        assert!(!game.apply(&GardenMove::Water { plot: 1 }));
    }

    #[test]
    fn only_blooms_can_be_cleared() {
        let mut game = garden();
        plant(&mut game, 0);
        assert!(!game.apply(&GardenMove::Clear { plot: 0 }));
        game.tick(15_000);
        assert!(game.apply(&GardenMove::Clear { plot: 0 }));
        assert_eq!(*game.plot(0).unwrap(), Plot::default());
        assert!(!game.apply(&GardenMove::Clear { plot: 20 }));
    }

    #[test]
    fn hints_grow_the_whole_garden() {
        let mut game = garden();
        for _ in 0..TOTAL_PLOTS {
            let hint = game.hint().unwrap();
            assert!(matches!(hint, GardenMove::Plant { .. }));
            assert!(game.apply(&hint));
        }
        assert_eq!(game.hint(), Some(GardenMove::Water { plot: 0 }));

        game.tick(15_000);
        assert!(game.is_won());
        assert_eq!(game.hint(), Some(GardenMove::Clear { plot: 0 }));

        game.apply(&GardenMove::Clear { plot: 7 });
        assert!(!game.is_won());
    }
}
