use alloc::string::String;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// One board on screen: its picture and, once the picture size is known, its layout and reveal state.
#[derive(Clone, Debug)]
pub struct GameInstance {
    image_id: String,
    team_name: String,
    board: Option<Board>,
    sequencer: Option<RevealSequencer>,
}

impl GameInstance {
    fn new(image_id: String, team_name: String) -> Self {
        Self {
            image_id,
            team_name,
            board: None,
            sequencer: None,
        }
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn sequencer(&self) -> Option<&RevealSequencer> {
        self.sequencer.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.board.is_none()
    }

    pub fn can_reveal(&self) -> bool {
        self.sequencer
            .as_ref()
            .is_some_and(RevealSequencer::can_reveal)
    }

    pub fn chosen(&self) -> &[TileId] {
        self.sequencer
            .as_ref()
            .map(RevealSequencer::chosen)
            .unwrap_or_default()
    }

    fn replace_image(&mut self, image_id: String) {
        self.image_id = image_id;
        self.board = None;
        self.sequencer = None;
    }
}

/// Everything a running party game owns: configuration, the picture catalog, the used-picture store and the boards
/// currently on screen.
#[derive(Debug)]
pub struct Session<S> {
    config: GameConfig,
    catalog: ImageCatalog,
    store: S,
    rng: SmallRng,
    games: Vec<GameInstance>,
}

impl<S: UsedImageStore> Session<S> {
    pub fn new(catalog: ImageCatalog, store: S, seed: u64) -> Self {
        Self {
            config: GameConfig::default(),
            catalog,
            store,
            rng: SmallRng::seed_from_u64(seed),
            games: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn games(&self) -> &[GameInstance] {
        &self.games
    }

    pub fn game(&self, index: usize) -> Result<&GameInstance> {
        self.games.get(index).ok_or(GameError::UnknownGame(index))
    }

    fn game_mut(&mut self, index: usize) -> Result<&mut GameInstance> {
        self.games.get_mut(index).ok_or(GameError::UnknownGame(index))
    }

    /// Replaces whatever was running with fresh boards, one per player, each waiting for its picture to load.
    pub fn start(&mut self, config: GameConfig) -> &[GameInstance] {
        self.config = config;
        let used = self.store.read();
        self.games = config
            .player_mode
            .team_names()
            .iter()
            .map(|&team| {
                let image_id = self.catalog.choose(&used, &mut self.rng).into();
                GameInstance::new(image_id, team.into())
            })
            .collect();
        log::debug!(
            "started {:?} game with {} tiles",
            config.player_mode,
            config.tile_count
        );
        &self.games
    }

    /// Lays out the board of `index` once its picture reports its natural size.
    pub fn image_loaded(&mut self, index: usize, width: u32, height: u32) -> Result<&Board> {
        let tile_count = self.config.tile_count;
        let timing = self.config.timing;
        let label_seed = self.rng.random::<u64>();
        let reveal_seed = self.rng.random::<u64>();

        let game = self.game_mut(index)?;
        let image = ImageInfo::new(game.image_id.clone(), width, height);
        let shape = GridShape::solve(tile_count, image.aspect_ratio()?)?;
        let board = RandomLabelGenerator::new(label_seed).generate(shape)?;
        let sequencer = RevealSequencer::new(&board, timing, reveal_seed)?;
        log::debug!(
            "image {} ({}x{}) gets a {}x{} board",
            image.id,
            width,
            height,
            shape.rows,
            shape.cols
        );

        game.sequencer = Some(sequencer);
        Ok(&*game.board.insert(board))
    }

    pub fn rename_team(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.game_mut(index)?.team_name = name.into();
        Ok(())
    }

    pub fn reveal_next(&mut self, index: usize) -> Result<Option<RevealAnimation>> {
        Ok(self
            .game_mut(index)?
            .sequencer
            .as_mut()
            .and_then(RevealSequencer::reveal_next))
    }

    pub fn tick(&mut self, index: usize) -> Result<Option<HighlightStep>> {
        Ok(self
            .game_mut(index)?
            .sequencer
            .as_mut()
            .and_then(RevealSequencer::tick))
    }

    /// Completes the running animation of `index`; a finished picture is remembered as used.
    pub fn finish_reveal(&mut self, index: usize) -> Result<Option<RevealReport>> {
        let game = self.game_mut(index)?;
        let report = game
            .sequencer
            .as_mut()
            .and_then(RevealSequencer::finish_reveal);

        if let Some(RevealReport { complete: true, .. }) = report {
            let image_id = game.image_id.clone();
            self.store.add(&image_id);
        }
        Ok(report)
    }

    /// Uncovers every board at once, returning the labels forced open per game.
    ///
    /// Pictures finished this way are not remembered as used.
    pub fn reveal_all(&mut self) -> Vec<Vec<TileId>> {
        self.games
            .iter_mut()
            .map(|game| {
                game.sequencer
                    .as_mut()
                    .map(RevealSequencer::reveal_all)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Puts a different picture under every board, dropping their layouts until the pictures load.
    ///
    /// With a single-picture catalog the board is kept and only its reveal starts over.
    pub fn replace_images(&mut self) {
        let used = self.store.read();
        for game in &mut self.games {
            match self.catalog.choose_other(&used, &game.image_id, &mut self.rng) {
                Some(image_id) => game.replace_image(image_id.into()),
                None => {
                    let seed = self.rng.random();
                    game.sequencer = match &game.board {
                        Some(board) => RevealSequencer::new(board, self.config.timing, seed).ok(),
                        None => None,
                    };
                    log::debug!("no other image for '{}', restarting reveal", game.image_id);
                }
            }
        }
    }

    pub fn back_to_menu(&mut self) {
        self.games.clear();
    }

    pub fn clear_memory(&mut self) {
        self.store.clear();
        log::info!("used image memory cleared");
    }
}
