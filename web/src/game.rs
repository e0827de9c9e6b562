use crate::menu::StartMenu;
use crate::store::LocalUsedImages;
use crate::utils::*;
use gloo::timers::callback::{Interval, Timeout};
use std::collections::BTreeSet;
use unveil_core as game;
use web_sys::{HtmlImageElement, HtmlInputElement};
use yew::prelude::*;

/// Share of the viewport height a picture may take.
const MAX_IMAGE_HEIGHT: f64 = 0.70;

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or(game::GameConfig::DEFAULT_TILE_COUNT)]
    pub tiles: game::CellCount,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start(game::GameConfig),
    ClearMemory,
    ImageLoaded {
        index: usize,
        natural: (u32, u32),
        display: Option<(f64, f64)>,
    },
    Reveal(usize),
    Tick(usize),
    Finish(usize),
    ToggleTeamEdit(usize),
    RenameTeam(usize, String),
    RevealAll,
    ReplaceImages,
    BackToMenu,
}

/// Timers of a running reveal, dropping them stops the walk.
#[derive(Debug)]
struct RunningAnimation {
    _tick: Interval,
    _finish: Timeout,
}

#[derive(Debug, Default)]
struct BoardView {
    highlight: Option<game::CellIndex>,
    display_size: Option<(f64, f64)>,
    editing_team: bool,
    animation: Option<RunningAnimation>,
}

impl BoardView {
    fn stop_animation(&mut self) {
        self.animation = None;
        self.highlight = None;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum CellState {
    Covered,
    Highlighted,
    Revealed,
}

fn cell_state(
    sequencer: &game::RevealSequencer,
    uncovered: &BTreeSet<game::TileId>,
    highlight: Option<game::CellIndex>,
    index: game::CellIndex,
    label: game::TileId,
) -> CellState {
    if sequencer.state().is_complete() || uncovered.contains(&label) {
        CellState::Revealed
    } else if highlight == Some(index) {
        CellState::Highlighted
    } else {
        CellState::Covered
    }
}

/// Labels whose reveal has been announced; the one still animating stays covered.
fn uncovered_labels(sequencer: &game::RevealSequencer) -> BTreeSet<game::TileId> {
    let pending = sequencer.pending_tile();
    sequencer
        .chosen()
        .iter()
        .copied()
        .filter(|&tile| Some(tile) != pending)
        .collect()
}

fn spin_label(instance: &game::GameInstance) -> &'static str {
    match instance.sequencer() {
        None => "Loading...",
        Some(sequencer) if sequencer.is_busy() => "Choosing...",
        Some(sequencer) if sequencer.state().is_complete() => "All Revealed",
        Some(_) => "Show Random Number",
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session<LocalUsedImages>,
    boards: Vec<BoardView>,
}

impl GameView {
    fn start_animation(
        ctx: &Context<Self>,
        index: usize,
        timing: game::AnimationTiming,
    ) -> RunningAnimation {
        let tick = {
            let link = ctx.link().clone();
            Interval::new(timing.tick_interval_ms(), move || {
                link.send_message(Msg::Tick(index))
            })
        };
        let finish = {
            let link = ctx.link().clone();
            Timeout::new(timing.duration_ms(), move || {
                link.send_message(Msg::Finish(index))
            })
        };
        RunningAnimation {
            _tick: tick,
            _finish: finish,
        }
    }

    fn reset_boards(&mut self) {
        self.boards = self
            .session
            .games()
            .iter()
            .map(|_| BoardView::default())
            .collect();
    }

    fn view_cells(&self, instance: &game::GameInstance, board_view: &BoardView) -> Html {
        let (Some(board), Some(sequencer)) = (instance.board(), instance.sequencer()) else {
            return html! {};
        };

        let shape = board.shape();
        let style = format!(
            "display: grid; grid-template-columns: repeat({}, 1fr); grid-template-rows: repeat({}, 1fr);",
            shape.cols, shape.rows
        );
        let uncovered = uncovered_labels(sequencer);

        html! {
            <div class="overlay-grid" {style}>
                {
                    for (0..shape.total_cells() as game::CellIndex).filter_map(|index| {
                        let label = board.label_at_index(index)?;
                        let state = cell_state(sequencer, &uncovered, board_view.highlight, index, label);
                        let class = classes!(
                            "grid-cell",
                            match state {
                                CellState::Covered => None,
                                CellState::Highlighted => Some("highlight"),
                                CellState::Revealed => Some("revealed"),
                            }
                        );
                        Some(html! { <div {class}>{label}</div> })
                    })
                }
            </div>
        }
    }

    fn view_game(&self, ctx: &Context<Self>, index: usize, instance: &game::GameInstance) -> Html {
        let Some(board_view) = self.boards.get(index) else {
            return html! {};
        };

        let editing = board_view.editing_team;
        let on_toggle_edit = ctx.link().callback(move |_: MouseEvent| Msg::ToggleTeamEdit(index));
        let on_rename = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::RenameTeam(index, input.value())
        });

        let onload = ctx.link().callback(move |e: Event| {
            let img: HtmlImageElement = e.target_unchecked_into();
            let natural = (img.natural_width(), img.natural_height());
            let max_width = img
                .parent_element()
                .and_then(|container| container.parent_element())
                .map_or(f64::INFINITY, |wrapper| f64::from(wrapper.client_width()));
            let aspect_ratio = f64::from(natural.0) / f64::from(natural.1);
            let max_height = viewport_height() * MAX_IMAGE_HEIGHT;
            let display = fit_within(aspect_ratio, max_width, max_height);
            Msg::ImageLoaded {
                index,
                natural,
                display,
            }
        });
        let img_style = board_view
            .display_size
            .map(|(width, height)| format!("width: {}px; height: {}px;", width, height));

        let on_reveal = ctx.link().callback(move |_: MouseEvent| Msg::Reveal(index));

        html! {
            <div class="game-instance">
                <div class="teams-wrapper">
                    <input
                        type="text"
                        class="team-name-input"
                        value={instance.team_name().to_string()}
                        readonly={!editing}
                        oninput={on_rename}
                    />
                    <button class="edit-team-btn" onclick={on_toggle_edit}>
                        {if editing { "Save" } else { "Edit" }}
                    </button>
                </div>
                <div class="image-wrapper">
                    <div class="image-container">
                        <img
                            src={image_url(instance.image_id())}
                            alt="Main Image"
                            class="game-image"
                            style={img_style}
                            {onload}
                        />
                    </div>
                    {self.view_cells(instance, board_view)}
                </div>
                <div class="image-name">{format!("[{}]", instance.image_id())}</div>
                <button class="spin-btn" disabled={!instance.can_reveal()} onclick={on_reveal}>
                    {spin_label(instance)}
                </button>
                <div class="chosen-list">
                    <h6>{"Chosen:"}</h6>
                    <div class="chosen-numbers-display">
                        {format_chosen(&uncovered_chosen(instance))}
                    </div>
                </div>
            </div>
        }
    }
}

/// Chosen labels in reveal order, leaving out the one still animating.
fn uncovered_chosen(instance: &game::GameInstance) -> Vec<game::TileId> {
    let pending = instance.sequencer().and_then(game::RevealSequencer::pending_tile);
    instance
        .chosen()
        .iter()
        .copied()
        .filter(|&tile| Some(tile) != pending)
        .collect()
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            session: game::Session::new(
                game::ImageCatalog::builtin(),
                LocalUsedImages::load(),
                seed,
            ),
            boards: Vec::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start(config) => {
                self.session.start(config);
                self.reset_boards();
                true
            }
            ClearMemory => {
                self.session.clear_memory();
                gloo::dialogs::alert("Memory Cleared! All photos are available again.");
                false
            }
            ImageLoaded {
                index,
                natural: (width, height),
                display,
            } => {
                match self.session.image_loaded(index, width, height) {
                    Ok(board) => log::debug!("board {} ready: {:?}", index, board.shape()),
                    Err(err) => log::error!("board {} could not be laid out: {}", index, err),
                }
                if let Some(board_view) = self.boards.get_mut(index) {
                    board_view.display_size = display;
                }
                true
            }
            Reveal(index) => match self.session.reveal_next(index) {
                Ok(Some(animation)) => {
                    log::debug!("board {} walks {} cells", index, animation.path.len());
                    let running = Self::start_animation(ctx, index, animation.timing);
                    if let Some(board_view) = self.boards.get_mut(index) {
                        board_view.animation = Some(running);
                    }
                    true
                }
                Ok(None) => false,
                Err(err) => {
                    log::error!("reveal failed: {}", err);
                    false
                }
            },
            Tick(index) => match self.session.tick(index) {
                Ok(Some(step)) => {
                    if let Some(board_view) = self.boards.get_mut(index) {
                        board_view.highlight = Some(step.current);
                    }
                    true
                }
                _ => false,
            },
            Finish(index) => {
                if let Some(board_view) = self.boards.get_mut(index) {
                    board_view.stop_animation();
                }
                match self.session.finish_reveal(index) {
                    Ok(Some(report)) => {
                        log::info!("board {} revealed {}", index, report.tile);
                        if report.complete {
                            log::info!("board {} is fully revealed", index);
                        }
                    }
                    Ok(None) => {}
                    Err(err) => log::error!("finishing reveal failed: {}", err),
                }
                true
            }
            ToggleTeamEdit(index) => {
                if let Some(board_view) = self.boards.get_mut(index) {
                    board_view.editing_team = !board_view.editing_team;
                }
                true
            }
            RenameTeam(index, name) => {
                if let Err(err) = self.session.rename_team(index, name) {
                    log::error!("rename failed: {}", err);
                }
                false
            }
            RevealAll => {
                self.session.reveal_all();
                self.boards.iter_mut().for_each(BoardView::stop_animation);
                true
            }
            ReplaceImages => {
                self.session.replace_images();
                for (board_view, instance) in self.boards.iter_mut().zip(self.session.games()) {
                    board_view.stop_animation();
                    if instance.is_loading() {
                        board_view.display_size = None;
                    }
                }
                true
            }
            BackToMenu => {
                self.session.back_to_menu();
                self.boards.clear();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let games = self.session.games();
        if games.is_empty() {
            let on_start = ctx.link().callback(Start);
            let on_clear_memory = ctx.link().callback(|_| ClearMemory);
            return html! {
                <StartMenu tiles={ctx.props().tiles} {on_start} {on_clear_memory}/>
            };
        }

        let split = games.len() > 1;
        let on_back = ctx.link().callback(|_: MouseEvent| BackToMenu);
        let on_replace = ctx.link().callback(|_: MouseEvent| ReplaceImages);
        let on_reveal_all = ctx.link().callback(|_: MouseEvent| RevealAll);

        html! {
            <div id="gameContainer" class={classes!("main-container", split.then_some("wide-mode"))}>
                <nav>
                    <button id="backToMenuBtn" onclick={on_back}>{"Back to Menu"}</button>
                    <button id="replaceImageBtn" onclick={on_replace}>{"Replace Image"}</button>
                    <button id="revealAllBtn" onclick={on_reveal_all}>{"Reveal All"}</button>
                </nav>
                <div id="gameArea" class={classes!(split.then_some("split-screen"))}>
                    {
                        for games.iter().enumerate().map(|(index, instance)| {
                            self.view_game(ctx, index, instance)
                        })
                    }
                </div>
            </div>
        }
    }
}
