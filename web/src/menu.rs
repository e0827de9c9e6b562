use crate::utils::parse_tile_count;
use unveil_core::{AnimationTiming, CellCount, GameConfig, PlayerMode};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StartMenuProps {
    pub tiles: CellCount,
    pub on_start: Callback<GameConfig>,
    pub on_clear_memory: Callback<()>,
}

#[function_component]
pub(crate) fn StartMenu(props: &StartMenuProps) -> Html {
    let mode = use_state(PlayerMode::default);
    let tiles = use_state(|| props.tiles.to_string());
    let error = use_state(|| None::<String>);

    let mode_radio = |value: PlayerMode, label: &'static str| {
        let onchange = {
            let mode = mode.clone();
            Callback::from(move |_: Event| mode.set(value))
        };
        let checked = *mode == value;
        html! {
            <label>
                <input type="radio" name="playerMode" {checked} {onchange}/>
                {label}
            </label>
        }
    };

    let oninput = {
        let tiles = tiles.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            tiles.set(input.value());
        })
    };

    let onstart = {
        let on_start = props.on_start.clone();
        let mode = mode.clone();
        let tiles = tiles.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let tile_count = parse_tile_count(&tiles);
            match GameConfig::new(tile_count, *mode, AnimationTiming::default()) {
                Ok(config) => {
                    error.set(None);
                    on_start.emit(config);
                }
                Err(err) => {
                    log::warn!("rejected start menu input: {}", err);
                    error.set(Some(err.to_string()));
                }
            }
        })
    };

    let onclear = {
        let on_clear_memory = props.on_clear_memory.clone();
        Callback::from(move |_: MouseEvent| on_clear_memory.emit(()))
    };

    html! {
        <section id="startMenu">
            <fieldset>
                {mode_radio(PlayerMode::Single, "1 Player")}
                {mode_radio(PlayerMode::Split, "2 Players")}
            </fieldset>
            <label>
                {"Tiles"}
                <input id="gridSizeInput" type="number" min="1" value={(*tiles).clone()} {oninput}/>
            </label>
            if let Some(message) = &*error {
                <p class="error">{message}</p>
            }
            <button id="startGameBtn" onclick={onstart}>{"Start Game"}</button>
            <button id="clearMemoryBtn" onclick={onclear}>{"Clear Memory"}</button>
        </section>
    }
}
