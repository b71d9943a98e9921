use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub started: bool,
    pub tower_cost: u32,
    pub on_start: Callback<()>,
}

/// Start control. Further presses are ignored by the reducer once running.
#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if props.started { "Running" } else { "Start Game" };
    html! {<div style="margin-top:8px; display:flex; align-items:center; gap:12px;">
        <button id="startButton" onclick={start_cb} disabled={props.started}>{ label }</button>
        <div style="font-size:12px; opacity:0.7;">
            { format!("Click the field to build a tower ({} money). Click a tower to upgrade it.", props.tower_cost) }
        </div>
    </div>}
}
