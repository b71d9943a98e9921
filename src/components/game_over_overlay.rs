use crate::model::LostRun;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub last_loss: Option<LostRun>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let Some(loss) = props.last_loss else {
        return html! {};
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); color:#fff; border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:280px; pointer-events:none;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p style="margin:4px 0;">{ format!("Reached wave: {}", loss.wave) }</p>
            <p style="margin:4px 0;">{ format!("Time survived: {}s", loss.elapsed_secs) }</p>
            <p style="margin:12px 0 0 0; font-size:12px; opacity:0.7;">{"Press Start Game to play again."}</p>
        </div>
    }
}
