use crate::sim::tower::Tower;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TowerPanelProps {
    pub tower: Option<Tower>,
    pub max_level: u32,
    pub money: u32,
}

/// Stats of the tower under the cursor and what its next upgrade costs.
#[function_component]
pub fn TowerPanel(props: &TowerPanelProps) -> Html {
    let Some(t) = &props.tower else {
        return html! {};
    };
    let next = if t.level >= props.max_level {
        "Max level".to_string()
    } else if props.money < t.upgrade_cost {
        format!("Upgrade: {} (need {} more)", t.upgrade_cost, t.upgrade_cost - props.money)
    } else {
        format!("Click to upgrade: {}", t.upgrade_cost)
    };
    html! {<div style="position:absolute; right:12px; top:12px; background:rgba(22,27,34,0.92); color:#fff; border:1px solid #30363d; border-radius:10px; padding:8px 12px; display:flex; flex-direction:column; gap:4px; min-width:180px; font-size:12px;">
        <div style="font-weight:600;">{ format!("Tower Lv{}", t.level) }</div>
        <div>{ format!("Range: {:.0}", t.range) }</div>
        <div>{ format!("Fire interval: {:.0} ms", t.fire_interval_ms) }</div>
        <div style="background:#1c2128; border:1px solid #30363d; padding:4px 6px; border-radius:6px;">{ next }</div>
    </div> }
}
