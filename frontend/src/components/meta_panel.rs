//! Run metadata panels: player/rival cards, run-ended banner, rules list.

use leptos::prelude::*;
use nuzlog_types::{RunMeta, Sprite, Trainer, assets};

use crate::components::event_card::SpriteView;

fn trainer_sprite(trainer: &Trainer) -> Option<Sprite> {
    let species = trainer.species.as_deref()?;
    Some(Sprite {
        url: assets::sprite_url(species),
        placeholder: assets::placeholder_label(species),
    })
}

#[component]
fn TrainerCard(trainer: Trainer, role: &'static str) -> impl IntoView {
    let sprite = trainer_sprite(&trainer);
    view! {
        <div class="trainer-card">
            {sprite.map(|sprite| view! { <SpriteView sprite=sprite/> })}
            <div class="trainer-text">
                <span class="trainer-role">{role}</span>
                <span class="trainer-name">{trainer.name}</span>
                {trainer
                    .subtitle
                    .map(|s| view! { <span class="trainer-subtitle">{s}</span> })}
            </div>
        </div>
    }
}

#[component]
pub fn MetaPanel(meta: RunMeta, show_rules: RwSignal<bool>) -> impl IntoView {
    let ended = meta.ended.map(|e| {
        let mut text = String::from("Run ended");
        if let Some(ep) = e.episode {
            text.push_str(&format!(" in episode {ep}"));
        }
        if let Some(date) = &e.date {
            text.push_str(&format!(" \u{2014} {date}"));
        }
        (text, e.note)
    });
    let rules = meta.rules;

    view! {
        <div class="meta-panel">
            <div class="trainer-row">
                {meta.player.map(|t| view! { <TrainerCard trainer=t role="Player"/> })}
                {meta.rival.map(|t| view! { <TrainerCard trainer=t role="Rival"/> })}
            </div>
            {ended
                .map(|(text, note)| {
                    view! {
                        <div class="ended-banner">
                            <span>{text}</span>
                            {note.map(|n| view! { <span class="ended-note">{n}</span> })}
                        </div>
                    }
                })}
            {(!rules.is_empty())
                .then(|| {
                    view! {
                        <div class="rules">
                            <button
                                class="rules-toggle"
                                on:click=move |_| show_rules.update(|v| *v = !*v)
                            >
                                {move || if show_rules.get() { "Hide rules" } else { "Show rules" }}
                            </button>
                            <ul class="rules-list" class:hidden=move || !show_rules.get()>
                                {rules
                                    .iter()
                                    .map(|rule| view! { <li>{rule.clone()}</li> })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                })}
        </div>
    }
}
