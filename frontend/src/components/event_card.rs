//! Projection of the declarative [`EventCard`] description into views.
//! All display rules (headers, ribbons, fallback labels) are decided in
//! `nuzlog_types::card`; this module only lays them out.

use leptos::prelude::*;
use nuzlog_types::{EventCard, Side, Sprite};

/// One sprite slot. When there is no URL, or the image fails to load, the
/// inline SVG placeholder takes its place; flipping the signal removes the
/// `<img>` from the DOM, so the error handler cannot fire twice.
#[component]
pub fn SpriteView(sprite: Sprite) -> impl IntoView {
    let failed = RwSignal::new(false);
    let Sprite { url, placeholder } = sprite;

    view! {
        {move || {
            match (&url, failed.get()) {
                (Some(url), false) => {
                    let url = url.clone();
                    view! {
                        <img
                            class="sprite"
                            src=url
                            on:error=move |_| failed.set(true)
                        />
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <svg class="sprite placeholder" viewBox="0 0 40 40">
                            <rect x="0" y="0" width="40" height="40" rx="6"></rect>
                            <text x="20" y="25">{placeholder.clone()}</text>
                        </svg>
                    }
                        .into_any()
                }
            }
        }}
    }
}

#[component]
pub fn EventCardView(card: EventCard) -> impl IntoView {
    let side_class = match card.side {
        Side::Left => "event-card side-left",
        Side::Right => "event-card side-right",
    };
    let class = format!("{side_class} kind-{}", card.css_kind);

    let sprites = {
        let mut slots = Vec::new();
        for (i, sprite) in card.sprites.into_iter().enumerate() {
            if i > 0 {
                slots.push(view! { <span class="evo-arrow">"\u{2192}"</span> }.into_any());
            }
            slots.push(view! { <SpriteView sprite=sprite/> }.into_any());
        }
        slots
    };

    view! {
        <div class=class>
            {card.ribbon.map(|text| view! { <span class="ribbon">{text}</span> })}
            <div class="sprites">{sprites}</div>
            <div class="event-body">
                <div class="event-header">{card.header}</div>
                {card.name_line.map(|line| view! { <div class="event-name">{line}</div> })}
                {card.place_line.map(|place| {
                    view! {
                        <div class="event-place">
                            <span class="label">{place.label}</span>
                            " "
                            {match place.video_url {
                                Some(url) => view! {
                                    <a href=url target="_blank" rel="noopener">
                                        {place.text}
                                    </a>
                                }
                                    .into_any(),
                                None => view! { <span>{place.text}</span> }.into_any(),
                            }}
                        </div>
                    }
                })}
                {card.notes.map(|notes| view! { <div class="event-notes">{notes}</div> })}
            </div>
        </div>
    }
}
