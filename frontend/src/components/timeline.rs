//! Collapsible episode timeline.
//!
//! Renders the grouped sections, keeps the rendered expand/collapse state,
//! the persisted collapse set, and the URL permalink in sync. Every state
//! mutation goes through the [`CollapseStore`] so the three views of the
//! state cannot diverge.

use std::collections::BTreeSet;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use nuzlog_types::{EpisodeSection, EventCard, permalink};

use crate::components::event_card::EventCardView;
use crate::config::{SCROLL_OFFSET_PX, SCROLL_SETTLE_MS};
use crate::storage;

/// Scroll so the section banner sits a fixed offset below the viewport top.
/// No-ops when the anchor element is not rendered.
pub fn scroll_to_episode(episode: u32) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };
    let Some(el) = doc.get_element_by_id(&format!("episode-{episode}")) else {
        return;
    };
    let top = el.get_bounding_client_rect().top();
    let current = win.scroll_y().unwrap_or(0.0);
    let options = web_sys::ScrollToOptions::new();
    options.set_top((top + current - SCROLL_OFFSET_PX).max(0.0));
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

/// Resolve the permalink in the current URL: force the target episode's
/// visibility, persist it, and scroll to it after layout settles.
pub fn apply_permalink(run_id: &str, collapsed: RwSignal<BTreeSet<u32>>) {
    let Some(loc) = web_sys::window().map(|w| w.location()) else {
        return;
    };
    let hash = loc.hash().unwrap_or_default();
    let search = loc.search().unwrap_or_default();
    let Some(target) = permalink::parse(&hash, &search) else {
        return;
    };

    let set = storage::collapse_store().toggle(run_id, target.episode, Some(!target.collapsed));
    collapsed.set(set);

    let episode = target.episode;
    Timeout::new(SCROLL_SETTLE_MS, move || scroll_to_episode(episode)).forget();
}

/// Expand an episode and bring it into view (quick-jump selector).
pub fn jump_to_episode(run_id: &str, episode: u32, collapsed: RwSignal<BTreeSet<u32>>) {
    collapsed.set(storage::collapse_store().toggle(run_id, episode, Some(true)));
    Timeout::new(SCROLL_SETTLE_MS, move || scroll_to_episode(episode)).forget();
}

#[component]
fn EpisodeSectionView(
    run_id: Signal<String>,
    section: EpisodeSection,
    collapsed: RwSignal<BTreeSet<u32>>,
) -> impl IntoView {
    let episode = section.episode;
    let is_collapsed = Memo::new(move |_| collapsed.get().contains(&episode));

    let toggle = move |_| {
        let set = storage::collapse_store().toggle(&run_id.get_untracked(), episode, None);
        collapsed.set(set);
    };

    let set_permalink = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if let Some(loc) = web_sys::window().map(|w| w.location()) {
            let _ = loc.set_hash(&format!("episode-{episode}"));
        }
    };

    let run_end = section.run_end().map(EventCard::from_event);
    let cards: Vec<EventCard> = section
        .events
        .iter()
        .filter(|e| !e.is_run_end())
        .map(EventCard::from_event)
        .collect();

    view! {
        <section class="episode" id=format!("episode-{episode}")>
            <div class="episode-banner" on:click=toggle>
                <span class="episode-title">"Episode " {episode}</span>
                {section.date.clone().map(|d| view! { <span class="episode-date">{d}</span> })}
                <button class="permalink" title="Link to this episode" on:click=set_permalink>
                    "#"
                </button>
                <span class="chevron">
                    {move || if is_collapsed.get() { "\u{25b8}" } else { "\u{25be}" }}
                </span>
            </div>
            <div
                class="episode-contents"
                class:collapsed=move || is_collapsed.get()
                aria-hidden=move || if is_collapsed.get() { "true" } else { "false" }
            >
                {cards
                    .into_iter()
                    .map(|card| view! { <EventCardView card=card/> })
                    .collect_view()}
                {run_end
                    .map(|card| {
                        view! {
                            <div class="run-end-banner">
                                <div class="event-header">{card.header}</div>
                                {card.place_line.map(|p| {
                                    view! {
                                        <div class="event-place">
                                            <span class="label">{p.label}</span>
                                            " "
                                            {p.text}
                                        </div>
                                    }
                                })}
                                {card.notes.map(|n| view! { <div class="event-notes">{n}</div> })}
                            </div>
                        }
                    })}
            </div>
        </section>
    }
}

#[component]
pub fn TimelineView(
    run_id: Signal<String>,
    sections: Signal<Vec<EpisodeSection>>,
    collapsed: RwSignal<BTreeSet<u32>>,
) -> impl IntoView {
    view! {
        <div class="timeline">
            {move || {
                let list = sections.get();
                if list.is_empty() {
                    return view! { <p class="empty">"No events found for this run."</p> }
                        .into_any();
                }
                list.into_iter()
                    .map(|section| {
                        view! {
                            <EpisodeSectionView
                                run_id=run_id
                                section=section
                                collapsed=collapsed
                            />
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
