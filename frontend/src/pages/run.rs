//! Run controller: owns the per-run signals, wires the top controls, and
//! orchestrates fetch → filter/search → render → metadata.
//!
//! Fetches are sequenced events-first so the timeline appears before the
//! metadata panels. A monotonically increasing request token guards against
//! a slow response for a previously selected run overwriting a newer one.

use std::collections::BTreeSet;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;

use nuzlog_types::timeline::{group_episodes, last_episode};
use nuzlog_types::{DEFAULT_RUN_ID, Event, RunMeta, RunRef, filter, permalink};

use crate::components::meta_panel::MetaPanel;
use crate::components::timeline::{TimelineView, apply_permalink, jump_to_episode};
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::{fetch, storage};

const TYPE_FILTERS: &[(&str, &str)] = &[
    ("all", "All types"),
    ("caught", "Caught"),
    ("fainted", "Fainted"),
    ("evolved", "Evolved"),
    ("badge", "Badges"),
    ("end", "Run end"),
];

fn current_location() -> (String, String) {
    match web_sys::window().map(|w| w.location()) {
        Some(loc) => (
            loc.hash().unwrap_or_default(),
            loc.search().unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    }
}

/// Initial run precedence: `run` query param (if known) > default id >
/// first run in the index.
fn initial_run(list: &[RunRef]) -> Option<String> {
    let (hash, search) = current_location();
    permalink::run_param(&hash, &search)
        .filter(|id| list.iter().any(|r| r.id == *id))
        .map(String::from)
        .or_else(|| {
            list.iter()
                .any(|r| r.id == DEFAULT_RUN_ID)
                .then(|| DEFAULT_RUN_ID.to_string())
        })
        .or_else(|| list.first().map(|r| r.id.clone()))
}

#[component]
pub fn RunPage() -> impl IntoView {
    let runs: RwSignal<Vec<RunRef>> = RwSignal::new(Vec::new());
    let selected = RwSignal::new(String::new());
    let type_filter = RwSignal::new("all".to_string());
    let search_input = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let events: RwSignal<Option<Vec<Event>>> = RwSignal::new(None);
    let meta: RwSignal<Option<RunMeta>> = RwSignal::new(None);
    let collapsed: RwSignal<BTreeSet<u32>> = RwSignal::new(BTreeSet::new());
    let show_rules = RwSignal::new(false);

    let fetch_seq = StoredValue::new(0u64);
    let debounce = StoredValue::new_local(None::<Timeout>);

    // Load the run index once; pick the initial run from the URL.
    spawn_local(async move {
        let list = fetch::load_runs_list().await;
        let initial = initial_run(&list);
        runs.set(list);
        if let Some(id) = initial {
            selected.set(id);
        }
    });

    // Refetch on run change, events before metadata; stale responses are
    // dropped by the token check.
    Effect::new(move |_| {
        let run_id = selected.get();
        if run_id.is_empty() {
            return;
        }
        let token = {
            fetch_seq.update_value(|v| *v += 1);
            fetch_seq.get_value()
        };
        spawn_local(async move {
            let evs = fetch::fetch_run_events(&run_id).await;
            if fetch_seq.get_value() != token {
                return;
            }
            let sections = group_episodes(&evs);
            let last = last_episode(&sections);
            collapsed.set(storage::collapse_store().load_or_seed(&run_id, last));
            events.set(Some(evs));
            apply_permalink(&run_id, collapsed);

            let m = fetch::fetch_run_meta(&run_id).await;
            if fetch_seq.get_value() != token {
                return;
            }
            meta.set(m);
        });
    });

    // Re-resolve the permalink when the hash changes in place (e.g. the
    // permalink button, or back/forward between episode anchors).
    let location = use_location();
    Effect::new(move |_| {
        location.hash.track();
        if events.with(|e| e.is_some()) {
            apply_permalink(&selected.get_untracked(), collapsed);
        }
    });

    let sections = Memo::new(move |_| {
        let evs = events.get().unwrap_or_default();
        let kind = type_filter.get();
        let filtered = filter::apply(&evs, Some(kind.as_str()), &search.get());
        group_episodes(&filtered)
    });

    let set_all = move |collapse: bool| {
        let run_id = selected.get_untracked();
        if run_id.is_empty() {
            return;
        }
        let episodes: Vec<u32> = sections.get_untracked().iter().map(|s| s.episode).collect();
        collapsed.set(storage::collapse_store().set_all(&run_id, &episodes, collapse));
    };

    let on_search = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        debounce.update_value(|slot| {
            if let Some(timer) = slot.take() {
                timer.cancel();
            }
            *slot = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                search.set(value);
            }));
        });
    };

    view! {
        <div class="run-page">
            <div class="controls">
                <select
                    class="run-select"
                    on:change=move |ev| selected.set(event_target_value(&ev))
                    prop:value=move || selected.get()
                >
                    {move || {
                        runs.get()
                            .iter()
                            .map(|run| {
                                view! {
                                    <option value=run.id.clone()>
                                        {run.display_title().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>

                <select
                    class="type-filter"
                    on:change=move |ev| type_filter.set(event_target_value(&ev))
                >
                    {TYPE_FILTERS
                        .iter()
                        .map(|(value, label)| {
                            view! { <option value=*value>{*label}</option> }
                        })
                        .collect_view()}
                </select>

                <input
                    type="search"
                    placeholder="Search species, nicknames, notes\u{2026}"
                    prop:value=search_input
                    on:input=on_search
                />

                <button on:click=move |_| set_all(false)>"Expand all"</button>
                <button on:click=move |_| set_all(true)>"Collapse all"</button>

                <select
                    class="episode-jump"
                    on:change=move |ev| {
                        if let Ok(episode) = event_target_value(&ev).parse::<u32>() {
                            jump_to_episode(&selected.get_untracked(), episode, collapsed);
                        }
                    }
                >
                    <option value="">"Jump to episode\u{2026}"</option>
                    {move || {
                        sections
                            .get()
                            .iter()
                            .map(|section| {
                                let ep = section.episode;
                                view! {
                                    <option value=ep.to_string()>
                                        {format!("Episode {ep}")}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            {move || meta.get().map(|m| view! { <MetaPanel meta=m show_rules=show_rules/> })}

            {move || match events.get() {
                None => view! { <p class="loading">"Loading\u{2026}"</p> }.into_any(),
                Some(_) => {
                    view! {
                        <TimelineView
                            run_id=Signal::from(selected)
                            sections=Signal::from(sections)
                            collapsed=collapsed
                        />
                    }
                        .into_any()
                }
            }}

            <button
                class="back-to-top"
                title="Back to top"
                on:click=move |_| {
                    if let Some(win) = web_sys::window() {
                        win.scroll_to_with_x_and_y(0.0, 0.0);
                    }
                }
            >
                "\u{2191}"
            </button>
        </div>
    }
}
