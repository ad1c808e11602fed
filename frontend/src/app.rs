use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::pages::run::RunPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div id="app">
                <header>
                    <h1>"Nuzlocke Tracker"</h1>
                </header>
                <main>
                    <Routes fallback=|| {
                        view! { <p class="error">"Page not found"</p> }
                    }>
                        <Route path=path!("/") view=RunPage/>
                    </Routes>
                </main>
                <footer>
                    <p>"One encounter per route. Fainted means gone."</p>
                </footer>
            </div>
        </Router>
    }
}
