mod app;
mod components;
mod config;
mod fetch;
mod pages;
mod storage;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
