//! Tab shell feature slice: tab bar, tab content, tab-screen keys.

mod render;
mod update;

pub use render::render_tabs_screen;
pub use update::{TabsAction, handle_tabs_key};
