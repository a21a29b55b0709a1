//! Terminal user interface
//!
//! Renders the controllers' view models with ratatui and maps key presses to
//! controller commands.

pub mod app;
pub mod components;
pub mod events;
pub mod layout;
pub mod renderer;

pub use app::App;
pub use events::handle_events;
pub use layout::LayoutManager;
pub use renderer::{render_ui, run_app};
