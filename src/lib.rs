pub mod config;
pub mod context;
pub mod render;
pub mod shell_exec;
pub mod styling;
pub mod widgets;

pub use config::Settings;
pub use context::RenderContext;
pub use render::render_lines;
pub use widgets::{Widget, WidgetRegistry};
