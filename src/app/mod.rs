mod state;
mod ui;

pub use state::{App, DashboardState, ViewMode};
pub use ui::draw_ui;
