pub mod format;
pub mod table;

pub use format::{dollars, percent, thousands, truncate_chars};
pub use table::{framed, render_panel, rounded, titled};
