pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{deleted, dim, error, header, info, menu_item, success, warn};
pub use table::{records_table, RecordRow};
pub use theme::{paint, theme, Theme, Tone};
