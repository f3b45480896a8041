mod caption;
mod cursor;
mod page;
mod status_bar;

pub use caption::CaptionWidget;
pub use cursor::CursorWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;
