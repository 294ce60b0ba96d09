pub mod items;
pub mod logging;
