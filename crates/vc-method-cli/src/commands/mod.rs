pub mod theme;
pub mod venture;
