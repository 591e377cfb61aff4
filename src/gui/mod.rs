pub mod app;
pub mod seek;
pub mod theme;
