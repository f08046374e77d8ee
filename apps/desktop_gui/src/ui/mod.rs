//! UI layer: app shell, roll overlay, and theme.

pub mod app;
pub mod overlay;
pub mod theme;

pub use app::HomeBoardApp;
