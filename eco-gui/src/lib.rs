//! # eco-gui — Eye contact online
//!
//! Runs the mirror on the desktop: one native Win32 window first marks
//! the screen area to copy, then shows a live, optionally zoomed copy of
//! it. Screen pixels are read with GDI and drawn back with GDI; the
//! capture-scale-render logic itself lives in `eco-core`.

pub mod capture;
pub mod config;
pub mod display;
pub mod input;
pub mod window;
