//! Terminal rendering for the vowel grid.
//!
//! A small framebuffer pipeline instead of a widget toolkit: [`GridView`]
//! draws a [`core::QuizSnapshot`] into a [`FrameBuffer`], and
//! [`TerminalRenderer`] diffs and flushes frames to the terminal.
//!
//! Cells are drawn several columns wide so that paired IPA labels fit side by
//! side.

pub mod fb;
pub mod grid_view;
pub mod renderer;

pub use vowel_grid_core as core;
pub use vowel_grid_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use grid_view::{AnchorY, GridView, HostStatus, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
