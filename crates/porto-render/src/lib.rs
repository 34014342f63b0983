#![forbid(unsafe_code)]

//! Render kernel: styles, cells, buffers, frames, diffing, presentation.
//!
//! The pipeline per frame: widgets write styled cells into a [`buffer::Buffer`]
//! owned by a [`frame::Frame`]; [`diff::BufferDiff`] computes the changed runs
//! against the previously presented buffer; [`presenter::Presenter`] emits the
//! minimal terminal command stream for those runs.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;
pub mod style;
pub mod text;
