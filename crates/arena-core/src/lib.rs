//! Playback and selection controller for the batch arena viewer.

#![no_std]

pub mod app;
pub mod batch;
pub mod batch_input;
pub mod debounce;
pub mod input;
pub mod navigation;
pub mod playback;
pub mod render;
pub mod selection;
pub mod source;
