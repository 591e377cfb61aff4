//! A circular seek control for GTK4: an arc-shaped progress track with a
//! draggable thumb, gradient fill and a numeric label.

pub mod config;
pub mod events;
pub mod geometry;
pub mod gui;
