#![allow(clippy::new_without_default)]

pub mod catalog;
pub mod error;
pub mod photo;
pub mod loader;
pub mod nav;
pub mod screen;
pub mod view;
