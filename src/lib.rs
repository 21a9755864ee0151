//! NOVA - desktop assistant with directive classification and action dispatch

pub mod brain;
pub mod command;
pub mod core;
pub mod session;
pub mod ui;
