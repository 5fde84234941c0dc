//! This module defines the game map and provides functions for interacting with it.

pub mod builder;
pub mod coords;
pub mod direction;
pub mod parser;
