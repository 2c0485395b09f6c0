//! Conway's Game of Life on a toroidal board.
//!
//! [`Board`] is the whole engine: create it, seed it with
//! [`Board::randomize`] or [`Board::set`], then call [`Board::advance`] once
//! per generation and read cells back with [`Board::is_alive`].

pub mod board;
pub mod error;

pub use board::Board;
pub use error::{LifeError, Result};
