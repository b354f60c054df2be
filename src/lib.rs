//! Crate root module declarations for the Quince chess rules engine.
//!
//! This file exposes all top-level subsystems (board model, movement rules,
//! move notation, and game orchestration) so binaries, tests, and external
//! tooling can import stable module paths.

pub mod errors;

pub mod board {
    pub mod board;
    pub mod piece;
    pub mod render;
    pub mod square;
}

pub mod rules {
    pub mod apply;
    pub mod castling;
    pub mod check;
    pub mod reachability;
    pub mod valid_moves;
}

pub mod notation {
    pub mod algebraic;
    pub mod long_move;
}

pub mod game {
    pub mod play;
    pub mod players;
    pub mod scoresheet;
    pub mod store;
}
