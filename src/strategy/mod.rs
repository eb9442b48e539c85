// src/strategy/mod.rs
// Pure classification of a snapshot into strategy-lookup vocabulary

pub mod board_texture;
pub mod node_key;

pub use board_texture::{classify_board, BoardTexture};
pub use node_key::{build_node_key, PotClass};
