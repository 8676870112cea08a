//! Game rules for tzfe.
//!
//! Pure functions over a [`Board`](crate::Board): whether any move is left,
//! and how many merges each axis offers. Kept apart from board storage so the
//! session and external move pickers can share them.

pub mod hint;
pub mod terminal;

pub use hint::{CompactHint, compact_horizontally_hint, compact_vertically_hint};
pub use terminal::{has_moves_remaining, is_win};
