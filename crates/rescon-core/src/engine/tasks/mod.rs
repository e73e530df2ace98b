//! The passes of contact extraction.
//!
//! Each pass is a small function over plain data: [`pruning`] classifies every
//! residue pair by anchor distance, [`evaluation`] computes the all-atom
//! minimum distance for the surviving pairs, and [`thresholding`] turns the
//! finished matrix into a contact set.

pub mod evaluation;
pub mod pruning;
pub mod thresholding;
