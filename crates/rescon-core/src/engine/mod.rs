//! # Engine Module
//!
//! Contact extraction machinery: configuration, the pairwise distance matrix,
//! the extraction passes and the resulting contact network.
//!
//! ## Overview
//!
//! Extraction runs in three passes over one [`Structure`](crate::core::models::structure::Structure):
//!
//! 1. **Pruning** ([`tasks::pruning`]) compares anchor atoms and discards pairs
//!    whose anchors are farther apart than the pruning bound.
//! 2. **Evaluation** ([`tasks::evaluation`]) computes the all-atom minimum
//!    distance for the remaining pairs.
//! 3. **Thresholding** ([`tasks::thresholding`]) keeps pairs with
//!    `0 < d < cutoff` as 1-based contacts.
//!
//! The passes communicate through a [`distance_matrix::DistanceMatrix`] that
//! lives for a single extraction. Orchestration lives in
//! [`crate::workflows::extract`].
//!
//! ## Submodules
//!
//! - **Configuration** ([`config`]) - cutoff, anchor atom and pruning bound mode
//! - **Results** ([`network`]) - contact sets, exclusions and statistics
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events
//! - **Error Handling** ([`error`]) - errors surfaced by workflows

pub mod config;
pub mod distance_matrix;
pub mod error;
pub mod network;
pub mod progress;
pub mod tasks;
