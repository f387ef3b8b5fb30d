//! Library to calculate the difficulty of vertically scrolling keys charts.
//!
//! ## Description
//!
//! Given a finalized list of timed notes spread across `K` columns, an
//! OD-like difficulty parameter, and a playback rate, `mania-sr` computes a
//! single star rating that estimates how hard the chart is to play at high
//! accuracy. The calculation is a pure function: no I/O, no randomness, and
//! bit-identical results for identical input.
//!
//! Chart decoding, layout-transforming mods, and any live-gameplay judgement
//! are out of scope; callers hand this crate an already-converted note list.
//!
//! ## Usage
//!
//! ```
//! use mania_sr::{Chart, Difficulty, Note};
//!
//! let notes = vec![
//!     Note::tap(0, 0),
//!     Note::tap(1, 150),
//!     Note::hold(2, 300, 800),
//!     Note::tap(3, 450),
//! ];
//!
//! let chart = Chart::new(notes, 4).unwrap();
//!
//! let attrs = Difficulty::new()
//!     .od(8.0)
//!     .clock_rate(1.0)
//!     .calculate(&chart);
//!
//! println!("Stars: {}", attrs.stars);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Log a summary of the component curves through `tracing::debug`. | [`tracing`]
//!
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    attributes::{DifficultyAttributes, Strains},
    difficulty::Difficulty,
    model::chart::{Chart, ChartError, Note},
};

/// The result types of a calculation.
pub mod attributes;

/// The difficulty calculation pipeline.
pub mod difficulty;

/// Input types of the calculation.
pub mod model;

mod util;
