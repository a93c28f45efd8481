// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera rig for touch and mouse input.
//!
//! Turns raw per-frame pointer samples into camera motion: a gesture
//! classifier picks one movement per frame, the rig applies it with soft
//! resistance near its limits, and a skewed projection keeps the pivot at
//! a constant apparent size while blending between orthographic and
//! perspective-like views.
//!
//! # Key entry points
//!
//! - [`camera::OrbitController`] - per-frame `tick(dt, sample)` driver
//! - [`camera::CameraRig`] - pivot state and movement operations
//! - [`input::GestureClassifier`] - pointer sample to movement intent
//! - [`options::Options`] - TOML presets for limits, scalars and binds
//!
//! # Frame flow
//!
//! ```text
//! PointerSample -> GestureClassifier -> MovementIntent
//!               -> CameraRig::apply -> SkewedProjection::flush
//!               -> RenderState
//! ```
//!
//! Everything runs synchronously on the caller's thread. Projection
//! changes are coalesced behind a dirty flag and rebuilt at most once per
//! tick.

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;

pub use camera::{CameraRig, OrbitController, RenderState};
pub use error::RigError;
pub use input::{GestureClassifier, Movement, MovementIntent, PointerSample};
pub use options::Options;
