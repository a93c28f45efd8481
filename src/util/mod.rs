//! Shared math helpers for the rig.

pub mod curve;
