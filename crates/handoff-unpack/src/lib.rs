//! handoff unpack
//!
//! Unpacks a crystal document by applying its symmetry operators to every
//! atom, deduplicating the results by rounded-location collision.
//!
//! # Core Concepts
//!
//! - [`SymmetryOperator`]: parsed form of an operator string such as
//!   `"-x,y+1/2,-z"`, evaluated without any dynamic code execution
//! - [`unpack`]: document → document transformation producing the
//!   unpacked atom list alongside the pass-through unit cell
//! - [`UnpackError`] / [`OperatorError`]: typed failures for malformed
//!   operators and unexpected document shapes
//!
//! The input document needs three top-level fields: `symmetry` (array of
//! operator strings), `atoms` (array of objects with `location`,
//! `element`, `label`), and `unitcell` (copied through untouched). Shape
//! violations surface as typed errors, never as panics or silent repairs.

#![warn(unreachable_pub)]

mod error;
mod operator;
mod unpack;

pub use error::{OperatorError, UnpackError};
pub use operator::SymmetryOperator;
pub use unpack::unpack;
