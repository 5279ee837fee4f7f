//! Execution Engine
//!
//! CPU dispatch, address generation, reference selection and the
//! slice-synchronised fill of the memory matrix.

pub mod addressing;
pub mod dispatcher;
pub mod parallel;
pub mod reference;
pub mod segment;
