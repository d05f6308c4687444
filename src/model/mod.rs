//! Energy and financial models for the economics projection.

pub mod consumption;
pub mod finance;
pub mod generation;
pub mod selfuse;
