//! The five independent component-curve builders plus the density and
//! active-key counters. None of them reads another's output; they are only
//! combined in the aggregation step.

pub mod anchor;
pub mod cross;
pub mod density;
pub mod jack;
pub mod press;
pub mod release;
