/// Note and chart types.
pub mod chart;
