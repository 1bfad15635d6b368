// Domain layer: ban records, run results and the ports the pipeline depends on.

pub mod model;
pub mod ports;
