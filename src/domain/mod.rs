// Domain layer: transaction/category models, the rule book and the classifier port.
// No I/O here; adapters live under src/adapters.

pub mod model;
pub mod ports;
pub mod rules;
