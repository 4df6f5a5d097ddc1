// Domain layer: value types and the lookup-table port. No behaviour beyond formatting.

pub mod model;
pub mod ports;
