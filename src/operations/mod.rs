pub mod association;
pub mod boolean;
pub mod close_curves;
pub mod passageway;
pub mod shape;
