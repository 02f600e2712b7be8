//! The built-in scenes and the registry that names them.

/// Agents collaborating over a three-phase cycle.
pub mod agent_flow;
/// Cosmic history from the Planck epoch to galaxy formation.
pub mod big_bang;
/// Fireflies on a digit-driven spawn schedule.
pub mod fireflies;
/// Recursive tree growing in the wind.
pub mod fractal_tree;
/// Scenes by id.
pub mod registry;
/// Retrieval and reranking pipeline.
pub mod reranking_flow;
/// Spring-driven rolling ball.
pub mod rolling_ball;
