//! Data Transfer Objects

mod action_result;
mod simulation_view;

pub use action_result::ActionResult;
pub use simulation_view::SimulationView;
