pub mod assignment;
pub mod reconciler;
pub mod stop_sequencer;
pub mod suggestion;

pub use assignment::{AssignmentCoordinator, AssignmentOutcome};
pub use reconciler::RouteReconciler;
