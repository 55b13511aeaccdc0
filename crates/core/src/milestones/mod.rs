//! Milestones module - progress thresholds and the tracker that records them.

mod milestones_model;
mod milestones_service;
mod milestones_traits;


pub use milestones_model::Milestone;
pub use milestones_service::MilestoneTracker;
pub use milestones_traits::MilestoneTrackerTrait;
