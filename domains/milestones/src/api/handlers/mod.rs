//! HTTP handlers for the Milestones domain

pub mod milestones;
