//! Application-level orchestration.
//!
//! This module owns the workflow run lifecycle. UI layers send commands in and
//! receive [`crate::model::WorkflowEvent`]s back, which keeps the timing logic
//! out of the presentation code.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
