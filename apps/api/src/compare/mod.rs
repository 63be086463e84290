//! CV-to-job comparison — extraction, prompt synthesis and orchestration
//! of the inference call.

pub mod assessment;
pub mod extract;
pub mod handlers;
pub mod orchestrator;
pub mod prompt;
