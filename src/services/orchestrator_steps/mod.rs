pub mod quiz_steps;

pub use quiz_steps::GenerationPhase;
