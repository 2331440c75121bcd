pub mod categorizer;
pub mod clients;
pub mod combination;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod generator;
pub mod http;
pub mod model;
pub mod payload;
pub mod prompts;
pub mod ranker;
pub mod store;
pub mod summary;

pub use generator::IdeaGenerator;
pub use model::{GeneratedIdea, IdeaGenerationResult, InnovationPoint, InnovationSet};
