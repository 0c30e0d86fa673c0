// Streetnames: hierarchical topic classification of street name histories
//
// This is the library root. Each module corresponds to a major subsystem
// of the classification pipeline.

pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod topics;
