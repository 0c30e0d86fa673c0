// Batch pipelines that drive the classification engine over a corpus.

pub mod classify;
