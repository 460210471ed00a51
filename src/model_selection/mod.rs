//! Train/test splitting for feature matrices.

mod split;

pub use split::{FeatureSplitter, SplitResult};
