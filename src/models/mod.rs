mod media;
mod recording;
mod segment;

pub use media::MediaAssetInfo;
pub use recording::Recording;
pub use segment::{Narration, Segment, SourceType};
