//! sideline: a segment timeline engine for collaborative match-video
//! narration. Contributors attach commentary to time intervals of a video;
//! the engine decides whether a new recording joins an existing segment or
//! spawns a new one, and which segment is "active" during playback.

pub mod db;
pub mod engine;
pub mod models;
pub mod service;

pub use db::Database;
pub use engine::{
    locate_active_segment, resolve_attachment, AttachmentDecision, AttachmentTarget, EngineConfig,
    EngineError, IntervalIndex, PlaybackSession, PlaybackState, ResolveWarning, SegmentBounds,
};
pub use models::{MediaAssetInfo, Narration, Recording, Segment, SourceType};
pub use service::{NarrationService, ResolveReport};
