pub mod cache;
pub mod config;
pub mod embedding;
pub mod enroll;
pub mod gallery;
pub mod matcher;
pub mod store;

// Re-export the engine surface for callers
pub use cache::{RefreshPolicy, SnapshotCache};
pub use embedding::EMBEDDING_DIM;
pub use enroll::{validate_enrollment, EnrollmentError};
pub use gallery::{build_gallery, GalleryEntry, GallerySnapshot, RawRow};
pub use matcher::{best_match, MatchDecision, MatchError};
