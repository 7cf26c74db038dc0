//! Domain logic - release versions and the headings that declare them

pub mod heading;
pub mod version;

pub use heading::{parse_heading, release_headings, release_versions, ReleaseHeading};
pub use version::VersionTag;
