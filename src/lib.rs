//! Caption timing and phrase placement for lyric videos.
//!
//! [`extension::compute`] works out how long each caption of a group must
//! stay on screen so it overlaps the next lines of the same group, and
//! [`placement::PhraseLayout`] places phrases in 3D scene space. Both are
//! pure functions over their inputs; loading and printing live in
//! [`loader`] and [`serialiser`].

pub mod caption;
pub mod error;
pub mod extension;
pub mod filter;
pub mod loader;
mod parser;
pub mod placement;
pub mod serialiser;

pub use caption::{CaptionId, CaptionRecord};
pub use error::{CaplineError, Result};
pub use extension::{compute, compute_checked, ExtendOpts, ExtensionResult, Follower};
pub use filter::GroupFilter;
pub use placement::{camera_depth_at, position_for, PhraseLayout, PhrasePosition};
