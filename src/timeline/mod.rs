pub mod binding;
pub mod countup;
pub mod entrance;
pub mod pinned;
pub mod scrub;
pub mod segment;
pub mod trigger;
