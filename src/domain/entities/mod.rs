pub mod date_range;
pub mod holiday;
pub mod location;
pub mod resolution;
pub mod snapshot;
pub mod status;
pub mod weekday;
pub mod weekly_off_rule;

pub use date_range::*;
pub use holiday::*;
pub use location::*;
pub use resolution::*;
pub use snapshot::*;
pub use status::*;
pub use weekday::*;
pub use weekly_off_rule::*;
