//! Terminal text measurement.
//!
//! Table alignment depends on how many monospace columns a fragment
//! occupies, which is not its `char` count once emoji and combining marks
//! show up. Both helpers here are total: they never fail on odd input.

mod glyph;
mod width;

pub use glyph::split_glyph;
pub use width::{display_width, display_width_bytes, pad_left, pad_right};
