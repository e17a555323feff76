pub mod effects;
pub mod driver;
pub mod pulse;
pub mod glyphs;
