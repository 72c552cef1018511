pub mod locale;
pub mod resume;
pub mod theme;
