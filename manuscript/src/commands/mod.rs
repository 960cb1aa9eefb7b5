pub mod config;
pub mod doctor;
pub mod format;
pub mod spell;
