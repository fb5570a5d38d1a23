pub mod advisory;
pub mod header;
pub mod locations;
pub mod next_prayer;
pub mod prayers;
pub mod qibla;
pub mod statusbar;
