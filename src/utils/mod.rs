pub mod export;
pub mod format;
pub mod hijri;
pub mod qibla;
