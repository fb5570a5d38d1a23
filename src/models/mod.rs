pub mod location;
pub mod prayer;

pub use location::{City, SavedLocation, utc_offset, validate_coordinates};
pub use prayer::{DailySchedule, PrayerName, PrayerSlot, SLOTS_PER_DAY, validate_slots};
