pub mod calendar;
pub mod catalog;
pub mod gallery;

pub use calendar::{month_groups, CalendarEntry, DateError, DiaryDate, MonthGroup};
pub use catalog::{map_search_url, restaurant_by_name, Restaurant, RESTAURANTS};
pub use gallery::{
    falloff_weight, layout_slots, wrap_index, Falloff, GalleryTuning, SlotPlacement,
};
