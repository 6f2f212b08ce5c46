mod schedule_filter;
mod schedule_trimmer;
mod trim_mode;

pub use schedule_filter::{FilterSummary, ScheduleFilter};
pub use schedule_trimmer::{ScheduleTrimmer, TrimSummary};
pub use trim_mode::TrimMode;
