pub(crate) mod maths_utils;
mod perf;
pub mod time_utils;

pub use time_utils::{TimeUtils, date_to_axis_label, date_to_string, local_today, months_before};
