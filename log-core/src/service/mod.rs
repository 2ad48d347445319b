// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

mod honor;
mod log_service;

use chrono::NaiveDate;
pub use honor::DashboardHonorService;
pub use honor::HOURLY_RATE;
pub use log_service::LogService;

/// Source of "today" for date validation and dashboard defaults.
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
