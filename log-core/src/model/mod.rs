// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

mod honor;
mod log;
mod message;

pub use honor::DashboardHonor;
pub use honor::DashboardHonorSummary;
pub use log::Log;
pub use log::LogRequest;
pub use log::LogStatus;
pub use log::NewLog;
pub use log::UnknownLogStatus;
pub use log::UnknownVerificationAction;
pub use log::VerificationAction;
pub use message::MessageRequest;

pub type LogId = i64;
pub type StudentId = i64;
pub type VacancyId = i64;
