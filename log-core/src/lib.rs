// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

pub mod errors;
pub mod model;
pub mod principal;
pub mod repository;
pub mod service;
mod state;
pub mod validator;

pub use errors::LogError;
pub use errors::LogValidationError;
pub use model::DashboardHonor;
pub use model::DashboardHonorSummary;
pub use model::Log;
pub use model::LogId;
pub use model::LogRequest;
pub use model::LogStatus;
pub use model::MessageRequest;
pub use model::NewLog;
pub use model::StudentId;
pub use model::VacancyId;
pub use model::VerificationAction;
pub use principal::Principal;
pub use principal::Role;
pub use repository::InMemoryLogRepository;
pub use repository::LogRepository;
pub use service::DashboardHonorService;
pub use service::LogService;
pub use validator::LogValidator;
