// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use http_server::WebServer;
use http_server::DEFAULT_REQUEST_TIMEOUT;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use log_core::DashboardHonorService;
use log_core::InMemoryLogRepository;
use log_core::Log;
use log_core::LogId;
use log_core::LogRepository;
use log_core::LogService;
use log_core::LogStatus;
use log_core::NewLog;
use log_core::StudentId;
use log_core::VacancyId;
use salvo::prelude::*;
use serde_json::json;

pub const SECRET: &str = "integration-secret";
pub const BASE: &str = "http://127.0.0.1:5800";

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
}

pub fn service(repository: Arc<dyn LogRepository>) -> Service {
    service_with_timeout(repository, DEFAULT_REQUEST_TIMEOUT)
}

pub fn service_with_timeout(repository: Arc<dyn LogRepository>, timeout: Duration) -> Service {
    let server = WebServer::builder()
        .addr("127.0.0.1:0")
        .log_service(Arc::new(LogService::with_clock(repository.clone(), fixed_today)))
        .honor_service(Arc::new(DashboardHonorService::new(repository)))
        .jwt_secret(SECRET)
        .request_timeout(timeout)
        .clock(fixed_today)
        .build();
    Service::new(server.route())
}

/// In-memory storage that can be made slow or broken.
#[derive(Default)]
pub struct StubRepository {
    inner: InMemoryLogRepository,
    delay: Option<Duration>,
    failing: bool,
}

impl StubRepository {
    pub fn slow(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Default::default() }
    }

    pub fn failing() -> Self {
        Self { failing: true, ..Default::default() }
    }

    fn access(&self) -> anyhow::Result<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing {
            anyhow::bail!("database is locked");
        }
        Ok(())
    }
}

impl LogRepository for StubRepository {
    fn insert(&self, new_log: NewLog) -> anyhow::Result<Log> {
        self.access()?;
        self.inner.insert(new_log)
    }

    fn find_by_id(&self, id: LogId) -> anyhow::Result<Option<Log>> {
        self.access()?;
        self.inner.find_by_id(id)
    }

    fn update(&self, log: &Log) -> anyhow::Result<()> {
        self.access()?;
        self.inner.update(log)
    }

    fn delete(&self, id: LogId) -> anyhow::Result<bool> {
        self.access()?;
        self.inner.delete(id)
    }

    fn find_all(&self) -> anyhow::Result<Vec<Log>> {
        self.access()?;
        self.inner.find_all()
    }

    fn count(&self) -> anyhow::Result<u64> {
        self.access()?;
        self.inner.count()
    }

    fn find_by_student_and_vacancy(
        &self,
        student_id: StudentId,
        vacancy_id: VacancyId,
    ) -> anyhow::Result<Vec<Log>> {
        self.access()?;
        self.inner.find_by_student_and_vacancy(student_id, vacancy_id)
    }

    fn find_by_vacancy_and_status(
        &self,
        vacancy_id: VacancyId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        self.access()?;
        self.inner.find_by_vacancy_and_status(vacancy_id, status)
    }

    fn find_by_student_and_status(
        &self,
        student_id: StudentId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        self.access()?;
        self.inner.find_by_student_and_status(student_id, status)
    }
}

pub fn token(user_id: i64, roles: serde_json::Value) -> String {
    let claims = json!({
        "userId": user_id,
        "roles": roles,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))
        .unwrap()
}

pub fn student_token(user_id: i64) -> String {
    token(user_id, json!(["ROLE_MAHASISWA"]))
}

pub fn lecturer_token(user_id: i64) -> String {
    token(user_id, json!("ROLE_DOSEN"))
}

pub fn log_body(title: &str, day: u32, start_hour: u32, end_hour: u32) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Membantu praktikum",
        "category": "Asistensi",
        "startTime": format!("2025-05-{day:02}T{start_hour:02}:00:00"),
        "endTime": format!("2025-05-{day:02}T{end_hour:02}:00:00"),
        "logDate": format!("2025-05-{day:02}"),
    })
}

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}
