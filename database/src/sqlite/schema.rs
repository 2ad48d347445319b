// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

pub(crate) const SCHEMA_VERSION: i32 = 1;

pub(crate) const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS logs (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        category    TEXT NOT NULL,
        vacancy_id  INTEGER NOT NULL,
        student_id  INTEGER NOT NULL,
        start_time  TEXT NOT NULL,
        end_time    TEXT NOT NULL,
        log_date    TEXT NOT NULL,
        status      TEXT NOT NULL DEFAULT 'REPORTED'
    );

    CREATE TABLE IF NOT EXISTS log_messages (
        log_id   INTEGER NOT NULL REFERENCES logs(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        message  TEXT NOT NULL,
        PRIMARY KEY (log_id, position)
    );

    CREATE INDEX IF NOT EXISTS idx_logs_student_vacancy ON logs (student_id, vacancy_id);
    CREATE INDEX IF NOT EXISTS idx_logs_vacancy_status ON logs (vacancy_id, status);
    CREATE INDEX IF NOT EXISTS idx_logs_student_status ON logs (student_id, status);
";
