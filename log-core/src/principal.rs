// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::fmt;

const ROLE_PREFIX: &str = "ROLE_";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Student assistant who reports hours.
    Mahasiswa,
    /// Lecturer who verifies reports.
    Dosen,
    Other(String),
}

impl Role {
    /// Accepts both `MAHASISWA` and `ROLE_MAHASISWA` spellings.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix(ROLE_PREFIX).unwrap_or(trimmed);
        match name.to_uppercase().as_str() {
            "MAHASISWA" => Role::Mahasiswa,
            "DOSEN" => Role::Dosen,
            _ => Role::Other(name.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Mahasiswa => write!(f, "{ROLE_PREFIX}MAHASISWA"),
            Role::Dosen => write!(f, "{ROLE_PREFIX}DOSEN"),
            Role::Other(name) => write!(f, "{ROLE_PREFIX}{name}"),
        }
    }
}

/// Authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(user_id: i64, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn student(user_id: i64) -> Self {
        Self::new(user_id, vec![Role::Mahasiswa])
    }

    pub fn lecturer(user_id: i64) -> Self {
        Self::new(user_id, vec![Role::Dosen])
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}
