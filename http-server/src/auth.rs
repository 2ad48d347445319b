// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use log_core::Principal;
use log_core::Role;
use salvo::http::header::AUTHORIZATION;
use salvo::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::api::render_error_response;

const BEARER_PREFIX: &str = "Bearer ";

/// Roles claim: a single role name or a list of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum RolesClaim {
    One(String),
    Many(Vec<String>),
}

impl Default for RolesClaim {
    fn default() -> Self {
        RolesClaim::Many(Vec::new())
    }
}

impl RolesClaim {
    pub fn to_roles(&self) -> Vec<Role> {
        match self {
            RolesClaim::One(role) => vec![Role::parse(role)],
            RolesClaim::Many(roles) => roles.iter().map(|role| Role::parse(role)).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    #[serde(default)]
    pub roles: RolesClaim,
    pub exp: u64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal::new(claims.user_id, claims.roles.to_roles())
    }
}

/// Verifies `Authorization: Bearer <jwt>` (HS256) and injects the
/// [`Principal`] into the depot. Requests without a valid token continue
/// anonymously.
pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn decode(&self, token: &str) -> Result<Principal, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.into())
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix(BEARER_PREFIX).map(str::trim).filter(|token| !token.is_empty())
}

#[async_trait]
impl Handler for JwtAuth {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        _res: &mut Response,
        _ctrl: &mut FlowCtrl,
    ) {
        let Some(token) = bearer_token(req) else {
            return;
        };
        match self.decode(token) {
            Ok(principal) => {
                tracing::trace!(target: "http_server", "Authenticated user {}", principal.user_id);
                depot.inject(principal);
            }
            Err(e) => {
                tracing::debug!(target: "http_server", "Rejected bearer token: {e}");
            }
        }
    }
}

/// Lets the request through only when the caller holds one of `roles`.
/// Anonymous callers get 401, callers with other roles get 403.
pub struct RequireRole {
    roles: Vec<Role>,
}

impl RequireRole {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self { roles: roles.into_iter().collect() }
    }
}

#[async_trait]
impl Handler for RequireRole {
    async fn handle(
        &self,
        _req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let Ok(principal) = depot.obtain::<Principal>() else {
            ctrl.skip_rest();
            render_error_response(
                res,
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                Some("Authentication required"),
            );
            return;
        };
        if !principal.has_any_role(&self.roles) {
            tracing::warn!(
                target: "http_server",
                "User {} with roles {:?} denied, required one of {:?}",
                principal.user_id,
                principal.roles,
                self.roles
            );
            ctrl.skip_rest();
            render_error_response(res, StatusCode::FORBIDDEN, "FORBIDDEN", Some("Access denied"));
        }
    }
}
