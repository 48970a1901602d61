use serde::{Deserialize, Serialize};
use tasklane_application::{CreateUserInput, RegisterUserInput, UpdateUserInput, UserProfile};
use tasklane_domain::{Role, RoleId};
use ts_rs::TS;

/// Self-service registration payload.
#[derive(Debug, Deserialize, TS)]
pub struct RegisterRequest {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub language: String,
}

/// Email and password login payload.
#[derive(Debug, Deserialize, TS)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed identity token returned by login.
#[derive(Debug, Serialize, TS)]
pub struct LoginResponse {
    pub token: String,
}

/// Administrator account creation payload.
#[derive(Debug, Deserialize, TS)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub language: String,
}

/// Administrator account update payload.
#[derive(Debug, Deserialize, TS)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role_id: i32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub language: String,
}

/// API representation of a user account. Never carries the password hash.
#[derive(Debug, Serialize, TS)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub timezone: String,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<RegisterRequest> for RegisterUserInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            id: request.id,
            name: request.name,
            email: request.email,
            password: request.password,
            timezone: request.timezone,
            language: request.language,
        }
    }
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            role_id: RoleId::new(request.role_id),
            timezone: request.timezone,
            language: request.language,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            role_id: RoleId::new(request.role_id),
            timezone: request.timezone,
            language: request.language,
        }
    }
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            role_id: profile.role_id.as_i32(),
            role_name: profile.role_name,
            timezone: profile.timezone,
            language: profile.language,
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id().as_i32(),
            name: role.name().to_owned(),
            description: role.description().to_owned(),
        }
    }
}
