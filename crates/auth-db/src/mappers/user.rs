//! User model -> entity mapper

use auth_core::entities::{User, UserCredentials};

use crate::models::UserModel;

/// Convert UserModel to the credential-bearing entity
impl From<UserModel> for UserCredentials {
    fn from(model: UserModel) -> Self {
        UserCredentials {
            user: User {
                id: model.id,
                username: model.username,
                email: model.email,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            password_hash: model.password_hash,
        }
    }
}

/// Convert UserModel to the sanitized User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        UserCredentials::from(model).into_user()
    }
}
