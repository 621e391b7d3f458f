//! Refresh session model -> entity mapper

use auth_core::entities::RefreshSession;
use auth_core::value_objects::Fingerprint;

use crate::models::RefreshSessionModel;

impl From<RefreshSessionModel> for RefreshSession {
    fn from(model: RefreshSessionModel) -> Self {
        RefreshSession {
            id: model.id,
            fingerprint: Fingerprint::from(model.fingerprint),
            refresh_token: model.refresh_token,
            user_id: model.user_id,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
