use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{Role, User};

/// The identity proven by a verified bearer token. Handed to every gated
/// operation explicitly; nothing about the caller lives in ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

// Presentation layer is responsible for building Principal from HTTP inputs.

/// Re-fetches the caller and checks its role against `required`.
///
/// A token outlives role changes and deletions, so the stored user is the
/// source of truth, never the token.
pub async fn require_role<R>(
    users: &R,
    principal: &Principal,
    required: Role,
) -> ServiceResult<User>
where
    R: UserRepository + ?Sized,
{
    let user = users
        .find_by_id(principal.user_id, RecordScope::Active)
        .await?
        .ok_or_else(|| ServiceError::permission("Your account no longer exists !"))?;
    if !user.role.satisfies(required) {
        let msg = match required {
            Role::Admin => "You need to be an administrator to do this action !",
            Role::Employee => "You need to be an employee to do this action !",
            Role::User => "You need an account to do this action !",
        };
        return Err(ServiceError::permission(msg));
    }
    Ok(user)
}

/// Any live account.
pub async fn require_user<R>(users: &R, principal: &Principal) -> ServiceResult<User>
where
    R: UserRepository + ?Sized,
{
    require_role(users, principal, Role::User).await
}

/// The acting user owns the record, or is an admin.
pub fn ensure_owner_or_admin(actor: &User, owner_id: Uuid) -> ServiceResult<()> {
    if actor.id == owner_id || actor.role.satisfies(Role::Admin) {
        Ok(())
    } else {
        Err(ServiceError::permission(
            "Only the owner or an administrator can do this action !",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            pseudo: "p".into(),
            email: "e@x.com".into(),
            password_hash: String::new(),
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn owner_passes_and_stranger_fails() {
        let owner = user(Role::User);
        let stranger = user(Role::Employee);
        assert!(ensure_owner_or_admin(&owner, owner.id).is_ok());
        assert!(matches!(
            ensure_owner_or_admin(&stranger, owner.id),
            Err(ServiceError::Permission(_))
        ));
    }

    #[test]
    fn admin_passes_for_anyone() {
        let admin = user(Role::Admin);
        assert!(ensure_owner_or_admin(&admin, Uuid::new_v4()).is_ok());
    }
}
