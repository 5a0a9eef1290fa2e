//! # Session Bootstrap
//!
//! Opens an authenticated session and guarantees the user has a brand.
//! Authentication itself happens elsewhere; this module receives an opaque
//! user id plus the email it was authenticated with, and resolves (or
//! lazily creates) the brand that scopes every subsequent operation.
//!
//! The initial brand name is seeded from the email local part; "My Shop"
//! when the email yields nothing usable. The user renames it later.

use tracing::debug;

use rackline_core::types::Brand;
use rackline_core::validation::validate_brand_name;
use rackline_core::DEFAULT_BRAND_NAME;

use crate::error::StoreResult;
use crate::store::InventoryStore;

// =============================================================================
// Session
// =============================================================================

/// An authenticated user bound to their brand. Every service call takes
/// one, so brand scoping is explicit rather than ambient.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub brand: Brand,
}

impl Session {
    /// The brand id scoping this session's operations.
    #[inline]
    pub fn brand_id(&self) -> i64 {
        self.brand.id
    }
}

/// Opens a session for an authenticated user, creating their brand on
/// first sign-in.
pub async fn open_session(
    store: &dyn InventoryStore,
    user_id: &str,
    email: &str,
) -> StoreResult<Session> {
    let brand = match store.find_brand_by_user(user_id).await? {
        Some(brand) => brand,
        None => {
            let name = initial_brand_name(email);
            debug!(user_id, name, "creating brand on first sign-in");
            store.insert_brand(user_id, &name).await?
        }
    };

    Ok(Session {
        user_id: user_id.to_string(),
        brand,
    })
}

/// Renames the session's brand after validating the new name, and updates
/// the session in place.
pub async fn rename_brand(
    store: &dyn InventoryStore,
    session: &mut Session,
    name: &str,
) -> StoreResult<()> {
    let name = name.trim();
    validate_brand_name(name)?;

    session.brand = store.rename_brand(session.brand.id, name).await?;
    Ok(())
}

/// Seed brand name: the email local part, or "My Shop" when empty.
fn initial_brand_name(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.trim().is_empty() => local.trim().to_string(),
        _ => DEFAULT_BRAND_NAME.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_first_sign_in_creates_brand_from_email() {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "norte@example.com")
            .await
            .unwrap();

        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.brand.name, "norte");
    }

    #[tokio::test]
    async fn test_second_sign_in_reuses_brand() {
        let store = MemoryStore::new();
        let first = open_session(&store, "user-1", "norte@example.com")
            .await
            .unwrap();
        let second = open_session(&store, "user-1", "other@example.com")
            .await
            .unwrap();

        assert_eq!(first.brand.id, second.brand.id);
        // The name from the first sign-in sticks.
        assert_eq!(second.brand.name, "norte");
    }

    #[tokio::test]
    async fn test_unusable_email_falls_back() {
        let store = MemoryStore::new();
        let session = open_session(&store, "user-1", "").await.unwrap();
        assert_eq!(session.brand.name, "My Shop");

        let session = open_session(&store, "user-2", "@example.com").await.unwrap();
        assert_eq!(session.brand.name, "My Shop");
    }

    #[tokio::test]
    async fn test_rename_validates_and_updates_session() {
        let store = MemoryStore::new();
        let mut session = open_session(&store, "user-1", "norte@example.com")
            .await
            .unwrap();

        rename_brand(&store, &mut session, "  Studio Norte  ")
            .await
            .unwrap();
        assert_eq!(session.brand.name, "Studio Norte");

        assert!(rename_brand(&store, &mut session, "   ").await.is_err());
        // Failed rename leaves the session untouched.
        assert_eq!(session.brand.name, "Studio Norte");
    }
}
