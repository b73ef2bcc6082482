//! Session registry: one `ProfileStore` per session id.
//!
//! Sessions never share a profile. Each operation holds the registry lock for
//! a single synchronous step, so a session sees its own writes in order.
//! A session idle for longer than the TTL is ended like an explicit DELETE.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::locale::Locale;
use crate::models::profile::UserProfile;
use crate::profile::store::ProfileStore;

#[derive(Debug)]
struct Session {
    created_at: DateTime<Utc>,
    last_access: Instant,
    profiles: ProfileStore,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub locale: Locale,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn create(&self, locale: Locale) -> SessionInfo {
        let session_id = Uuid::new_v4();
        let created_at = Utc::now();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, s| s.last_access.elapsed() < ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Dropped {expired} idle session(s)");
        }

        sessions.insert(
            session_id,
            Session {
                created_at,
                last_access: Instant::now(),
                profiles: ProfileStore::new(locale),
            },
        );
        info!(
            "Session {session_id} started (locale: {locale}, active: {})",
            sessions.len()
        );
        SessionInfo {
            session_id,
            locale,
            created_at,
        }
    }

    pub async fn info(&self, session_id: Uuid) -> Result<SessionInfo, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = self.touch(&mut sessions, session_id)?;
        Ok(SessionInfo {
            session_id,
            locale: session.profiles.locale(),
            created_at: session.created_at,
        })
    }

    /// Ends a session; its profile is dropped with it.
    pub async fn end(&self, session_id: Uuid) -> Result<(), AppError> {
        if self.sessions.lock().await.remove(&session_id).is_none() {
            return Err(not_found(session_id));
        }
        info!("Session {session_id} ended");
        Ok(())
    }

    /// Current profile of the session with the session locale.
    pub async fn current_profile(
        &self,
        session_id: Uuid,
    ) -> Result<(UserProfile, Locale), AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = self.touch(&mut sessions, session_id)?;
        let locale = session.profiles.locale();
        Ok((session.profiles.get_current_profile(), locale))
    }

    pub async fn save_profile(
        &self,
        session_id: Uuid,
        profile: UserProfile,
    ) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = self.touch(&mut sessions, session_id)?;
        session.profiles.save_profile(profile)
    }

    /// Looks up a live session and refreshes its idle timer. An expired
    /// session is removed and reported as not found.
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, Session>,
        session_id: Uuid,
    ) -> Result<&'a mut Session, AppError> {
        let expired = sessions
            .get(&session_id)
            .map(|s| s.last_access.elapsed() >= self.ttl)
            .ok_or_else(|| not_found(session_id))?;
        if expired {
            sessions.remove(&session_id);
            info!("Session {session_id} expired");
            return Err(not_found(session_id));
        }

        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        session.last_access = Instant::now();
        Ok(session)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

fn not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
