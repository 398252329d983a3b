//! Caller-scoped facility sessions with a two-hour sliding TTL.
//!
//! A session is an opaque-id-keyed facility set a partner uploads and runs
//! analyses against. Invariants: ids are random UUIDs; every successful
//! `get` slides `last_access`; entries idle beyond the TTL are reaped
//! lazily on any access plus an explicit sweep; an unknown id and an
//! expired id are indistinguishable to the caller.
//!
//! Concurrency: the map is guarded by a mutex. Readers receive a cloned
//! snapshot, so a delete during an in-flight read leaves the reader with
//! either the full pre-delete state or [`RiskError::SessionNotFound`],
//! never a torn result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use uuid::Uuid;

use crate::core::{validate_facilities, Clock, Facility, RiskError, SystemClock};

/// Sessions idle for longer than this are reaped.
pub const SESSION_TTL: Duration = Duration::from_secs(2 * 3600);

/// One partner session snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub session_id: String,
    pub company_name: String,
    pub facilities: Vec<Facility>,
    /// Warnings gathered at upload (unknown sectors).
    pub warnings: Vec<String>,
    pub created_at: SystemTime,
    pub last_access: SystemTime,
}

impl Session {
    /// Seconds of idle time left before reaping, from `now`.
    pub fn expires_in(&self, now: SystemTime) -> Duration {
        let deadline = self.last_access + SESSION_TTL;
        deadline
            .duration_since(now)
            .unwrap_or(Duration::ZERO)
    }
}

/// TTL-bounded in-memory session store.
pub struct SessionStore {
    clock: Arc<dyn Clock>,
    sessions: Mutex<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Validates and stores a facility set; returns the new session
    /// snapshot. Unknown sectors are accepted with warnings; malformed
    /// records and duplicate ids are rejected.
    pub fn create(
        &self,
        company_name: &str,
        facilities: Vec<Facility>,
    ) -> Result<Session, RiskError> {
        if company_name.trim().is_empty() {
            return Err(RiskError::InvalidInput(
                "company_name must not be empty".to_string(),
            ));
        }
        let warnings = validate_facilities(&facilities)?;

        let now = self.clock.now();
        let session = Session {
            session_id: Uuid::new_v4().to_string(),
            company_name: company_name.to_string(),
            facilities,
            warnings,
            created_at: now,
            last_access: now,
        };

        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now);
        sessions.insert(session.session_id.clone(), session.clone());
        Ok(session)
    }

    /// Fetches a session snapshot, sliding its TTL. Expired and unknown
    /// ids fail identically.
    pub fn get(&self, session_id: &str) -> Result<Session, RiskError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now);
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.last_access = now;
                Ok(session.clone())
            }
            None => Err(RiskError::SessionNotFound),
        }
    }

    /// Slides the TTL without materialising a snapshot.
    pub fn touch(&self, session_id: &str) -> Result<(), RiskError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now);
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.last_access = now;
                Ok(())
            }
            None => Err(RiskError::SessionNotFound),
        }
    }

    /// The session's facilities, TTL slid.
    pub fn facilities(&self, session_id: &str) -> Result<Vec<Facility>, RiskError> {
        Ok(self.get(session_id)?.facilities)
    }

    /// Removes a session; missing and expired ids fail identically.
    pub fn delete(&self, session_id: &str) -> Result<(), RiskError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now);
        match sessions.remove(session_id) {
            Some(_) => Ok(()),
            None => Err(RiskError::SessionNotFound),
        }
    }

    /// Periodic sweep entry point; returns the number of reaped sessions.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now)
    }

    /// Live session count (after reaping).
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        reap(&mut sessions, now);
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn reap(sessions: &mut HashMap<String, Session>, now: SystemTime) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| {
        now.duration_since(session.last_access)
            .map(|idle| idle <= SESSION_TTL)
            .unwrap_or(true)
    });
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use crate::core::{ManualClock, Sector};

    use super::*;

    fn facility(id: &str, sector: &str) -> Facility {
        Facility {
            facility_id: id.to_string(),
            name: format!("{id} Works"),
            company: "Partner Corp".to_string(),
            sector: Sector::parse(sector),
            location: "Ulsan".to_string(),
            latitude: 35.5,
            longitude: 129.3,
            scope1_emissions: 1.0e5,
            scope2_emissions: 2.0e4,
            scope3_emissions: 1.0e4,
            annual_revenue: 1.0e8,
            ebitda: 1.2e7,
            assets_value: 9.0e7,
            coastal: None,
        }
    }

    fn store_with_clock() -> (SessionStore, ManualClock) {
        let clock = ManualClock::at_epoch();
        (SessionStore::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn create_returns_a_36_char_uuid() {
        let (store, _) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        assert_eq!(session.session_id.len(), 36);
        assert!(session.warnings.is_empty());
    }

    #[test]
    fn get_after_ttl_reports_not_found() {
        let (store, clock) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        assert!(store.get(&session.session_id).is_ok());

        clock.advance(SESSION_TTL + Duration::from_secs(1));
        assert_eq!(
            store.get(&session.session_id),
            Err(RiskError::SessionNotFound)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn touch_slides_the_ttl_without_reading() {
        let (store, clock) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        clock.advance(Duration::from_secs(7000));
        store.touch(&session.session_id).unwrap();
        clock.advance(Duration::from_secs(7000));
        assert!(store.get(&session.session_id).is_ok());
        assert!(store.touch("no-such-session").is_err());
    }

    #[test]
    fn ttl_slides_on_every_get() {
        let (store, clock) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();

        // Two accesses one hour apart each keep the session alive past the
        // absolute two-hour mark.
        clock.advance(Duration::from_secs(3600));
        assert!(store.get(&session.session_id).is_ok());
        clock.advance(Duration::from_secs(3600));
        assert!(store.get(&session.session_id).is_ok());
        clock.advance(Duration::from_secs(3600));
        assert!(store.get(&session.session_id).is_ok());
    }

    #[test]
    fn unknown_and_expired_ids_are_indistinguishable() {
        let (store, clock) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        let missing = store.get("00000000-0000-0000-0000-000000000000");

        clock.advance(SESSION_TTL + Duration::from_secs(1));
        let expired = store.get(&session.session_id);
        assert_eq!(missing, expired);
    }

    #[test]
    fn delete_removes_and_second_delete_fails() {
        let (store, _) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        store.delete(&session.session_id).unwrap();
        assert_eq!(
            store.delete(&session.session_id),
            Err(RiskError::SessionNotFound)
        );
    }

    #[test]
    fn unknown_sector_is_accepted_with_warning() {
        let (store, _) = store_with_clock();
        let session = store
            .create("Partner Corp", vec![facility("F1", "quantum_mining")])
            .unwrap();
        assert_eq!(session.warnings.len(), 1);
        assert!(session.warnings[0].contains("quantum_mining"));
    }

    #[test]
    fn duplicate_ids_and_empty_names_are_rejected() {
        let (store, _) = store_with_clock();
        assert!(store
            .create("Partner Corp", vec![facility("F1", "steel"), facility("F1", "steel")])
            .is_err());
        assert!(store.create("  ", vec![facility("F1", "steel")]).is_err());
    }

    #[test]
    fn sweep_counts_reaped_sessions() {
        let (store, clock) = store_with_clock();
        store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();
        store
            .create("Partner Corp", vec![facility("F2", "cement")])
            .unwrap();
        clock.advance(SESSION_TTL + Duration::from_secs(1));
        assert_eq!(store.sweep(), 2);
    }

    #[test]
    fn reader_snapshot_survives_concurrent_delete() {
        let (store, _) = store_with_clock();
        let store = Arc::new(store);
        let session = store
            .create("Partner Corp", vec![facility("F1", "steel")])
            .unwrap();

        let id = session.session_id.clone();
        let reader = {
            let store = Arc::clone(&store);
            let id = id.clone();
            std::thread::spawn(move || store.get(&id))
        };
        let deleter = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let _ = store.delete(&id);
            })
        };

        // Either a full snapshot or a clean not-found, never a torn read.
        match reader.join().unwrap() {
            Ok(snapshot) => assert_eq!(snapshot.facilities.len(), 1),
            Err(err) => assert_eq!(err, RiskError::SessionNotFound),
        }
        deleter.join().unwrap();
    }
}
