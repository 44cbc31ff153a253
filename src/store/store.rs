//! Slot store implementation using fjall.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::logging::{debug, error, info, warn};

use super::error::StoreError;
use super::identity::IdentityMap;
use super::record::{PlayerSlots, SaveRecord};
use super::rotation::{self, RetentionPolicy};

/// Keyspace names.
const META_KEYSPACE: &str = "_meta";
const PLAYERS_KEYSPACE: &str = "players";
const IDENTS_KEYSPACE: &str = "idents";

/// Config key in the metadata keyspace.
const META_CONFIG_KEY: &str = "config";

/// Current store version (1).
/// Increment this when changing the on-disk layout or document format.
/// The store will reject opening databases with a different version.
const STORE_VERSION: u32 = 1;

/// A durable per-player save store backed by fjall.
///
/// Each player owns a [`PlayerSlots`] document holding a bounded recent
/// window and a per-day coalesced history window; an [`IdentityMap`] binds
/// ident tokens to players. Documents are stored as JSON and every mutation
/// is synced to disk before the caller sees success.
///
/// # Example
///
/// ```ignore
/// use save_vault::{RetentionPolicy, SaveRecord, SaveStore};
///
/// // Initialize a new store
/// let store = SaveStore::init(".save-vault", RetentionPolicy::default())?;
///
/// // Submit saves; rotation keeps the windows bounded
/// let slots = store.submit(SaveRecord {
///     player_id: "p1".into(),
///     ident: "device-abc".into(),
///     device_description: "Chrome Browser".into(),
///     time_stamp: "2026-08-04T12:00:00Z".into(),
///     save_data: serde_json::json!({"score": 100}),
/// })?;
/// assert_eq!(slots.recent.len(), 1);
///
/// // Look saves up by player or by ident token
/// let slots = store.fetch_by_player("p1")?;
/// let slots = store.fetch_by_ident("device-abc")?;
/// ```
///
/// # Concurrency
///
/// Reads go straight to fjall. The read-modify-write paths
/// ([`Self::submit`] and [`Self::purge_all`]) serialize under one
/// store-wide mutex, so a purge never races a save being rotated in.
pub struct SaveStore {
    db: fjall::Database,
    players: Keyspace,
    identity: IdentityMap,
    policy: RetentionPolicy,
    write_lock: Mutex<()>,
}

impl SaveStore {
    /// Open an existing save store at the given path.
    pub fn open(path: impl AsRef<Path>, policy: RetentionPolicy) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening save store");

        if !path.exists() {
            error!(path = %path.display(), "store path does not exist");
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        // Verify store version
        if let Some(config) = meta.get(META_CONFIG_KEY)? {
            let version = u32::from_le_bytes(
                config
                    .as_ref()
                    .try_into()
                    .map_err(|_| StoreError::InvalidFormat("Invalid config format".to_string()))?,
            );
            if version != STORE_VERSION {
                error!(
                    stored_version = version,
                    expected_version = STORE_VERSION,
                    "store version mismatch"
                );
                return Err(StoreError::InvalidFormat(format!(
                    "Store version mismatch: expected {}, got {}",
                    STORE_VERSION, version
                )));
            }
        } else {
            error!(path = %path.display(), "store not initialized - no config found");
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let store = Self::wire(db, policy)?;
        info!(path = %path.display(), "save store opened");
        Ok(store)
    }

    /// Initialize a new save store at the given path.
    pub fn init(path: impl AsRef<Path>, policy: RetentionPolicy) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "initializing save store");

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        // Write store version
        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        db.persist(PersistMode::SyncAll)?;

        let store = Self::wire(db, policy)?;
        info!(path = %path.display(), "save store initialized");
        Ok(store)
    }

    fn wire(db: fjall::Database, policy: RetentionPolicy) -> Result<Self, StoreError> {
        let players = db.keyspace(PLAYERS_KEYSPACE, KeyspaceCreateOptions::default)?;
        let idents = db.keyspace(IDENTS_KEYSPACE, KeyspaceCreateOptions::default)?;

        Ok(Self {
            db,
            players,
            identity: IdentityMap::new(idents),
            policy: policy.clamped(),
            write_lock: Mutex::new(()),
        })
    }

    /// The identity map component.
    pub fn identity(&self) -> &IdentityMap {
        &self.identity
    }

    /// The retention policy this store rotates with.
    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Submit a save: validate, bind the ident, rotate the record into the
    /// player's windows and persist. Returns the resulting windows.
    ///
    /// Rejections ([`StoreError::MissingField`],
    /// [`StoreError::InvalidTimestamp`], [`StoreError::IdentConflict`])
    /// happen strictly before any mutation. Capacity never rejects a save;
    /// it is enforced by rotation.
    pub fn submit(&self, record: SaveRecord) -> Result<PlayerSlots, StoreError> {
        record.validate()?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !record.ident.is_empty() {
            self.identity.bind(&record.ident, &record.player_id)?;
        }

        let player_id = record.player_id.clone();
        let mut slots = self.load_slots(&player_id)?.unwrap_or_default();
        rotation::rotate_in(&mut slots, record, &self.policy);

        self.players
            .insert(&player_id, serde_json::to_vec(&slots)?)?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(
            player_id = %player_id,
            recent = slots.recent.len(),
            history = slots.history.len(),
            "save accepted"
        );
        Ok(slots)
    }

    /// Fetch a player's windows.
    pub fn fetch_by_player(&self, player_id: &str) -> Result<PlayerSlots, StoreError> {
        self.load_slots(player_id)?
            .ok_or_else(|| StoreError::PlayerNotFound(player_id.to_string()))
    }

    /// Fetch the windows of the player bound to `ident`.
    pub fn fetch_by_ident(&self, ident: &str) -> Result<PlayerSlots, StoreError> {
        let player_id = self
            .identity
            .resolve(ident)?
            .ok_or_else(|| StoreError::IdentNotFound(ident.to_string()))?;
        self.fetch_by_player(&player_id)
    }

    /// List all players with a valid persisted document.
    ///
    /// Documents that fail to read or parse are skipped, not surfaced:
    /// one corrupt player must not take the whole listing down.
    pub fn players(&self) -> Result<Vec<String>, StoreError> {
        let mut players = Vec::new();

        for kv in self.players.iter() {
            let Ok(key_bytes) = kv.key() else {
                continue;
            };
            let player_id = String::from_utf8_lossy(&key_bytes).into_owned();

            match self.load_slots(&player_id) {
                Ok(Some(_)) => players.push(player_id),
                Ok(None) => {}
                Err(_e) => {
                    warn!(player_id = %player_id, error = %_e, "skipping unreadable player document");
                }
            }
        }

        Ok(players)
    }

    /// List all bound ident tokens.
    pub fn idents(&self) -> Result<Vec<String>, StoreError> {
        self.identity.idents()
    }

    /// Remove every player's saves and clear the identity map.
    ///
    /// Holds the write lock for the whole operation so no save can be
    /// rotated in (or ident bound) for a player being wiped. Each deletion
    /// is independent; the first failure is reported after all keys have
    /// been attempted.
    pub fn purge_all(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let keys: Vec<Vec<u8>> = self
            .players
            .iter()
            .filter_map(|kv| kv.key().ok().map(|k| k.to_vec()))
            .collect();

        let mut first_error: Option<StoreError> = None;
        for k in keys {
            if let Err(e) = self.players.remove(&k) {
                warn!(error = %e, "failed to remove player document");
                if first_error.is_none() {
                    first_error = Some(e.into());
                }
            }
        }

        if let Err(e) = self.identity.clear() {
            warn!(error = %e, "failed to clear identity map");
            if first_error.is_none() {
                first_error = Some(e);
            }
        }

        self.db.persist(PersistMode::SyncAll)?;

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("all saves purged");
                Ok(())
            }
        }
    }

    fn load_slots(&self, player_id: &str) -> Result<Option<PlayerSlots>, StoreError> {
        let Some(buffer) = self.players.get(player_id)? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_slice(&buffer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player_id: &str, ident: &str, day: u32) -> SaveRecord {
        SaveRecord {
            player_id: player_id.into(),
            ident: ident.into(),
            device_description: "Test Device".into(),
            time_stamp: format!("2026-08-{:02}T12:00:00Z", day),
            save_data: serde_json::json!({"day": day}),
        }
    }

    #[test]
    fn test_open_requires_init() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing");

        let err = SaveStore::open(&path, RetentionPolicy::default());
        assert!(matches!(err, Err(StoreError::NotInitialized(_))));
    }

    #[test]
    fn test_submit_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("db");

        {
            let store = SaveStore::init(&path, RetentionPolicy::default()).unwrap();
            store.submit(record("p1", "i1", 1)).unwrap();
        }

        let store = SaveStore::open(&path, RetentionPolicy::default()).unwrap();
        let slots = store.fetch_by_player("p1").unwrap();
        assert_eq!(slots.recent.len(), 1);
        assert_eq!(store.identity().resolve("i1").unwrap().as_deref(), Some("p1"));
    }

    #[test]
    fn test_listing_skips_corrupt_documents() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SaveStore::init(dir.path().join("db"), RetentionPolicy::default()).unwrap();

        store.submit(record("good", "", 1)).unwrap();

        // Plant a document that is not valid JSON next to the good one.
        store.players.insert("broken", b"not json at all").unwrap();
        store.db.persist(PersistMode::SyncAll).unwrap();

        let players = store.players().unwrap();
        assert_eq!(players, vec!["good".to_string()]);
    }

    #[test]
    fn test_fetch_unknown_player() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SaveStore::init(dir.path().join("db"), RetentionPolicy::default()).unwrap();

        assert!(matches!(
            store.fetch_by_player("nobody"),
            Err(StoreError::PlayerNotFound(_))
        ));
        assert!(matches!(
            store.fetch_by_ident("unbound"),
            Err(StoreError::IdentNotFound(_))
        ));
    }
}
