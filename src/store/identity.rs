//! Identity map: durable binding of ident tokens to players.
//!
//! An ident is a caller-supplied stable token (e.g. a device-bound token)
//! used to look a player up without knowing the player id. Each token binds
//! to at most one player, and the binding is write-once: rebinding to the
//! same player is a no-op, rebinding to a different player is rejected.

use fjall::Keyspace;

use crate::logging::{debug, trace};

use super::error::StoreError;

/// Durable mapping from ident token to player id.
///
/// Mutations update the owning database's memtable immediately; the owning
/// [`SaveStore`](super::SaveStore) syncs them to disk before reporting
/// success to the caller.
pub struct IdentityMap {
    idents: Keyspace,
}

impl IdentityMap {
    pub(super) fn new(idents: Keyspace) -> Self {
        Self { idents }
    }

    /// Bind `ident` to `player_id`.
    ///
    /// Idempotent when the token is already bound to the same player.
    /// Fails with [`StoreError::IdentConflict`] when it is bound to a
    /// different player, leaving the map untouched.
    pub fn bind(&self, ident: &str, player_id: &str) -> Result<(), StoreError> {
        if let Some(bound_to) = self.resolve(ident)? {
            if bound_to == player_id {
                trace!(ident = ident, "ident already bound to this player");
                return Ok(());
            }
            return Err(StoreError::IdentConflict {
                ident: ident.to_string(),
                bound_to,
            });
        }

        self.idents.insert(ident, player_id.as_bytes())?;
        debug!(ident = ident, player_id = player_id, "ident bound");
        Ok(())
    }

    /// Look up the player bound to `ident`.
    pub fn resolve(&self, ident: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .idents
            .get(ident)?
            .map(|v| String::from_utf8_lossy(&v).into_owned()))
    }

    /// List all bound ident tokens.
    pub fn idents(&self) -> Result<Vec<String>, StoreError> {
        let mut idents = Vec::new();

        for kv in self.idents.iter() {
            let Ok(key_bytes) = kv.key() else {
                continue;
            };
            idents.push(String::from_utf8_lossy(&key_bytes).into_owned());
        }

        Ok(idents)
    }

    /// Remove all bindings.
    ///
    /// Each removal is independent: a failed key does not stop the others.
    /// The first failure is reported after all keys have been attempted.
    pub fn clear(&self) -> Result<(), StoreError> {
        let keys: Vec<Vec<u8>> = self
            .idents
            .iter()
            .filter_map(|kv| kv.key().ok().map(|k| k.to_vec()))
            .collect();

        let mut first_error = None;
        for k in keys {
            if let Err(e) = self.idents.remove(&k) {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
