//! In-flight mutation registry
//!
//! 同一实体同时只允许一个变更。第二个请求直接拒绝，而不是排队等待，
//! 对应界面上"提交中禁用按钮"的语义。

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::utils::{AppError, AppResult};

/// Claimed mutation keys, e.g. `ticket:<id>` or `create:<author id>`
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<DashMap<String, i64>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, failing with `MutationInFlight` if it is already held
    ///
    /// The claim is released when the returned guard drops.
    pub fn claim(&self, key: impl Into<String>) -> AppResult<InFlightGuard> {
        let key = key.into();
        match self.keys.entry(key.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(key = %key, "Duplicate mutation rejected while in flight");
                Err(AppError::mutation_in_flight(key))
            }
            Entry::Vacant(slot) => {
                slot.insert(shared::util::now_millis());
                Ok(InFlightGuard {
                    keys: Arc::clone(&self.keys),
                    key,
                })
            }
        }
    }

    pub fn is_claimed(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Releases its key on drop
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<DashMap<String, i64>>,
    key: String,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}

pub fn ticket_key(ticket_id: &str) -> String {
    format!("ticket:{}", ticket_id)
}

pub fn create_key(author_id: &str) -> String {
    format!("create:{}", author_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_second_claim_rejected() {
        let inflight = InFlight::new();
        let guard = inflight.claim(ticket_key("1")).unwrap();
        assert_eq!(guard.key(), "ticket:1");

        let err = inflight.claim(ticket_key("1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::MutationInFlight);

        // other keys are independent
        let _other = inflight.claim(ticket_key("2")).unwrap();
        let _create = inflight.claim(create_key("1")).unwrap();
        assert_eq!(inflight.len(), 3);
    }

    #[test]
    fn test_drop_releases() {
        let inflight = InFlight::new();
        {
            let _guard = inflight.claim("ticket:9").unwrap();
            assert!(inflight.is_claimed("ticket:9"));
        }
        assert!(!inflight.is_claimed("ticket:9"));
        assert!(inflight.claim("ticket:9").is_ok());
        assert!(inflight.is_empty());
    }
}
