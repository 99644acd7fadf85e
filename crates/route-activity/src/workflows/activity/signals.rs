use super::domain::{ClientId, SalespersonId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Who an activity signal can be credited to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    Salesperson(SalespersonId),
    /// Evidence for a client the roster does not know.
    Unattributed,
}

impl Attribution {
    pub fn salesperson(&self) -> Option<&SalespersonId> {
        match self {
            Self::Salesperson(id) => Some(id),
            Self::Unattributed => None,
        }
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salesperson(id) => write!(f, "{id}"),
            Self::Unattributed => f.write_str("(sin atribuir)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalKey {
    pub client_id: ClientId,
    pub attribution: Attribution,
}

impl SignalKey {
    pub fn attributed(client_id: ClientId, salesperson: SalespersonId) -> Self {
        Self {
            client_id,
            attribution: Attribution::Salesperson(salesperson),
        }
    }

    pub fn unattributed(client_id: ClientId) -> Self {
        Self {
            client_id,
            attribution: Attribution::Unattributed,
        }
    }
}

/// One boolean `accion_mes` per (client, attribution).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitySignals {
    flags: BTreeMap<SignalKey, bool>,
}

impl ActivitySignals {
    /// Folds raw (key, flag) pairs with logical OR per key.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = (SignalKey, bool)>,
    {
        let mut signals = Self::default();
        for (key, flag) in flags {
            signals.record(key, flag);
        }
        signals
    }

    fn record(&mut self, key: SignalKey, flag: bool) {
        let entry = self.flags.entry(key).or_insert(false);
        *entry |= flag;
    }

    pub fn get(&self, key: &SignalKey) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// Missing keys count as no activity.
    pub fn had_action(&self, client_id: &ClientId, salesperson: &SalespersonId) -> bool {
        self.get(&SignalKey::attributed(client_id.clone(), salesperson.clone()))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignalKey, bool)> {
        self.flags.iter().map(|(key, flag)| (key, *flag))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag).count()
    }
}
