//! Database model for persisted state.

use diesel::prelude::*;
use pointfolio_core::state::StateEntry;
use serde::{Deserialize, Serialize};

/// Database model for state key-value pairs
#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_state)]
#[serde(rename_all = "camelCase")]
pub struct AppStateDB {
    pub state_key: String,
    pub state_value: String,
}

impl From<StateEntry> for AppStateDB {
    fn from(entry: StateEntry) -> Self {
        Self {
            state_key: entry.key,
            state_value: entry.value,
        }
    }
}
