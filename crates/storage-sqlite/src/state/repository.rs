use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::AppStateDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::app_state::dsl::*;
use pointfolio_core::errors::Result;
use pointfolio_core::state::{StateEntry, StateRepositoryTrait};

pub struct StateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        StateRepository { pool, writer }
    }
}

#[async_trait]
impl StateRepositoryTrait for StateRepository {
    fn get_state(&self, state_key_param: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_state
            .filter(state_key.eq(state_key_param))
            .select(state_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;
        Ok(value)
    }

    async fn put_state(&self, entries: Vec<StateEntry>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        self.writer
            .exec(move |conn| {
                for entry in entries {
                    debug!("Writing state key '{}'", entry.key);
                    diesel::replace_into(app_state)
                        .values(AppStateDB::from(entry))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
