//! Built-in blackjack mode.
//!
//! This is the dispatch surface for blackjack tables: it validates and
//! acknowledges table actions. Round resolution and payouts are not part
//! of this handler.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GameMode;
use crate::auth::AuthContext;
use crate::errors::DomainError;

pub struct BlackjackMode;

impl BlackjackMode {
    pub const NAME: &'static str = "blackjack";
    pub const VERSION: &'static str = "0.1";
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlackjackInput {
    pub action: BlackjackAction,
    /// Table to act on; omitted means the caller's default table.
    #[serde(default)]
    pub table: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackAction {
    Deal,
    Hit,
    Stand,
}

#[derive(Debug, Serialize)]
pub struct BlackjackOutput {
    pub mode: &'static str,
    pub action: BlackjackAction,
    pub table: String,
    pub accepted: bool,
}

#[async_trait]
impl GameMode for BlackjackMode {
    type Input = BlackjackInput;
    type Output = BlackjackOutput;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> &'static str {
        Self::VERSION
    }

    async fn handle(
        &self,
        ctx: &AuthContext,
        input: BlackjackInput,
    ) -> Result<BlackjackOutput, DomainError> {
        let table = match input.table {
            Some(table) if table.trim().is_empty() => {
                return Err(DomainError::validation("table must not be blank"));
            }
            Some(table) => table,
            None => format!("{}-table", ctx.sub),
        };

        debug!(sub = %ctx.sub, action = ?input.action, table = %table, "blackjack action accepted");

        Ok(BlackjackOutput {
            mode: Self::NAME,
            action: input.action,
            table,
            accepted: true,
        })
    }
}
