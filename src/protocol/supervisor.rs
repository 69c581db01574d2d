// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded reconnect policy around a broker session.

use super::{BusSession, InboundMessage};
use crate::error::ProtocolError;

/// Supervises a [`BusSession`], retrying lost connections a bounded
/// number of times.
///
/// Each poll cycle spends at most one reconnect attempt. A successful
/// reconnect restores the full budget; once the budget is exhausted the
/// supervisor stays degraded and stops touching the session, leaving the
/// fan controllable through its buttons only.
pub struct ConnectionSupervisor<S> {
    session: S,
    budget: u32,
    attempts_left: u32,
    online: bool,
}

impl<S: BusSession> ConnectionSupervisor<S> {
    /// Reconnect attempts granted after a connection loss.
    pub const DEFAULT_RETRY_BUDGET: u32 = 5;

    /// Wraps a freshly connected session with the default retry budget.
    #[must_use]
    pub fn new(session: S) -> Self {
        Self::with_budget(session, Self::DEFAULT_RETRY_BUDGET)
    }

    /// Wraps a freshly connected session with a custom retry budget.
    #[must_use]
    pub fn with_budget(session: S, budget: u32) -> Self {
        Self {
            session,
            budget,
            attempts_left: budget,
            online: true,
        }
    }

    /// Returns whether the session is currently considered healthy.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Returns how many reconnect attempts remain.
    #[must_use]
    pub const fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Returns a reference to the supervised session.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Drains pending messages, reconnecting first if the session is down.
    ///
    /// A drain failure marks the session offline and spends one reconnect
    /// attempt immediately; the messages of that cycle are lost, which is
    /// acceptable at QoS 0.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Disconnected` while the session is down,
    /// including permanently once the retry budget is exhausted.
    pub async fn poll_incoming(&mut self) -> Result<Vec<InboundMessage>, ProtocolError> {
        self.ensure_connected().await?;
        match self.session.drain().await {
            Ok(messages) => Ok(messages),
            Err(error) => {
                tracing::warn!(error = %error, "Bus poll failed");
                self.online = false;
                self.ensure_connected().await?;
                Ok(Vec::new())
            }
        }
    }

    /// Reconnects the session if it is down and budget remains.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Disconnected` if the session stays down.
    pub async fn ensure_connected(&mut self) -> Result<(), ProtocolError> {
        if self.online {
            return Ok(());
        }
        if self.attempts_left == 0 {
            tracing::trace!("Reconnect budget exhausted, staying degraded");
            return Err(ProtocolError::Disconnected);
        }

        self.attempts_left -= 1;
        match self.session.reconnect().await {
            Ok(()) => {
                self.online = true;
                self.attempts_left = self.budget;
                tracing::info!("Session restored, retry budget reset");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    attempts_left = self.attempts_left,
                    "Reconnect attempt failed"
                );
                Err(ProtocolError::Disconnected)
            }
        }
    }
}
