use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::nm::{BSSID_SETTING, ConnectionState, NMClient};

/// Activation attempts made by a restart before giving up
pub const ACTIVATION_ATTEMPTS: usize = 3;

/// Rewrites a profile's BSSID binding and cycles the connection so the
/// new binding takes effect.
#[derive(Clone)]
pub struct Controller {
    client: Arc<NMClient>,
    retry_delay: Duration,
    restart_after_set: bool,
}

impl Controller {
    pub fn new(client: Arc<NMClient>, config: &Config) -> Self {
        Self {
            client,
            retry_delay: config.retry_delay(),
            restart_after_set: config.restart_after_set,
        }
    }

    pub fn client(&self) -> &NMClient {
        &self.client
    }

    /// Take the connection down and bring it back up.
    ///
    /// A failed deactivation is returned as is. Activation is attempted
    /// [`ACTIVATION_ATTEMPTS`] times; if every attempt fails the last
    /// error is returned and the connection is left however
    /// NetworkManager has it.
    pub async fn restart_connection(&self, connection_name: &str) -> Result<()> {
        let mut state = ConnectionState::Up;

        self.client
            .nmcli(&["connection", "down", connection_name], None)
            .await?;
        state = transition(connection_name, state, ConnectionState::Down);

        let mut attempt = 1;
        loop {
            match self
                .client
                .nmcli(&["connection", "up", connection_name], None)
                .await
            {
                Ok(_) => {
                    transition(connection_name, state, ConnectionState::Up);
                    return Ok(());
                }
                Err(e) => {
                    error!(
                        "Error restarting connection {} (attempt {}/{}): {}",
                        connection_name, attempt, ACTIVATION_ATTEMPTS, e
                    );
                    if attempt == ACTIVATION_ATTEMPTS {
                        transition(connection_name, state, ConnectionState::Failed);
                        return Err(e);
                    }
                }
            }

            attempt += 1;
            if !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }

    /// Write the BSSID binding of a profile (`None` unpins it) and restart it.
    /// The BSSID is not checked against the visible access points.
    pub async fn set_bssid_for_connection(
        &self,
        connection_name: &str,
        bssid: Option<&str>,
    ) -> Result<()> {
        self.client
            .nmcli(
                &[
                    "connection",
                    "modify",
                    connection_name,
                    BSSID_SETTING,
                    bssid.unwrap_or(""),
                ],
                None,
            )
            .await?;
        self.restart_connection(connection_name).await
    }

    /// Pin (or unpin, with `None`) the active WiFi connection
    pub async fn set_bssid(&self, bssid: Option<&str>) -> Result<()> {
        let connection_name = self
            .client
            .get_connection_name()
            .await?
            .ok_or(Error::NoActiveConnection)?;
        info!("Active wireless connection: {}", connection_name);

        self.set_bssid_for_connection(&connection_name, bssid).await?;
        info!(
            "Set BSSID to {} for connection {}",
            bssid.unwrap_or("<automatic>"),
            connection_name
        );

        if self.restart_after_set {
            self.restart_connection(&connection_name).await?;
            info!("Connection {} restarted successfully.", connection_name);
        }

        Ok(())
    }
}

fn transition(
    connection_name: &str,
    from: ConnectionState,
    to: ConnectionState,
) -> ConnectionState {
    debug!("{}: {} -> {}", connection_name, from, to);
    to
}
