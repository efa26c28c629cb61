use log::{error, info};
use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::config::Config;
use crate::controller::Controller;
use crate::error::Result;
use crate::nm::{AccessPoint, NMClient};

/// Outcome of a facade call.
///
/// Serialises flat: `{"success": true, ...payload}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response<T> {
    Success(T),
    Failure(String),
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(flatten)]
    payload: Option<&'a T>,
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let envelope = match self {
            Response::Success(payload) => Envelope {
                success: true,
                error: None,
                payload: Some(payload),
            },
            Response::Failure(message) => Envelope {
                success: false,
                error: Some(message.as_str()),
                payload: None,
            },
        };
        envelope.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scan {
    pub bssids: Vec<AccessPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applied {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentBssid {
    pub bssid: Option<String>,
}

/// The three operations offered to the host, plus its lifecycle hooks
#[derive(Clone)]
pub struct Plugin {
    controller: Controller,
}

impl Plugin {
    pub fn new(client: Arc<NMClient>, config: &Config) -> Self {
        Self {
            controller: Controller::new(client, config),
        }
    }

    fn client(&self) -> &NMClient {
        self.controller.client()
    }

    pub fn on_load(&self) {
        info!("BSSID manager loaded");
    }

    pub fn on_unload(&self) {
        info!("BSSID manager unloaded");
    }

    /// List the access points of the network we are connected to
    pub async fn scan_bssids(&self) -> Response<Scan> {
        match self.try_scan_bssids().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error in scan_bssids: {}", e);
                Response::Failure(e.to_string())
            }
        }
    }

    async fn try_scan_bssids(&self) -> Result<Response<Scan>> {
        let Some(ssid) = self.client().get_current_ssid().await? else {
            return Ok(Response::Failure("No active SSID found.".to_string()));
        };
        info!("Currently connected SSID: {}", ssid);

        let bssids = self.client().find_active_bssids(&ssid).await?;
        if bssids.is_empty() {
            return Ok(Response::Failure(
                "No BSSIDs found for the current SSID.".to_string(),
            ));
        }
        info!("Found BSSIDs for SSID '{}': {:?}", ssid, bssids);

        Ok(Response::Success(Scan { bssids }))
    }

    /// Pin the active connection to `bssid`, or let it roam again with `None`
    pub async fn set_bssid(&self, bssid: Option<String>) -> Response<Applied> {
        match self.controller.set_bssid(bssid.as_deref()).await {
            Ok(()) => Response::Success(Applied {}),
            Err(e) => {
                error!("Error in set_bssid: {}", e);
                Response::Failure(e.to_string())
            }
        }
    }

    pub async fn get_current_bssid(&self) -> Response<CurrentBssid> {
        match self.client().get_current_bssid().await {
            Ok(bssid) => Response::Success(CurrentBssid { bssid }),
            Err(e) => {
                error!("Error in get_current_bssid: {}", e);
                Response::Failure(e.to_string())
            }
        }
    }
}
