// NetworkManager types used by the pinning workflow

use serde::Serialize;
use strum::Display;

/// Connection TYPE reported by nmcli for WiFi profiles
pub const WIRELESS_TYPE: &str = "802-11-wireless";

/// Profile setting holding the BSSID binding
pub const BSSID_SETTING: &str = "802-11-wireless.bssid";

/// A visible access point of the current network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPoint {
    pub bssid: String,
    pub signal: u8,
}

impl AccessPoint {
    pub fn quality(&self) -> SignalQuality {
        SignalQuality::from(self.signal)
    }
}

/// Coarse signal buckets, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Weak,
    #[strum(serialize = "very weak")]
    VeryWeak,
}

impl From<u8> for SignalQuality {
    fn from(signal: u8) -> Self {
        match signal {
            80.. => SignalQuality::Excellent,
            60..=79 => SignalQuality::Good,
            40..=59 => SignalQuality::Fair,
            20..=39 => SignalQuality::Weak,
            _ => SignalQuality::VeryWeak,
        }
    }
}

/// State of a connection while it is being restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionState {
    Up,
    Down,
    Failed,
}
