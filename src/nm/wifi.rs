// WiFi state queries on top of nmcli

use super::{AccessPoint, BSSID_SETTING, NMClient, WIRELESS_TYPE};
use crate::error::Result;

impl NMClient {
    /// Get the SSID the WiFi device is currently associated with
    pub async fn get_current_ssid(&self) -> Result<Option<String>> {
        let output = self
            .nmcli(&["device", "wifi"], Some(&["active", "ssid"]))
            .await?;
        Ok(parse_current_ssid(&output))
    }

    /// List the visible access points broadcasting `ssid`, in nmcli order
    pub async fn find_active_bssids(&self, ssid: &str) -> Result<Vec<AccessPoint>> {
        let output = self
            .nmcli(
                &["device", "wifi", "list"],
                Some(&["BSSID", "SIGNAL", "SSID"]),
            )
            .await?;
        Ok(parse_access_points(&output, ssid))
    }

    /// Get the name of the active WiFi connection profile
    pub async fn get_connection_name(&self) -> Result<Option<String>> {
        let output = self
            .nmcli(&["connection", "show", "--active"], Some(&["NAME", "TYPE"]))
            .await?;
        Ok(parse_connection_name(&output))
    }

    /// Get the BSSID the active WiFi connection is pinned to, if any
    pub async fn get_current_bssid(&self) -> Result<Option<String>> {
        let Some(connection_name) = self.get_connection_name().await? else {
            return Ok(None);
        };

        let output = self
            .nmcli(
                &["connection", "show", &connection_name],
                Some(&[BSSID_SETTING]),
            )
            .await?;
        Ok(parse_bssid_setting(&output))
    }
}

fn parse_current_ssid(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("yes:"))
        .map(str::to_string)
}

fn parse_access_points(output: &str, ssid: &str) -> Vec<AccessPoint> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            // The BSSID itself is colon separated, so split from the right
            let mut parts = line.rsplitn(3, ':');
            let ssid_name = parts.next()?;
            let signal = parts.next()?;
            let bssid = parts.next()?;
            Some((bssid, signal, ssid_name))
        })
        .filter(|(_, _, ssid_name)| *ssid_name == ssid)
        .map(|(bssid, signal, _)| AccessPoint {
            bssid: bssid.to_string(),
            signal: parse_signal(signal),
        })
        .collect()
}

/// Signal as a 0-100 percentage. Unparsable values count as 0.
fn parse_signal(signal: &str) -> u8 {
    signal
        .trim()
        .parse::<i64>()
        .map(|value| value.clamp(0, 100) as u8)
        .unwrap_or(0)
}

fn parse_connection_name(output: &str) -> Option<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(_, conn_type)| *conn_type == WIRELESS_TYPE)
        .map(|(name, _)| name.to_string())
}

fn parse_bssid_setting(output: &str) -> Option<String> {
    let (_, value) = output.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
