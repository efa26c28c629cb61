// Scripted stand-in for nmcli, used by the workflow tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BSSID_SETTING, CommandRunner, NMClient, ProcessOutput};
use crate::error::Result;

struct State {
    wifi: String,
    listing: String,
    active: String,
    profiles: HashMap<String, String>,
    up_failures: usize,
    down_error: Option<String>,
    calls: Vec<String>,
}

/// Answers the handful of nmcli commands the workflow issues and keeps
/// the BSSID binding of each known profile, so writes are visible to
/// later reads. Values are escaped the way nmcli escapes them in terse
/// mode.
pub struct FakeNetworkManager {
    state: Mutex<State>,
}

impl Default for FakeNetworkManager {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("MyHomeWifi".to_string(), String::new());

        Self {
            state: Mutex::new(State {
                wifi: "yes:MyHomeWifi\nno:Neighbor\n".to_string(),
                listing: [
                    "AA\\:11\\:22\\:33\\:44\\:55:90:MyHomeWifi",
                    "CC\\:11\\:22\\:33\\:44\\:55:60:Neighbor",
                    "BB\\:11\\:22\\:33\\:44\\:55:75:MyHomeWifi",
                ]
                .join("\n"),
                active: "MyHomeWifi:802-11-wireless\nEthernet:802-3-ethernet\n".to_string(),
                profiles,
                up_failures: 0,
                down_error: None,
                calls: Vec::new(),
            }),
        }
    }
}

impl FakeNetworkManager {
    pub fn with_wifi(self, wifi: &str) -> Self {
        self.state.lock().unwrap().wifi = wifi.to_string();
        self
    }

    pub fn with_listing(self, listing: &str) -> Self {
        self.state.lock().unwrap().listing = listing.to_string();
        self
    }

    pub fn with_active(self, active: &str) -> Self {
        self.state.lock().unwrap().active = active.to_string();
        self
    }

    pub fn with_bssid(self, connection: &str, bssid: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(connection.to_string(), bssid.to_string());
        self
    }

    /// Make the next `count` activations fail
    pub fn failing_up(self, count: usize) -> Self {
        self.state.lock().unwrap().up_failures = count;
        self
    }

    pub fn failing_down(self, message: &str) -> Self {
        self.state.lock().unwrap().down_error = Some(message.to_string());
        self
    }

    pub fn client(self: &Arc<Self>) -> NMClient {
        NMClient::new(self.clone(), "nmcli", Duration::from_secs(5))
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn bssid_of(&self, connection: &str) -> Option<String> {
        self.state.lock().unwrap().profiles.get(connection).cloned()
    }
}

fn ok(stdout: impl Into<String>) -> ProcessOutput {
    ProcessOutput {
        success: true,
        stdout: stdout.into(),
        stderr: String::new(),
    }
}

fn fail(stderr: impl Into<String>) -> ProcessOutput {
    ProcessOutput {
        success: false,
        stdout: String::new(),
        stderr: format!("{}\n", stderr.into()),
    }
}

fn unknown(name: &str) -> ProcessOutput {
    fail(format!("Error: unknown connection '{}'.", name))
}

#[async_trait]
impl CommandRunner for FakeNetworkManager {
    async fn run(&self, _program: &str, args: &[String]) -> Result<ProcessOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.join(" "));

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            ["-t", "-f", _, rest @ ..] => rest,
            rest => rest,
        };

        let output = match command {
            ["device", "wifi"] => ok(state.wifi.clone()),
            ["device", "wifi", "list"] => ok(state.listing.clone()),
            ["connection", "show", "--active"] => ok(state.active.clone()),
            ["connection", "show", name] => match state.profiles.get(*name) {
                Some(bssid) => ok(format!(
                    "{}:{}\n",
                    BSSID_SETTING,
                    bssid.replace(':', "\\:")
                )),
                None => unknown(name),
            },
            ["connection", "modify", name, setting, value] if *setting == BSSID_SETTING => {
                match state.profiles.get_mut(*name) {
                    Some(bssid) => {
                        *bssid = value.to_string();
                        ok("")
                    }
                    None => unknown(name),
                }
            }
            ["connection", "down", name] => {
                if let Some(message) = &state.down_error {
                    fail(message.clone())
                } else if state.profiles.contains_key(*name) {
                    ok(format!("Connection '{}' successfully deactivated", name))
                } else {
                    unknown(name)
                }
            }
            ["connection", "up", name] => {
                if !state.profiles.contains_key(*name) {
                    unknown(name)
                } else if state.up_failures > 0 {
                    state.up_failures -= 1;
                    fail(format!(
                        "Error: Connection activation failed: attempt left {}",
                        state.up_failures
                    ))
                } else {
                    ok("Connection successfully activated")
                }
            }
            other => fail(format!("Error: unsupported command '{}'", other.join(" "))),
        };

        Ok(output)
    }
}
