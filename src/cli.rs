use anyhow::Result;
use clap::{ArgGroup, ArgMatches, Command, arg, crate_version, value_parser};
use std::path::PathBuf;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::config::Config;

/// How responses are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

pub fn cli() -> Command {
    Command::new("bssidctl")
        .about("Pin a NetworkManager WiFi connection to a single access point")
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(--config <path>)
                .short('c')
                .required(false)
                .global(true)
                .help("Config file (default: ~/.config/bssidctl/config.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--nmcli <path>)
                .required(false)
                .global(true)
                .help("nmcli binary to run, overrides the config file"),
        )
        .arg(
            arg!(--format <format>)
                .required(false)
                .global(true)
                .help("Output format")
                .value_parser(["json", "text"])
                .default_value("json"),
        )
        .subcommand(
            Command::new("scan").about("List access points broadcasting the current SSID"),
        )
        .subcommand(
            Command::new("set")
                .about("Pin the active WiFi connection to a BSSID")
                .arg(
                    arg!([bssid] "Access point to pin to, e.g. AA:BB:CC:DD:EE:FF")
                        .value_parser(parse_bssid),
                )
                .arg(arg!(--clear "Remove the pin and let NetworkManager roam"))
                .group(
                    ArgGroup::new("target")
                        .args(["bssid", "clear"])
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("current").about("Show the BSSID the active connection is pinned to"),
        )
}

/// Load the config file named on the command line (or the default one)
/// and apply `--nmcli` on top of it
pub fn load_config(args: &ArgMatches) -> Result<Config> {
    let mut config = Config::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(nmcli) = args.get_one::<String>("nmcli") {
        config.nmcli_path = nmcli.clone();
    }
    Ok(config)
}

pub fn output_format(value: Option<&String>) -> OutputFormat {
    value
        .and_then(|v| OutputFormat::from_str(v).ok())
        .unwrap_or_default()
}

/// Accept six colon separated hex octets, normalised to upper case
/// the way nmcli prints them.
fn parse_bssid(value: &str) -> Result<String, String> {
    let octets: Vec<&str> = value.trim().split(':').collect();
    if octets.len() != 6 || octets.iter().any(|o| o.len() != 2) {
        return Err(format!("`{}` is not a BSSID like AA:BB:CC:DD:EE:FF", value));
    }

    for octet in &octets {
        hex::decode(octet).map_err(|e| format!("`{}` is not a valid BSSID: {}", value, e))?;
    }

    Ok(octets.join(":").to_uppercase())
}
