use anyhow::Result;
use std::process;
use std::sync::Arc;

use bssidctl::cli;
use bssidctl::nm::NMClient;
use bssidctl::output::{self, render_response};
use bssidctl::plugin::Plugin;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::cli().get_matches();

    let config = cli::load_config(&args)?;
    let format = cli::output_format(args.get_one::<String>("format"));

    let plugin = Plugin::new(Arc::new(NMClient::from_config(&config)), &config);
    plugin.on_load();

    let rendered = match args.subcommand() {
        Some(("scan", _)) => {
            let response = plugin.scan_bssids().await;
            render_response(&response, format, |scan| {
                output::render_access_points(&scan.bssids)
            })?
        }
        Some(("set", set_args)) => {
            let bssid = set_args.get_one::<String>("bssid").cloned();
            let message = output::render_applied(bssid.as_deref());
            let response = plugin.set_bssid(bssid).await;
            render_response(&response, format, |_| message)?
        }
        Some(("current", _)) => {
            let response = plugin.get_current_bssid().await;
            render_response(&response, format, output::render_current)?
        }
        _ => unreachable!("clap requires a subcommand"),
    };
    rendered.print();

    plugin.on_unload();

    if !rendered.success {
        process::exit(rendered.exit_code());
    }
    Ok(())
}
