use anyhow::{Result, bail};
use serde_json::Value;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::{PurgeTarget, Zones};
use crate::runtime::Runtime;

#[derive(clap::Subcommand, Debug)]
pub enum ZonesCommand {
    /// List zones
    List {
        /// Only the zone with this domain name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show one zone
    Get { zone_id: String },

    /// Purge cached content
    Purge {
        zone_id: String,

        /// Purge everything in the zone
        #[arg(long, conflicts_with = "files")]
        everything: bool,

        /// URL to purge (repeatable)
        #[arg(long = "file", value_name = "URL")]
        files: Vec<String>,
    },

    /// List all settings of a zone
    Settings { zone_id: String },

    /// Show one setting
    GetSetting { zone_id: String, setting: String },

    /// Change one setting. VALUE is parsed as JSON, falling back to a string.
    SetSetting {
        zone_id: String,
        setting: String,
        value: String,
    },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(
    client: &ApiClient<R>,
    command: ZonesCommand,
    output: Output,
) -> Result<()> {
    let zones = Zones::new(client);

    match command {
        ZonesCommand::List { name } => {
            let list = zones.list(name.as_deref()).await?;
            output.emit(&list, |list| {
                if list.is_empty() {
                    println!("No zones found.");
                }
                for zone in list {
                    println!("{:<34} {:<32} {}", zone.id, zone.name, zone.status);
                }
            })
        }
        ZonesCommand::Get { zone_id } => {
            let zone = zones.get(&zone_id).await?;
            output.emit(&zone, |zone| {
                println!("ID:           {}", zone.id);
                println!("Name:         {}", zone.name);
                println!("Status:       {}", zone.status);
                println!("Paused:       {}", zone.paused);
                println!(
                    "Plan:         {}",
                    or_dash(zone.plan.as_ref().map(|p| p.name.as_str()))
                );
                println!("Name servers: {}", zone.name_servers.join(", "));
            })
        }
        ZonesCommand::Purge {
            zone_id,
            everything,
            files,
        } => {
            let target = purge_target(everything, files)?;
            zones.purge_cache(&zone_id, &target).await?;
            output.done(&format!("Purge requested for zone {}.", zone_id))
        }
        ZonesCommand::Settings { zone_id } => {
            let settings = zones.settings(&zone_id).await?;
            output.emit(&settings, |settings| {
                for setting in settings {
                    println!("{:<32} {}", setting.id, setting.value);
                }
            })
        }
        ZonesCommand::GetSetting { zone_id, setting } => {
            let setting = zones.setting(&zone_id, &setting).await?;
            output.emit(&setting, |s| println!("{} = {}", s.id, s.value))
        }
        ZonesCommand::SetSetting {
            zone_id,
            setting,
            value,
        } => {
            let setting = zones
                .set_setting(&zone_id, &setting, parse_setting_value(&value))
                .await?;
            output.emit(&setting, |s| println!("{} = {}", s.id, s.value))
        }
    }
}

fn purge_target(everything: bool, files: Vec<String>) -> Result<PurgeTarget> {
    if everything {
        Ok(PurgeTarget::Everything)
    } else if !files.is_empty() {
        Ok(PurgeTarget::Files(files))
    } else {
        bail!("Nothing to purge. Pass --everything or at least one --file URL.")
    }
}

/// `on`, `"on"` and `["a"]` all become what the user meant.
fn parse_setting_value(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}
