use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use figdocs_figma::{derive_for_set, FigmaClient, FigmaError, PropertyRow};

#[derive(Debug, Args)]
pub struct PropsArgs {
    /// Node id of the component set (e.g. "9:9")
    pub node_id: String,

    /// Figma file key (overrides figmaFileKey in the config)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Print the table as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn props(args: PropsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let file_key = config.resolve_file_key(args.file_key.clone())?;
    let client = build_client(&config)?;

    let file = match client.file(&file_key).await {
        Ok(file) => file,
        Err(FigmaError::FileNotFound(key)) => {
            return Err(anyhow!("couldn't fetch file {key}: not found"));
        }
        Err(FigmaError::Unauthorized) => {
            return Err(anyhow!(
                "couldn't fetch file {file_key}: token rejected (check {})",
                config.token_env
            ));
        }
        Err(err) => return Err(anyhow!("couldn't fetch file {file_key}: {err}")),
    };

    let Some(rows) = derive_for_set(&file, &args.node_id) else {
        println!(
            "{} No variants in {} belong to node {}",
            "⚠️".yellow(),
            file.name,
            args.node_id
        );
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} {} properties for node {} in {}",
        "✓".green(),
        rows.len(),
        args.node_id,
        file.name.bold()
    );
    print_rows(&rows);
    Ok(())
}

fn print_rows(rows: &[PropertyRow]) {
    for row in rows {
        println!(
            "  {}  [{}]  {}",
            row.name.bold(),
            row.prop_type.to_string().cyan(),
            row.values.join(", ")
        );
    }
}

pub(crate) fn build_client(config: &Config) -> Result<FigmaClient> {
    let token = config.token()?;
    let client = match &config.figma_api_url {
        Some(url) => FigmaClient::with_base_url(token, url)?,
        None => FigmaClient::new(token)?,
    };
    Ok(client)
}
