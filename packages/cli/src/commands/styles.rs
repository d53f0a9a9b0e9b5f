use crate::commands::props::build_client;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use figdocs_figma::{FigmaError, PublishedStyle};

#[derive(Debug, Args)]
pub struct StylesArgs {
    /// Figma file key (overrides figmaFileKey in the config)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Only show styles of this type (FILL, TEXT, EFFECT, GRID)
    #[arg(short, long)]
    pub style_type: Option<String>,

    /// Print the list as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn styles(args: StylesArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let file_key = config.resolve_file_key(args.file_key.clone())?;
    let client = build_client(&config)?;

    let mut styles = match client.published_styles(&file_key).await {
        Ok(styles) => styles,
        Err(FigmaError::FileNotFound(key)) => {
            return Err(anyhow!("couldn't fetch file {key}: not found"));
        }
        Err(FigmaError::Unauthorized) => {
            return Err(anyhow!(
                "couldn't fetch styles: token rejected (check {})",
                config.token_env
            ));
        }
        Err(err) => return Err(anyhow!("couldn't fetch styles: {err}")),
    };

    if let Some(filter) = &args.style_type {
        let filter = filter.to_ascii_uppercase();
        styles.retain(|style| style.style_type == filter);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&styles)?);
        return Ok(());
    }

    if styles.is_empty() {
        println!("{} No published styles", "⚠️".yellow());
        return Ok(());
    }

    println!("{} {} published styles", "✓".green(), styles.len());
    print_grouped(&styles);
    Ok(())
}

fn print_grouped(styles: &[PublishedStyle]) {
    let mut types: Vec<&str> = Vec::new();
    for style in styles {
        if !types.contains(&style.style_type.as_str()) {
            types.push(&style.style_type);
        }
    }

    for style_type in types {
        println!("  {}", style_type.cyan().bold());
        for style in styles.iter().filter(|s| s.style_type == style_type) {
            if style.description.is_empty() {
                println!("    {}", style.name);
            } else {
                println!("    {}  {}", style.name, style.description.dimmed());
            }
        }
    }
}
