use crate::commands::props::build_client;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use figdocs_figma::{plan_import, FigmaError};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Figma file key (overrides figmaFileKey in the config)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Node ids already imported, skipped in the plan
    #[arg(long = "exclude", value_name = "NODE_ID")]
    pub exclude: Vec<String>,

    /// Write a documentation skeleton per candidate into this directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Print the plan as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let file_key = config.resolve_file_key(args.file_key.clone())?;
    let client = build_client(&config)?;

    let file = client
        .file(&file_key)
        .await
        .map_err(|err| describe_fetch_error(err, &config))?;
    let published = client
        .published_components(&file_key)
        .await
        .map_err(|err| describe_fetch_error(err, &config))?;

    if published.is_empty() {
        println!(
            "{} {} has no published components - publish the library in Figma first",
            "⚠️".yellow(),
            file.name
        );
        return Ok(());
    }

    let existing: HashSet<String> = args.exclude.iter().cloned().collect();
    let plan = plan_import(&file_key, &file.name, &published, &existing);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!(
            "{} Everything in {} is already imported",
            "✓".green(),
            file.name
        );
        return Ok(());
    }

    println!(
        "{} {} importable component sets in {}",
        "✓".green(),
        plan.len(),
        file.name.bold()
    );
    for candidate in &plan {
        let page = candidate
            .page_name
            .as_deref()
            .map(|page| format!(" ({page})"))
            .unwrap_or_default();
        println!(
            "  {} {}{}  {} variants",
            candidate.node_id.dimmed(),
            candidate.name.bold(),
            page,
            candidate.variant_count()
        );
    }

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("cannot create {}", out_dir.display()))?;
        for candidate in &plan {
            let path = out_dir.join(format!("{}.json", slug(&candidate.name)));
            let skeleton = serde_json::to_string_pretty(&candidate.skeleton())?;
            fs::write(&path, skeleton)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("  {} {} → {}", "✓".green(), candidate.name, path.display());
        }
    }

    Ok(())
}

fn describe_fetch_error(err: FigmaError, config: &Config) -> anyhow::Error {
    match err {
        FigmaError::FileNotFound(key) => anyhow!("couldn't fetch file {key}: not found"),
        FigmaError::Unauthorized => {
            anyhow!("couldn't fetch: token rejected (check {})", config.token_env)
        }
        other => anyhow!("couldn't fetch: {other}"),
    }
}

fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    slug.trim_matches('-').to_string()
}
