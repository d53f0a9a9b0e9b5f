use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use figdocs_doc::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Documentation JSON file (the stored node sequence)
    pub file: PathBuf,

    /// Report schema drift without writing the repaired document
    #[arg(long)]
    pub check: bool,
}

pub fn normalize(args: NormalizeArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut document = Document::from_json(&content)
        .with_context(|| format!("{} is not a documentation document", args.file.display()))?;

    let changed = document.normalize();

    if args.check {
        if changed {
            return Err(anyhow!(
                "{} does not satisfy the documentation schema",
                args.file.display()
            ));
        }
        println!(
            "{} {} already satisfies the schema",
            "✓".green(),
            args.file.display()
        );
        return Ok(());
    }

    if changed {
        let repaired = serde_json::to_string_pretty(&document)?;
        fs::write(&args.file, repaired)
            .with_context(|| format!("cannot write {}", args.file.display()))?;
        println!(
            "{} Repaired {} ({} nodes, title {:?})",
            "✓".green(),
            args.file.display(),
            document.len(),
            document.title_display()
        );
    } else {
        println!(
            "{} {} already satisfies the schema",
            "✓".green(),
            args.file.display()
        );
    }

    Ok(())
}
