use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "linestage",
    about = "Interactive line-level staging for git working tree changes"
)]
pub struct Cli {
    /// Only operate on these paths (repo-relative)
    paths: Vec<String>,

    /// Operate on staged changes: selections are un-staged from the index
    #[arg(long)]
    cached: bool,

    /// Only show files matching this glob pattern
    #[arg(long, value_name = "GLOB")]
    files: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let repo = linestage::git::open_repo(".")?;

    // Untracked files need an index entry before individual lines can be
    // staged out of them.
    if !cli.cached {
        linestage::git::intent_to_add_untracked(&repo)?;
    }

    let mut files = linestage::git::changed_files(&repo, cli.cached)?;

    if !cli.paths.is_empty() {
        files.retain(|f| {
            cli.paths
                .iter()
                .any(|p| f == p || f.starts_with(&format!("{p}/")))
        });
    }

    if let Some(ref glob_pattern) = cli.files {
        match glob::Pattern::new(glob_pattern) {
            Ok(pattern) => {
                files.retain(|f| pattern.matches(f));
            }
            Err(e) => {
                eprintln!("Warning: invalid glob pattern '{}': {}", glob_pattern, e);
            }
        }
    }

    if files.is_empty() {
        if cli.cached {
            println!("No staged changes to work with.");
        } else {
            println!("No unstaged changes to stage.");
        }
        return Ok(());
    }

    linestage::app::run(files, &repo, cli.cached)
}
