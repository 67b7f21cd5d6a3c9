use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use maki::{
    CategoryIndex, Config, Context, FsMetadata, batch::site_relative, build_tree,
    config::find_site_root, convert_file, format_timestamp, output_path, write_index,
};

#[derive(Parser)]
#[command(name = "maki", version, about = "Convert Maki markup into HTML pages")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Configuration file (defaults to maki.toml in the site root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one document
    Build {
        /// Source document
        input: PathBuf,
        /// Output file (defaults to the input with an .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Site root for links and the category index (defaults to the
        /// nearest directory above the input holding a maki.toml, else the
        /// input's directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Convert every document under a directory
    BuildAll {
        /// Site root
        dir: PathBuf,
    },
    /// Write the site index page
    Index {
        /// Site root
        dir: PathBuf,
    },
}

fn load_config(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::discover(root)?,
    };
    Ok(config)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn build(
    input: &Path,
    output: Option<PathBuf>,
    root: &Path,
    explicit: Option<&Path>,
    generated_at: &str,
) -> anyhow::Result<()> {
    let config = load_config(explicit, root)?;
    let ctx = Context {
        config: &config,
        site_root: root,
        generated_at,
        metadata: &FsMetadata,
        page: None,
    };
    let output = output.unwrap_or_else(|| output_path(input));
    let conversion = convert_file(input, &output, &ctx)?;
    println!("{}", output.display());

    let categories_path = config.categories_path(root);
    let mut categories = CategoryIndex::load(&categories_path)?;
    if categories.replace_page(&site_relative(root, input), &conversion.categories) {
        categories.save(&categories_path)?;
        log::debug!("updated {}", categories_path.display());
    }
    Ok(())
}

fn build_all(dir: &Path, explicit: Option<&Path>, generated_at: &str) -> anyhow::Result<()> {
    let config = load_config(explicit, dir)?;
    let ctx = Context {
        config: &config,
        site_root: dir,
        generated_at,
        metadata: &FsMetadata,
        page: None,
    };
    let report = build_tree(dir, &ctx)?;
    report
        .categories
        .save(&config.categories_path(dir))
        .context("saving category index")?;
    for path in &report.converted {
        println!("{}", output_path(path).display());
    }
    if !report.is_success() {
        for (path, err) in &report.failures {
            eprintln!("{}: {err}", path.display());
        }
        let failed = report.failures.len();
        bail!(
            "{failed} of {} documents failed",
            failed + report.converted.len()
        );
    }
    Ok(())
}

fn index(dir: &Path, explicit: Option<&Path>, generated_at: &str) -> anyhow::Result<()> {
    let config = load_config(explicit, dir)?;
    let ctx = Context {
        config: &config,
        site_root: dir,
        generated_at,
        metadata: &FsMetadata,
        page: None,
    };
    let categories = CategoryIndex::load(&config.categories_path(dir))?;
    let path = write_index(&ctx, &categories)?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let generated_at = format_timestamp(SystemTime::now());
    let explicit = cli.config.as_deref();

    match cli.command {
        Command::Build {
            input,
            output,
            root,
        } => {
            let root = root.unwrap_or_else(|| {
                let dir = parent_dir(&input);
                find_site_root(&dir).unwrap_or(dir)
            });
            build(&input, output, &root, explicit, &generated_at)
                .with_context(|| format!("building {}", input.display()))
        }
        Command::BuildAll { dir } => build_all(&dir, explicit, &generated_at),
        Command::Index { dir } => index(&dir, explicit, &generated_at)
            .with_context(|| format!("indexing {}", dir.display())),
    }
}
