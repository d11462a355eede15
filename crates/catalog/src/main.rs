use clap::{Parser, Subcommand};
use saco_catalog::api::{CategoriesResponse, DesignsResponse};
use saco_catalog::error::CatalogError;
use saco_catalog::listing::{categories_from_keys, designs_from_keys};
use saco_catalog::preview::PreviewRequest;
use saco_catalog::query::share_link;
use saco_catalog::ROOT_PREFIX;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "saco-catalog",
    about = "Inspect a local mirror of the design bucket"
)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List categories found in a bucket mirror
    Categories {
        /// Directory laid out like the bucket (contains `estampados/`)
        root: PathBuf,
    },
    /// List the designs of one category
    Designs { root: PathBuf, category: String },
    /// Print the preview envelope for a set of slots
    Preview {
        #[arg(long)]
        anime: Option<String>,
        #[arg(long)]
        espalda: Option<String>,
        #[arg(long)]
        pecho: Option<String>,
        #[arg(long)]
        manga1: Option<String>,
        #[arg(long)]
        manga2: Option<String>,
    },
    /// Print the messaging deep link sharing a configuration URL
    Share { url: String },
}

/// Collect object keys below `root`, relative to it and `/`-separated, the
/// way they would appear in the bucket.
fn collect_keys(root: &Path) -> Result<Vec<String>, CatalogError> {
    let mut keys = Vec::new();
    let mut stack = vec![root.join(ROOT_PREFIX)];
    while let Some(dir) = stack.pop() {
        let mut entries = std::fs::read_dir(&dir)?.collect::<Result<Vec<_>, std::io::Error>>()?;
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                stack.push(path);
                continue;
            }
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            log::debug!("found {key}");
            keys.push(key);
        }
    }
    Ok(keys)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CatalogError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn run(cli: Cli) -> Result<String, CatalogError> {
    match cli.command {
        Command::Categories { root } => {
            let keys = collect_keys(&root)?;
            let categories = categories_from_keys(ROOT_PREFIX, keys.iter().map(String::as_str));
            to_json(&CategoriesResponse::new(categories), cli.pretty)
        }
        Command::Designs { root, category } => {
            let keys = collect_keys(&root)?;
            let designs =
                designs_from_keys(ROOT_PREFIX, &category, keys.iter().map(String::as_str));
            to_json(&DesignsResponse::new(category, designs), cli.pretty)
        }
        Command::Preview {
            anime,
            espalda,
            pecho,
            manga1,
            manga2,
        } => {
            let request = PreviewRequest {
                anime,
                espalda,
                pecho,
                manga1,
                manga2,
            };
            to_json(&request.compose("/api")?, cli.pretty)
        }
        Command::Share { url } => Ok(share_link(&url)),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("estampados");
        for (folder, file) in [("A", "x.png"), ("A", "y.png"), ("A", "notes.txt"), ("B", "z.png")] {
            std::fs::create_dir_all(base.join(folder)).unwrap();
            std::fs::write(base.join(folder).join(file), b"png").unwrap();
        }
        dir
    }

    #[test]
    fn test_collect_keys_relative() {
        let dir = mirror();
        let mut keys = collect_keys(dir.path()).unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "estampados/A/notes.txt",
                "estampados/A/x.png",
                "estampados/A/y.png",
                "estampados/B/z.png",
            ]
        );
    }

    #[test]
    fn test_designs_command() {
        let dir = mirror();
        let out = run(Cli {
            pretty: false,
            command: Command::Designs {
                root: dir.path().to_path_buf(),
                category: "A".into(),
            },
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_missing_mirror_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_keys(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
