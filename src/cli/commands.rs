//! Command dispatch: each mutating command is one load → mutate → save cycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, KindArg};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::codec;
use crate::config::{global_config_path, Settings};
use crate::errors::OutlineResult;
use crate::mutation::{self, EditValues};
use crate::outline::{Document, NodeKind, OutlineNode};
use crate::path::NodePath;
use crate::reorder;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file }) => _show(file),
        Some(Commands::Add { file, kind, at }) => _add(file, *kind, at.as_deref()),
        Some(Commands::Edit {
            file,
            path,
            label,
            feed_url,
            site_url,
        }) => _edit(file, path, label.clone(), feed_url.clone(), site_url.clone()),
        Some(Commands::Delete { file, path }) => _delete(file, path),
        Some(Commands::Move { file, source, dest }) => _move(file, source, dest),
        Some(Commands::Export { file, output }) => _export(file, output.as_deref()),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "rsopml", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn load_document(file: &Path) -> OutlineResult<Document> {
    let text = fs::read_to_string(file)?;
    codec::parse(&text)
}

fn store_document(file: &Path, document: &Document) -> OutlineResult<()> {
    fs::write(file, codec::serialize(document))?;
    Ok(())
}

#[instrument]
fn _show(file: &Path) -> CliResult<()> {
    let document = load_document(file)?;
    debug!(nodes = document.node_count(), "loaded document");
    if document.is_empty() {
        output::info("(empty document)");
        return Ok(());
    }
    for root in &document.roots {
        output::info(&render_node(root));
    }
    Ok(())
}

fn render_node(node: &OutlineNode) -> Tree<String> {
    match node {
        OutlineNode::Folder { label, children } => {
            let leaves: Vec<Tree<String>> = children
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(render_node)
                .collect();
            Tree::new(format!("{}/", label)).with_leaves(leaves)
        }
        OutlineNode::Feed {
            label, feed_url, ..
        } => match feed_url {
            Some(url) => Tree::new(format!("{} ({})", label, url)),
            None => Tree::new(label.clone()),
        },
    }
}

#[instrument]
fn _add(file: &Path, kind: KindArg, at: Option<&str>) -> CliResult<()> {
    let document = load_document(file)?;
    let target = at.map(NodePath::from_key).transpose()?;
    let next = mutation::add(&document, target.as_ref(), kind.into())?;
    store_document(file, &next)?;
    output::success(&format!("added {}", NodeKind::from(kind)));
    Ok(())
}

#[instrument]
fn _edit(
    file: &Path,
    path: &str,
    label: Option<String>,
    feed_url: Option<String>,
    site_url: Option<String>,
) -> CliResult<()> {
    let document = load_document(file)?;
    let path = NodePath::from_key(path)?;
    let values = EditValues {
        label,
        feed_url,
        site_url,
    };
    let next = mutation::edit(&document, &path, &values)?;
    store_document(file, &next)?;
    output::success(&format!("edited {}", path));
    Ok(())
}

#[instrument]
fn _delete(file: &Path, path: &str) -> CliResult<()> {
    let document = load_document(file)?;
    let path = NodePath::from_key(path)?;
    let subtree = document.resolve(&path)?.subtree_len();
    let next = mutation::delete(&document, &path)?;
    store_document(file, &next)?;
    output::success(&format!("deleted {} ({} nodes)", path, subtree));
    Ok(())
}

#[instrument]
fn _move(file: &Path, source: &str, dest: &str) -> CliResult<()> {
    let document = load_document(file)?;
    let source = NodePath::from_key(source)?;
    let dest = NodePath::from_key(dest)?;
    let outcome = reorder::move_node(&document, &source, &dest)?;
    store_document(file, &outcome.document)?;
    output::success(&format!("moved {} -> {}", source, outcome.new_path));
    Ok(())
}

#[instrument]
fn _export(file: &Path, output_path: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load()?;
    let document = load_document(file)?;
    let target: PathBuf = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&settings.export_filename));
    fs::write(&target, codec::serialize_with_title(&document, &settings.export_title))
        .map_err(crate::errors::OutlineError::Io)?;
    output::action("exported", &target.display());
    Ok(())
}

#[instrument]
fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::header("# Effective configuration");
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            output::info(&Settings::template());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::info("(no config directory available)"),
            }
            Ok(())
        }
    }
}
