//! Command dispatch: loads settings and documents, runs one operation, writes back.

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::application::services::DocumentService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::value::TreeValue;
use crate::config::Settings;
use crate::display::TreeRender;
use crate::domain::{
    delete, delete_subtree, edit, find, insert_at_with, insert_with, Node, TreeMode,
};
use crate::infrastructure::RealFileSystem;

type Tree = Node<TreeValue>;

/// Everything a command needs, built once per invocation.
struct Context {
    settings: Settings,
    documents: DocumentService,
}

impl Context {
    fn load(&self, file: &Path) -> CliResult<Option<Tree>> {
        Ok(self.documents.read(file)?)
    }

    fn load_root(&self, file: &Path) -> CliResult<Tree> {
        self.load(file)?
            .ok_or_else(|| CliError::Usage(format!("{} holds no tree", file.display())))
    }

    fn save(&self, root: Option<&Tree>, file: &Path) -> CliResult<()> {
        Ok(self.documents.write(root, file)?)
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // completion needs no settings
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let ctx = Context {
        settings: Settings::load(cli.config.as_deref())?,
        documents: DocumentService::new(Arc::new(RealFileSystem)),
    };
    debug!("settings: {:?}", ctx.settings);

    match command {
        Commands::New { file, value } => _new(&ctx, file, value),
        Commands::Show {
            file,
            min_depth,
            max_depth,
        } => _show(&ctx, file, *min_depth, *max_depth),
        Commands::Insert {
            file,
            path,
            value,
            general,
            binary,
            at,
        } => {
            let mode = if *general || *at {
                TreeMode::General
            } else if *binary {
                TreeMode::Binary
            } else {
                ctx.settings.default_mode
            };
            _insert(&ctx, file, path, value, mode, *at)
        }
        Commands::Find { file, value } => _find(&ctx, file, value),
        Commands::Edit { file, old, new } => _edit(&ctx, file, old, new),
        Commands::Delete { file, value } => _delete(&ctx, file, value),
        Commands::Clear { file } => _clear(&ctx, file),
        Commands::Demo => _demo(&ctx),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip(ctx))]
fn _new(ctx: &Context, file: &Path, value: &TreeValue) -> CliResult<()> {
    if ctx.documents.exists(file) {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists",
            file.display()
        )));
    }
    let root = Node::with_mode(value.clone(), ctx.settings.default_mode);
    ctx.save(Some(&root), file)?;
    output::action("Created", &file.display());
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _show(
    ctx: &Context,
    file: &Path,
    min_depth: Option<usize>,
    max_depth: Option<usize>,
) -> CliResult<()> {
    let Some(root) = ctx.load(file)? else {
        output::info("(empty tree)");
        return Ok(());
    };

    output::header(&format!(
        "{} ({} nodes, depth {})",
        file.display(),
        root.size(),
        root.depth()
    ));

    let max_depth = max_depth.or(ctx.settings.max_depth);
    if min_depth.is_none() && max_depth.is_none() {
        output::tree(&root.to_tree_string());
        return Ok(());
    }

    let min = min_depth.unwrap_or(0);
    let max = max_depth.unwrap_or(usize::MAX);
    if min > max {
        return Err(CliError::InvalidArgs(format!(
            "--min-depth {min} is greater than --max-depth {max}"
        )));
    }
    for tree in root.render_range(min, max) {
        output::tree(&tree);
    }
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _insert(
    ctx: &Context,
    file: &Path,
    path: &str,
    value: &TreeValue,
    mode: TreeMode,
    at: bool,
) -> CliResult<()> {
    let mut root = ctx.load(file)?;
    let resolver = ctx.settings.resolver();
    if at {
        insert_at_with(&resolver, root.as_mut(), path, value.clone())?;
    } else {
        insert_with(&resolver, root.as_mut(), path, value.clone(), mode)?;
    }
    ctx.save(root.as_ref(), file)?;
    info!("inserted {} at {}", value, path);
    output::success(&format!("Inserted {value} at '{path}' ({mode})"));
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _find(ctx: &Context, file: &Path, value: &TreeValue) -> CliResult<()> {
    let root = ctx.load(file)?;
    match find(root.as_ref(), value) {
        Some(node) => {
            output::success(&format!("Found {value}"));
            output::tree(&node.to_tree_string());
        }
        None => output::failure(&format!("{value} not found")),
    }
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _edit(ctx: &Context, file: &Path, old: &TreeValue, new: &TreeValue) -> CliResult<()> {
    let mut root = ctx.load(file)?;
    if edit(root.as_mut(), old, new.clone()) {
        ctx.save(root.as_ref(), file)?;
        output::success(&format!("Changed {old} to {new}"));
    } else {
        output::failure(&format!("{old} not found"));
    }
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _delete(ctx: &Context, file: &Path, value: &TreeValue) -> CliResult<()> {
    let root = ctx.load(file)?;
    let before = root.as_ref().map_or(0, Node::size);
    let root = delete(root, value);
    let after = root.as_ref().map_or(0, Node::size);

    if before == after {
        output::failure(&format!("{value} not found"));
        return Ok(());
    }
    ctx.save(root.as_ref(), file)?;
    match root {
        Some(_) => output::success(&format!("Deleted {value} ({} nodes)", before - after)),
        None => output::success(&format!("Deleted root {value}, tree is empty")),
    }
    Ok(())
}

#[instrument(level = "debug", skip(ctx))]
fn _clear(ctx: &Context, file: &Path) -> CliResult<()> {
    let mut root = ctx.load_root(file)?;
    delete_subtree(Some(&mut root));
    ctx.save(Some(&root), file)?;
    output::success(&format!("Cleared {}", file.display()));
    Ok(())
}

fn _demo(ctx: &Context) -> CliResult<()> {
    let resolver = ctx.settings.resolver();
    let v = |s: &str| s.parse::<TreeValue>().unwrap_or_else(|e| match e {});

    output::header("Binary tree");
    let mut root = Node::new(v("1"));
    for (path, value) in [("L", "2"), ("R", "3"), ("LL", "4"), ("LR", "5")] {
        insert_with(&resolver, Some(&mut root), path, v(value), TreeMode::Binary)?;
    }
    output::tree(&root);

    if let Some(node) = find(Some(&root), &v("5")) {
        output::success(&format!("find 5: {}", node.value));
    }
    if edit(Some(&mut root), &v("5"), v("50")) {
        output::success("edit 5 -> 50");
    }
    let Some(mut root) = delete(Some(root), &v("4")) else {
        return Err(CliError::Usage("demo tree vanished".to_string()));
    };
    output::success("delete 4");
    output::tree(&root);

    output::header("Document");
    let text = ctx.documents.render(Some(&root))?;
    output::info(text.trim_end());
    let reloaded: Option<Tree> = ctx.documents.parse(&text, Path::new("<demo>"))?;
    if reloaded.as_ref() == Some(&root) {
        output::success("round trip preserved the tree");
    }

    delete_subtree(Some(&mut root));
    output::success(&format!("delete_subtree leaves {} node", root.size()));

    output::header("General tree");
    let mut ceo = Node::general(v("CEO"));
    for (path, value) in [("0", "CTO"), ("1", "CFO"), ("2", "COO")] {
        insert_with(&resolver, Some(&mut ceo), path, v(value), TreeMode::General)?;
    }
    let sep = resolver.separator();
    for (path, value) in [
        (format!("0{sep}0"), "Dev Manager"),
        (format!("0{sep}1"), "QA Manager"),
    ] {
        insert_with(&resolver, Some(&mut ceo), &path, v(value), TreeMode::General)?;
    }
    output::tree(&ceo);

    let Some(ceo) = delete(Some(ceo), &v("CFO")) else {
        return Err(CliError::Usage("demo tree vanished".to_string()));
    };
    output::success(&format!("delete CFO leaves {} children", ceo.child_count()));
    output::tree(&ceo);
    Ok(())
}
