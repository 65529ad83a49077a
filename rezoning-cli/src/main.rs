//! Rezoning guide CLI — content validation and headless guide operations.
//!
//! Commands:
//! - `check` — parse and validate a guide content file
//! - `search` — run a search and list the matches
//! - `glossary` — list glossary entries, optionally filtered
//! - `walk` — follow decision tree choices by number and show where they lead

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rezoning_core::builder::CLASS_CHOICE;
use rezoning_core::{
    Guide, GuideConfig, GuideContent, LogSink, MatchKind, MemoryStore, MemoryTree, NodeId,
    PresentationTree,
};

#[derive(Parser)]
#[command(name = "rezoning", about = "Rezoning guide CLI — validate content and explore a guide")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a guide content file.
    Check {
        /// Path to the guide TOML file.
        file: PathBuf,
    },
    /// Search timeline cards and detail panels.
    Search {
        /// Text to look for (case-insensitive).
        query: String,

        /// Guide TOML file. Defaults to the bundled sample guide.
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// List glossary entries.
    Glossary {
        /// Only show entries containing this text.
        filter: Option<String>,

        /// Guide TOML file. Defaults to the bundled sample guide.
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Walk the decision tree. Each number picks a choice (1-based) on the
    /// question currently shown.
    Walk {
        choices: Vec<usize>,

        /// Guide TOML file. Defaults to the bundled sample guide.
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Check { file } => run_check(&file)?,
        Commands::Search { query, content } => {
            let mut guide = open_guide(content.as_deref())?;
            run_search(&mut guide, &query)?
        }
        Commands::Glossary { filter, content } => {
            let mut guide = open_guide(content.as_deref())?;
            run_glossary(&mut guide, filter.as_deref().unwrap_or(""))
        }
        Commands::Walk { choices, content } => {
            let mut guide = open_guide(content.as_deref())?;
            run_walk(&mut guide, &choices)?
        }
    };
    print!("{output}");
    Ok(())
}

fn load_content(path: Option<&Path>) -> Result<GuideContent> {
    let content = match path {
        Some(path) => GuideContent::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GuideContent::sample()?,
    };
    Ok(content)
}

/// A guide with in-memory persistence; nothing is written to disk.
fn open_guide(path: Option<&Path>) -> Result<Guide<MemoryTree>> {
    let content = load_content(path)?;
    let guide = Guide::from_content(
        &content,
        GuideConfig::default(),
        Box::new(MemoryStore::new()),
        Box::new(LogSink),
    )?;
    Ok(guide)
}

fn run_check(path: &Path) -> Result<String> {
    let content = load_content(Some(path))?;
    Ok(format!(
        "{}: ok\n  tabs:      {}\n  stages:    {}\n  questions: {}\n  results:   {}\n  glossary:  {}\n",
        content.title,
        content.tabs.len(),
        content.stages.len(),
        content.decision_tree.questions.len(),
        content.decision_tree.results.len(),
        content.glossary.len(),
    ))
}

fn run_search(guide: &mut Guide<MemoryTree>, query: &str) -> Result<String> {
    let matches = guide.perform_search(query);
    if let Some(notice) = guide.acknowledge_alert() {
        bail!(notice);
    }

    let mut out = String::new();
    for hit in &matches {
        let kind = match hit.kind {
            MatchKind::Timeline => "timeline",
            MatchKind::Detail => "detail",
        };
        writeln!(out, "{kind:<9} {}", hit.title)?;
    }
    if let Some(note) = guide.notifications().latest() {
        writeln!(out, "{}", note.message)?;
    }
    Ok(out)
}

fn run_glossary(guide: &mut Guide<MemoryTree>, filter: &str) -> String {
    guide.filter_glossary(filter);
    let tree = guide.tree();
    let mut out = String::new();
    for &entry in &guide.registry().glossary.entries {
        if !tree.is_visible(entry) {
            continue;
        }
        let children = tree.children(entry);
        let text = |i: usize| children.get(i).and_then(|&n| tree.own_text(n)).unwrap_or("");
        out.push_str(&format!("{}: {}\n", text(0), text(1)));
    }
    out
}

/// Choice buttons of the question on screen, if one is.
fn visible_choices(guide: &Guide<MemoryTree>) -> Option<Vec<NodeId>> {
    let tree = guide.tree();
    let question = guide
        .registry()
        .modal
        .questions
        .iter()
        .find(|q| tree.is_visible(q.node))?;
    Some(
        tree.children(question.node)
            .into_iter()
            .filter(|&c| tree.has_class(c, CLASS_CHOICE))
            .collect(),
    )
}

fn run_walk(guide: &mut Guide<MemoryTree>, picks: &[usize]) -> Result<String> {
    let opener = guide.registry().modal.opener;
    guide.click(opener);

    let mut out = String::new();
    for (i, &pick) in picks.iter().enumerate() {
        let Some(choices) = visible_choices(guide) else {
            bail!("choice {} given but the walk already reached a result", i + 1);
        };
        let Some(&button) = pick.checked_sub(1).and_then(|idx| choices.get(idx)) else {
            bail!("choice {pick} out of range (1-{})", choices.len());
        };
        let label = guide.tree().own_text(button).unwrap_or("").to_string();
        writeln!(out, "> {label}")?;
        guide.click(button);
    }

    let tree = guide.tree();
    let modal = &guide.registry().modal;
    if let Some(question) = modal.questions.iter().find(|q| tree.is_visible(q.node)) {
        writeln!(
            out,
            "Step {}: {}",
            question.step,
            tree.own_text(question.node).unwrap_or("")
        )?;
        for (n, choice) in visible_choices(guide).unwrap_or_default().iter().enumerate() {
            writeln!(out, "  {}. {}", n + 1, tree.own_text(*choice).unwrap_or(""))?;
        }
    } else if let Some(result) = modal.results.iter().find(|r| tree.is_visible(r.node)) {
        let children = tree.children(result.node);
        let text = |i: usize| children.get(i).and_then(|&n| tree.own_text(n)).unwrap_or("");
        writeln!(out, "Result: {}\n{}", text(0), text(1))?;
    } else {
        writeln!(out, "Step {}: (no question)", guide.state().decision_tree_step)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Guide<MemoryTree> {
        open_guide(None).unwrap()
    }

    #[test]
    fn check_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.toml");
        std::fs::write(&path, rezoning_core::content::SAMPLE_GUIDE).unwrap();
        let out = run_check(&path).unwrap();
        assert!(out.starts_with("Understanding Rezoning: ok"));
        assert!(out.contains("stages:    6"));
    }

    #[test]
    fn check_rejects_missing_file() {
        assert!(run_check(Path::new("/nonexistent/guide.toml")).is_err());
    }

    #[test]
    fn search_lists_matches_then_summary() {
        let out = run_search(&mut sample(), "arborist").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, vec!["detail    Staff Review", "Found 1 result"]);
    }

    #[test]
    fn empty_search_is_an_error() {
        let err = run_search(&mut sample(), "  ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a search term");
    }

    #[test]
    fn glossary_filter() {
        let out = run_glossary(&mut sample(), "setback");
        assert_eq!(
            out,
            "Setback: The required distance between a building and a property line.\n"
        );
        assert_eq!(run_glossary(&mut sample(), "").lines().count(), 6);
    }

    #[test]
    fn walk_to_a_result() {
        let out = run_walk(&mut sample(), &[2]).unwrap();
        assert!(out.contains("Result: Rezoning required"));
    }

    #[test]
    fn walk_without_choices_shows_step_one() {
        let out = run_walk(&mut sample(), &[]).unwrap();
        assert!(out.starts_with("Step 1: "));
        assert!(out.contains("  3. "));
    }

    #[test]
    fn walk_rejects_bad_choices() {
        assert!(run_walk(&mut sample(), &[0]).is_err());
        assert!(run_walk(&mut sample(), &[9]).is_err());
        assert!(run_walk(&mut sample(), &[2, 1]).is_err());
    }
}
