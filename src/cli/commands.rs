//! CLI command implementations

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

use mdoutline::{
    flatten, line_from_position, parse, position_from_line, search, statistics, HeadingNode,
    JsonFileStore, OutlineNavigator, OutlineStatistics,
};

use crate::config::Config;

/// Shared options for every command
pub struct Output {
    /// Emit JSON instead of text
    pub json: bool,
}

/// Read a markdown document from a path, or stdin for "-"
fn read_document(path: &Path) -> Result<String> {
    let mut bytes = Vec::new();
    
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
    } else {
        bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
    }
    
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Key used for a document in the fold store
fn document_id(path: &Path) -> String {
    if path == Path::new("-") {
        return "<stdin>".to_string();
    }
    
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

fn open_navigator(config: &Config, path: &Path, content: &str) -> Result<OutlineNavigator<JsonFileStore>> {
    let store = JsonFileStore::new(config.state_file());
    let mut nav = OutlineNavigator::new(document_id(path), store)?;
    nav.refresh(content);
    Ok(nav)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Show the outline as an indented tree
pub fn tree(config: &Config, output: &Output, path: &Path, all: bool) -> Result<()> {
    let content = read_document(path)?;
    
    if output.json {
        return print_json(&parse(&content));
    }
    
    let nav = open_navigator(config, path, &content)?;
    if nav.forest().is_empty() {
        println!("No headings found.");
        return Ok(());
    }
    
    let folds = if all { None } else { Some(&nav) };
    print_nodes(nav.forest(), 0, folds);
    
    Ok(())
}

fn print_nodes(nodes: &[HeadingNode], depth: usize, folds: Option<&OutlineNavigator<JsonFileStore>>) {
    for node in nodes {
        let expanded = folds.map_or(true, |nav| nav.is_expanded(&node.id));
        let marker = match (node.children.is_empty(), expanded) {
            (true, _) => "•",
            (false, true) => "▾",
            (false, false) => "▸",
        };
        
        println!("{}{} {}  \x1b[90m:{}\x1b[0m", "  ".repeat(depth), marker, node.text, node.line);
        
        if expanded {
            print_nodes(&node.children, depth + 1, folds);
        }
    }
}

/// List every heading in document order
pub fn flat(output: &Output, path: &Path) -> Result<()> {
    let content = read_document(path)?;
    let entries = flatten(&parse(&content));
    
    if output.json {
        return print_json(&entries);
    }
    
    for entry in entries {
        println!("{:>5}  {} {}", entry.line, "#".repeat(entry.level as usize), entry.text);
    }
    
    Ok(())
}

/// Find headings by text
pub fn search_headings(output: &Output, path: &Path, query: &str) -> Result<()> {
    let content = read_document(path)?;
    let hits = search(&parse(&content), query);
    
    if output.json {
        return print_json(&hits);
    }
    
    if hits.is_empty() {
        println!("No headings match '{}'", query);
        return Ok(());
    }
    
    for entry in hits {
        println!("{:>5}  {} {}", entry.line, "#".repeat(entry.level as usize), entry.text);
    }
    
    Ok(())
}

/// Show heading counts
pub fn stats(output: &Output, path: &Path) -> Result<()> {
    let content = read_document(path)?;
    let stats = statistics(&parse(&content));
    
    if output.json {
        return print_json(&stats);
    }
    
    println!("Outline Statistics");
    println!("==================");
    println!("Headings: {}", stats.total);
    for (level, count) in &stats.by_level {
        println!("  H{}:     {}", level, count);
    }
    
    Ok(())
}

/// Print a table of contents
pub fn toc(
    config: &Config,
    output: &Output,
    path: &Path,
    max_level: Option<u8>,
    slug: bool,
    indent: Option<usize>,
) -> Result<()> {
    let content = read_document(path)?;
    
    let mut toc_config = config.toc.clone();
    if max_level.is_some() {
        toc_config.max_level = max_level;
    }
    if indent.is_some() {
        toc_config.indent = indent;
    }
    toc_config.slug |= slug;
    
    let toc = mdoutline::generate_toc_with(&parse(&content), &toc_config.options());
    
    if output.json {
        return print_json(&json!({ "toc": toc }));
    }
    
    if !toc.is_empty() {
        println!("{}", toc);
    }
    
    Ok(())
}

/// Line number for a character offset
pub fn line(output: &Output, path: &Path, position: i64) -> Result<()> {
    let content = read_document(path)?;
    let line = line_from_position(&content, position);
    
    if output.json {
        return print_json(&json!({ "position": position, "line": line }));
    }
    
    println!("{}", line);
    Ok(())
}

/// Character offset for a line number
pub fn pos(output: &Output, path: &Path, line: i64) -> Result<()> {
    let content = read_document(path)?;
    let position = position_from_line(&content, line);
    
    if output.json {
        return print_json(&json!({ "line": line, "position": position }));
    }
    
    println!("{}", position);
    Ok(())
}

/// Toggle whether a heading is collapsed
pub fn fold(config: &Config, output: &Output, path: &Path, id: &str) -> Result<()> {
    if path == Path::new("-") {
        bail!("Fold state needs a file path, not stdin");
    }
    
    let content = read_document(path)?;
    let mut nav = open_navigator(config, path, &content)?;
    
    if !nav.select(id) {
        bail!("No heading '{}' in {}", id, path.display());
    }
    let expanded = nav.toggle(id)?;
    
    if output.json {
        return print_json(&json!({ "id": id, "expanded": expanded }));
    }
    
    let heading = nav.selected().map(|e| e.text.clone()).unwrap_or_default();
    let state = if expanded { "expanded" } else { "collapsed" };
    println!("✓ {} ({}) {}", heading, id, state);
    
    Ok(())
}

/// Summarize the outline of every markdown file under a directory
pub fn scan(output: &Output, dir: &Path) -> Result<()> {
    let mut results: Vec<(String, OutlineStatistics)> = Vec::new();
    let mut errors = 0;
    
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "md"))
    {
        let file_path = entry.path();
        let relative_path = file_path.strip_prefix(dir).unwrap_or(file_path);
        
        let content = match read_document(file_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading {}: {:#}", relative_path.display(), e);
                errors += 1;
                continue;
            }
        };
        
        results.push((relative_path.display().to_string(), statistics(&parse(&content))));
    }
    
    if output.json {
        let files: Vec<_> = results
            .iter()
            .map(|(file, stats)| json!({ "file": file, "statistics": stats }))
            .collect();
        return print_json(&files);
    }
    
    let mut total = 0;
    for (file, stats) in &results {
        total += stats.total;
        println!("{:>5}  {}", stats.total, file);
    }
    
    println!();
    println!("✓ Scanned {} files, {} headings", results.len(), total);
    if errors > 0 {
        println!("  {} errors", errors);
    }
    
    Ok(())
}

/// Write a default config file
pub fn init(config_path: &Path) -> Result<()> {
    let existed = config_path.exists();
    let path = Config::create_default(config_path)?;
    
    if existed {
        println!("Config already exists: {}", path.display());
    } else {
        println!("✓ Created {}", path.display());
    }
    
    Ok(())
}
