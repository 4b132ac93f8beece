//! Tategumi CLI
//!
//! Lays out an html document into pages and prints the box tree of each
//! page, either as a colored outline or as JSON.

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tategumi_layout::{
    BoxFlow, BoxRenderer, LayoutBox, LayoutConfig, LayoutEngine, Page, StyleSheet, TextToken,
    render_page,
};

/// Tategumi: incremental, paginated CJK text layout
#[derive(Parser, Debug)]
#[command(name = "tategumi")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a file on vertical 600x400 pages
    tategumi ./novel.html

    # Horizontal pages from an inline string
    tategumi --flow horizontal-tb --html '<p>吾輩は猫である。</p>'

    # Dump the first two pages as JSON
    tategumi --json --pages 2 ./novel.html

    # Which page does an anchor land on
    tategumi --anchor chapter2 ./novel.html
"#)]
struct Cli {
    /// Path to the html file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Lay out an html string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Page width in pixels
    #[arg(long, default_value = "600")]
    width: i32,

    /// Page height in pixels
    #[arg(long, default_value = "400")]
    height: i32,

    /// Writing flow of the document root (vertical-rl, horizontal-tb, ...)
    #[arg(long, value_name = "FLOW")]
    flow: Option<BoxFlow>,

    /// Style sheet appended to the user-agent sheet
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Engine configuration as JSON; unset fields keep their defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print pages as JSON instead of an outline
    #[arg(short, long)]
    json: bool,

    /// Stop after this many pages
    #[arg(long, value_name = "N")]
    pages: Option<usize>,

    /// Report the page an anchor was laid out on (repeatable)
    #[arg(long, value_name = "NAME")]
    anchor: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let markup = load_markup(&cli)?;
    let config = load_config(&cli)?;
    let mut sheet = StyleSheet::user_agent();
    if let Some(ref path) = cli.css {
        let css = fs::read_to_string(path)
            .with_context(|| format!("failed to read style sheet {}", path.display()))?;
        sheet.add_css(&css);
    }

    let mut engine = LayoutEngine::new(&markup, cli.width, cli.height, config, Rc::new(sheet))?;
    let limit = cli.pages.unwrap_or(usize::MAX);
    let mut renderer = ColorTreeRenderer::default();
    let mut json_pages = Vec::new();

    while engine.page_count() < limit {
        let Some(page) = engine.try_next_page()? else {
            break;
        };
        if cli.json {
            json_pages.push(page_json(&page));
        } else {
            render_page(&mut renderer, &page);
        }
    }
    renderer.flush();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_pages)?);
    }

    for name in &cli.anchor {
        match engine.anchor_page(name) {
            Some(index) => eprintln!("#{name}: page {}", index + 1),
            None => eprintln!("#{name}: {}", "not laid out".red()),
        }
    }
    for err in engine.diagnostics() {
        eprintln!("{}", format!("error: {err}").red());
    }
    let size = engine.page_size();
    eprintln!(
        "{}",
        format!(
            "{} pages of {}x{}, {} lines{}",
            engine.page_count(),
            size.width,
            size.height,
            engine.line_count(),
            if engine.has_next_page() { ", more to come" } else { "" }
        )
        .dimmed()
    );
    Ok(())
}

/// Markup from `--html` or the file argument.
fn load_markup(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("a file path or --html is required")
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LayoutConfig> {
    let mut config = match cli.config {
        Some(ref path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if let Some(flow) = cli.flow {
        config.default_flow = flow;
    }
    Ok(config)
}

fn page_json(page: &Page) -> serde_json::Value {
    serde_json::json!({
        "page": page.index + 1,
        "root": page.root,
    })
}

/// Prints the box tree of each page as an indented, colored outline.
#[derive(Debug, Default)]
struct ColorTreeRenderer {
    pending: Option<String>,
    text: String,
}

impl ColorTreeRenderer {
    fn flush(&mut self) {
        if let Some(line) = self.pending.take() {
            if self.text.is_empty() {
                println!("{line}");
            } else {
                println!("{line} {}", format!("\"{}\"", self.text).yellow());
            }
        }
        self.text.clear();
    }
}

impl BoxRenderer for ColorTreeRenderer {
    fn begin_page(&mut self, page: &Page) {
        self.flush();
        println!("{}", format!("=== Page {} ===", page.index + 1).bold());
    }

    fn enter_box(&mut self, layout_box: &LayoutBox, depth: usize) {
        self.flush();
        let indent = "  ".repeat(depth);
        let mut line = format!(
            "{indent}{} {} {}",
            layout_box.box_type.cyan(),
            format!("<{}>", layout_box.markup).green(),
            format!("{}x{}", layout_box.size.width, layout_box.size.height).dimmed()
        );
        if let Some(line_no) = layout_box.line_no {
            line.push_str(&format!(" #{line_no}").dimmed().to_string());
        }
        if layout_box.hyphenated {
            line.push_str(&" hyphenated".magenta().to_string());
        }
        if layout_box.content.is_some() {
            line.push_str(&" lazy".magenta().to_string());
        }
        self.pending = Some(line);
    }

    fn text(&mut self, token: &TextToken, _depth: usize) {
        self.text.push_str(&token.data);
    }

    fn leave_box(&mut self, _layout_box: &LayoutBox, _depth: usize) {
        self.flush();
    }
}
