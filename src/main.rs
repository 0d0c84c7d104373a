//! xnode CLI
//!
//! Prints the scan events or the element tree of tag-language documents.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use xnode::dom::{Document, NodeKind};
use xnode::{Event, ScanError};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Scan tag-language documents and print what the scanner sees
#[derive(Parser, Debug)]
#[command(name = "xnode", version, about)]
struct Opt {
    /// Files to scan, `-` reads standard input
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the element tree instead of raw events
    #[arg(long)]
    tree: bool,

    /// Number of worker threads for scanning several files
    #[arg(long, short = 'j')]
    jobs: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::parse();

    let inputs = opt
        .files
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>>>()?;

    let failed = if opt.tree {
        run_tree(&opt, &inputs)?
    } else {
        run_events(&opt, &inputs)?
    };

    if failed > 0 {
        bail!("{failed} of {} input(s) failed to scan", inputs.len());
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_events(opt: &Opt, inputs: &[String]) -> Result<usize> {
    let results = scan_all(opt, inputs, |input| xnode::parse_events(input))?;
    report(opt, results, |out, events| {
        for event in events {
            writeln!(out, "{}", format_event(&event))?;
        }
        Ok(())
    })
}

fn run_tree(opt: &Opt, inputs: &[String]) -> Result<usize> {
    let results = scan_all(opt, inputs, |input| Document::parse(input))?;
    report(opt, results, |out, doc| print_tree(out, &doc))
}

/// Scan inputs, on the Rayon pool when there is more than one
#[cfg(feature = "parallel")]
fn scan_all<'a, T, F>(opt: &Opt, inputs: &'a [String], f: F) -> Result<Vec<Result<T, ScanError>>>
where
    T: Send,
    F: Fn(&'a str) -> Result<T, ScanError> + Sync + Send,
{
    use rayon::prelude::*;

    if inputs.len() < 2 {
        return Ok(inputs.iter().map(|input| f(input.as_str())).collect());
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = opt.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build().context("failed to start worker threads")?;
    Ok(pool.install(|| inputs.par_iter().map(|input| f(input.as_str())).collect()))
}

#[cfg(not(feature = "parallel"))]
fn scan_all<'a, T, F>(opt: &Opt, inputs: &'a [String], f: F) -> Result<Vec<Result<T, ScanError>>>
where
    F: Fn(&'a str) -> Result<T, ScanError>,
{
    if opt.jobs.is_some() {
        log::warn!("--jobs has no effect without the parallel feature");
    }
    Ok(inputs.iter().map(|input| f(input.as_str())).collect())
}

/// Print each result in input order, returning the number of failures
fn report<T>(
    opt: &Opt,
    results: Vec<Result<T, ScanError>>,
    print: impl Fn(&mut dyn Write, T) -> io::Result<()>,
) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;

    for (path, result) in opt.files.iter().zip(results) {
        if opt.files.len() > 1 {
            writeln!(out, "==> {} <==", path.display())?;
        }
        match result {
            Ok(value) => print(&mut out, value)?,
            Err(err) => {
                failed += 1;
                log::error!("{}: {err}", path.display());
            }
        }
    }
    Ok(failed)
}

fn format_event(event: &Event<'_>) -> String {
    match event {
        Event::Cdata(text) => format!("cdata {text:?}"),
        Event::BeginTag { name, kind } => format!("begin-tag {name} {kind:?}"),
        Event::Attribute { key, value } => format!("attribute {key}={value:?}"),
        Event::FinishTag { begin, end } => match event.tag_form() {
            Some(form) => format!("finish-tag {begin:?} {end:?} ({form:?})"),
            None => format!("finish-tag {begin:?} {end:?}"),
        },
        Event::Comment(text) => format!("comment {text:?}"),
        Event::Instruction(text) => format!("instruction {text:?}"),
    }
}

/// Print one line per node, indented by nesting depth
fn print_tree(out: &mut dyn Write, doc: &Document<'_>) -> io::Result<()> {
    for id in doc.descendants(0) {
        let Some(node) = doc.get_node(id) else {
            continue;
        };
        let pad = "  ".repeat(node.depth as usize);
        match node.kind {
            NodeKind::Element => {
                write!(out, "{pad}<{}", node.value)?;
                for attr in doc.attributes(id) {
                    write!(out, " {}={:?}", attr.name, attr.value)?;
                }
                writeln!(out, "{}>", if node.self_closing { "/" } else { "" })?;
            }
            NodeKind::Text => writeln!(out, "{pad}{:?}", node.value)?,
            NodeKind::Comment => writeln!(out, "{pad}<!{}>", node.value)?,
            NodeKind::Instruction => writeln!(out, "{pad}<?{}?>", node.value)?,
            NodeKind::Document => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(input: &str) -> String {
        let doc = Document::parse(input).unwrap();
        let mut out = Vec::new();
        print_tree(&mut out, &doc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_tree_indents_by_depth() {
        let tree = tree_of("<?pi?><a k='v'><b/>x</a>");
        assert_eq!(tree, "<?pi?>\n<a k=\"v\">\n  <b/>\n  \"x\"\n");
    }

    #[test]
    fn test_print_tree_deep_nesting() {
        let depth = 2_000;
        let tree = tree_of(&"<a>".repeat(depth));

        assert_eq!(tree.lines().count(), depth);
        let last = tree.lines().last().unwrap();
        assert_eq!(last.len(), 2 * (depth - 1) + "<a>".len());
    }

    #[test]
    fn test_format_event() {
        let events = xnode::parse_events("<a/>").unwrap();
        assert_eq!(format_event(&events[0]), "begin-tag a Opened");
        assert_eq!(format_event(&events[1]), "finish-tag Opened Closed (SelfClosing)");
    }
}
