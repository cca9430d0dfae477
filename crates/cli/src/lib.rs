use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_redactor_core::{PageSession, ToolMode, EXPORT_FILE_NAME};
use pdf_redactor_engine::{LopdfRenderer, LopdfWriter, OpenSource, PdfRenderer};
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Pixels per point when rasterizing the edited page.
const RENDER_SCALE: f32 = 2.0;

#[derive(Debug, Parser)]
#[command(name = "pdf-redactor")]
#[command(about = "Redact and annotate PDF pages")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print machine-readable PDF metadata.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Apply redactions and text notes to one page and export it.
    Redact {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 1-based page to edit.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Interaction-surface size as WxH. Defaults to the rendered page
        /// size (1:1 mapping).
        #[arg(long, value_name = "WxH")]
        surface: Option<String>,
        /// Blur rectangle as X,Y,WxH in surface coordinates. Repeatable.
        #[arg(long, value_name = "X,Y,WxH")]
        blur: Vec<String>,
        /// Erase rectangle as X,Y,WxH in surface coordinates. Repeatable.
        #[arg(long, value_name = "X,Y,WxH")]
        erase: Vec<String>,
        /// Text note as TEXT@X,Y in surface coordinates. Repeatable.
        #[arg(long, value_name = "TEXT@X,Y")]
        note: Vec<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    path: String,
    page_count: u32,
    first_page_size_pt: Option<PageSizeOutput>,
}

#[derive(Debug, Serialize)]
struct PageSizeOutput {
    width: f32,
    height: f32,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { file } => run_info(&file),
        Commands::Redact { file, page, surface, blur, erase, note, output } => {
            run_redact(&file, page, surface.as_deref(), &blur, &erase, &note, output.as_deref())
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn run_info(file: &Path) -> Result<()> {
    ensure_file_exists(file)?;

    let mut renderer = LopdfRenderer::new();
    let handle = renderer.open(OpenSource::from(file)).context("failed to open PDF")?;

    let page_count = renderer.page_count(handle)?;
    let first_page_size_pt = if page_count > 0 {
        let size = renderer.page_size(handle, 0)?;
        Some(PageSizeOutput { width: size.width_pt, height: size.height_pt })
    } else {
        None
    };

    let payload = InfoOutput { path: file.display().to_string(), page_count, first_page_size_pt };

    let json = serde_json::to_string_pretty(&payload)?;
    println!("{json}");

    renderer.close(handle)?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_redact(
    file: &Path,
    page: u32,
    surface: Option<&str>,
    blur: &[String],
    erase: &[String],
    notes: &[String],
    output: Option<&Path>,
) -> Result<()> {
    ensure_file_exists(file)?;

    if page == 0 {
        anyhow::bail!("--page is 1-based and must be >= 1");
    }

    let mut renderer = LopdfRenderer::new();
    let handle = renderer.open(OpenSource::from(file)).context("failed to open PDF")?;
    let page_count = renderer.page_count(handle)?;

    if page > page_count {
        anyhow::bail!("page {page} out of range (document has {page_count} page(s))");
    }

    let rendered = renderer
        .render_page(handle, page - 1, RENDER_SCALE)
        .context("failed to render page")?;
    log::debug!(
        "rendered page {page} at {}x{}, applying {} blur / {} erase / {} note edit(s)",
        rendered.width(),
        rendered.height(),
        blur.len(),
        erase.len(),
        notes.len()
    );

    let (display_width, display_height) = match surface {
        Some(spec) => parse_size(spec)?,
        None => (rendered.width(), rendered.height()),
    };

    let mut session = PageSession::new();
    session.document_loaded(page_count);
    while session.page_number() < page {
        session.next_page();
    }
    session.page_rendered(rendered, display_width, display_height);

    for spec in blur {
        apply_rect(&mut session, ToolMode::Blur, spec)?;
    }
    for spec in erase {
        apply_rect(&mut session, ToolMode::Erase, spec)?;
    }
    for spec in notes {
        let (text, x, y) = parse_note(spec)?;
        let id = session.add_text().context("document has no pages")?;
        session.move_annotation(id, x, y);
        session.commit_annotation_text(id, text);
    }

    let bytes = session.export_page(&LopdfWriter::new()).context("failed to compose export")?;

    let output = output.map(ToOwned::to_owned).unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("{}", output.display());

    renderer.close(handle)?;

    Ok(())
}

/// Drive one synthetic drag gesture through the session.
fn apply_rect(session: &mut PageSession, mode: ToolMode, spec: &str) -> Result<()> {
    let (x, y, width, height) = parse_rect(spec)?;

    session.set_mode(mode);
    session.pointer_down(x, y);
    session.pointer_move(x + width, y + height);
    session.pointer_up(x + width, y + height);

    Ok(())
}

fn parse_size(spec: &str) -> Result<(u32, u32)> {
    let (width, height) = spec
        .split_once('x')
        .with_context(|| format!("invalid size {spec:?}, expected WxH"))?;

    Ok((
        width.parse().with_context(|| format!("invalid width in {spec:?}"))?,
        height.parse().with_context(|| format!("invalid height in {spec:?}"))?,
    ))
}

fn parse_rect(spec: &str) -> Result<(f32, f32, f32, f32)> {
    let parts: Vec<&str> = spec.splitn(3, ',').collect();
    let [x, y, extent] = parts.as_slice() else {
        anyhow::bail!("invalid rectangle {spec:?}, expected X,Y,WxH");
    };
    let (width, height) = extent
        .split_once('x')
        .with_context(|| format!("invalid extent in {spec:?}, expected WxH"))?;

    Ok((
        x.trim().parse().with_context(|| format!("invalid x in {spec:?}"))?,
        y.trim().parse().with_context(|| format!("invalid y in {spec:?}"))?,
        width.trim().parse().with_context(|| format!("invalid width in {spec:?}"))?,
        height.trim().parse().with_context(|| format!("invalid height in {spec:?}"))?,
    ))
}

fn parse_note(spec: &str) -> Result<(&str, f32, f32)> {
    let (text, position) = spec
        .rsplit_once('@')
        .with_context(|| format!("invalid note {spec:?}, expected TEXT@X,Y"))?;
    let (x, y) = position
        .split_once(',')
        .with_context(|| format!("invalid note position in {spec:?}, expected X,Y"))?;

    Ok((
        text,
        x.trim().parse().with_context(|| format!("invalid x in {spec:?}"))?,
        y.trim().parse().with_context(|| format!("invalid y in {spec:?}"))?,
    ))
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rect_accepts_negative_extents() {
        assert_eq!(parse_rect("50,50,100x-50").unwrap(), (50.0, 50.0, 100.0, -50.0));
    }

    #[test]
    fn parse_rect_rejects_malformed_specs() {
        assert!(parse_rect("50,50").is_err());
        assert!(parse_rect("50,50,100").is_err());
        assert!(parse_rect("a,b,cxd").is_err());
    }

    #[test]
    fn parse_note_splits_on_last_at_sign() {
        let (text, x, y) = parse_note("mail me @ home@10,20").unwrap();
        assert_eq!(text, "mail me @ home");
        assert_eq!((x, y), (10.0, 20.0));
    }

    #[test]
    fn parse_size_requires_two_dimensions() {
        assert_eq!(parse_size("400x600").unwrap(), (400, 600));
        assert!(parse_size("400").is_err());
    }
}
