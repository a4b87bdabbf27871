use std::path::PathBuf;

use pagefit::page::{compose_page, place, should_rotate};
use pagefit::{Anchor, BorderOptions, NormalizeOptions, PageSpec, TagPolicy, normalize_str};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    InvalidInput(PathBuf),
    Io(std::io::Error),
    Normalize(pagefit::Error),
    Render(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::InvalidInput(path) => {
                write!(f, "Invalid input path specified: {}", path.display())
            }
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Normalize(err) => write!(f, "{err}"),
            CliError::Render(msg) => write!(f, "Rendering failed: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<pagefit::Error> for CliError {
    fn from(value: pagefit::Error) -> Self {
        Self::Normalize(value)
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::InvalidInput(_) => 3,
            CliError::Normalize(err) => match err {
                pagefit::Error::UnsupportedUnit { .. } => 4,
                pagefit::Error::AnisotropicScaling { .. } => 5,
                pagefit::Error::UnknownElement { .. } => 6,
                pagefit::Error::UnsupportedPathCommand { .. } => 7,
                pagefit::Error::EmptyContent => 8,
                _ => 1,
            },
            CliError::Render(_) => 9,
            CliError::Io(_) => 1,
        }
    }
}

#[derive(Debug)]
struct Args {
    input: PathBuf,
    border_width: i64,
    border_gap: f64,
    border_color: String,
    page_padding: f64,
    position: Anchor,
}

fn usage() -> &'static str {
    "pagefit\n\
\n\
Normalizes an SVG's content bounds, encloses it in a border frame and\n\
prints it onto an A4 PDF page written next to the input.\n\
\n\
USAGE:\n\
  pagefit <input.svg> [OPTIONS]\n\
\n\
OPTIONS:\n\
  --border-width <mm>   Stroke width of the enclosing frame (integer, default 5)\n\
  --border-gap <mm>     Distance between content and frame (default 1.5)\n\
  --border-color <hex>  Frame color including '#' (default #000000)\n\
  --page-padding <mm>   Padding of the page (default 10)\n\
  --position <anchor>   top-left, top-center, top-right, center-left, center,\n\
                        center-right, bottom-left, bottom-center, bottom-right\n\
                        (default top-left)\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut input: Option<PathBuf> = None;
    let mut border_width: i64 = 5;
    let mut border_gap: f64 = 1.5;
    let mut border_color = "#000000".to_string();
    let mut page_padding: f64 = 10.0;
    let mut position = Anchor::TopLeft;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--border-width" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                border_width = v.parse::<i64>().map_err(|_| CliError::Usage(usage()))?;
                if border_width < 0 {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--border-gap" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                border_gap = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--border-color" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                border_color = v.clone();
            }
            "--page-padding" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                page_padding = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--position" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                position = v.parse::<Anchor>().map_err(|_| CliError::Usage(usage()))?;
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let Some(input) = input else {
        return Err(CliError::Usage(usage()));
    };

    Ok(Args {
        input,
        border_width,
        border_gap,
        border_color,
        page_padding,
        position,
    })
}

fn is_svg_file(path: &PathBuf) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn run(args: Args) -> Result<(), CliError> {
    if !is_svg_file(&args.input) {
        return Err(CliError::InvalidInput(args.input));
    }

    let text = std::fs::read_to_string(&args.input)?;

    let options = NormalizeOptions {
        border: BorderOptions {
            width_mm: args.border_width as f64,
            gap_mm: args.border_gap,
            color: args.border_color,
        },
        tags: TagPolicy::default(),
    };
    let normalized = normalize_str(&text, &options)?;
    let svg = normalized.to_svg()?;

    // Keep the intermediate artifact around for inspection.
    let temp_path = std::env::temp_dir().join("pagefit.svg");
    std::fs::write(&temp_path, &svg)?;

    let opt = svg2pdf::usvg::Options::default();
    let tree = svg2pdf::usvg::Tree::from_str(&svg, &opt)
        .map_err(|e| CliError::Render(e.to_string()))?;

    // The rotate decision uses the rendered size, not the declared one.
    let rendered = tree.size();
    let rotate = should_rotate(f64::from(rendered.width()), f64::from(rendered.height()));

    let (mut content_width, mut content_height) =
        (normalized.plan.width_mm, normalized.plan.height_mm);
    if rotate {
        std::mem::swap(&mut content_width, &mut content_height);
    }

    let page = PageSpec::a4(args.page_padding);
    let position = place(content_width, content_height, &page, args.position);
    let page_root = compose_page(
        &normalized.root,
        normalized.scale.mm_per_unit,
        normalized.plan.height_mm,
        position,
        rotate,
        &page,
    );
    let page_svg = pagefit::dom::write_document(&page_root)?;

    let page_tree = svg2pdf::usvg::Tree::from_str(&page_svg, &opt)
        .map_err(|e| CliError::Render(e.to_string()))?;
    let pdf = svg2pdf::to_pdf(
        &page_tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| CliError::Render(e.to_string()))?;

    std::fs::write(args.input.with_extension("pdf"), pdf)?;
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
