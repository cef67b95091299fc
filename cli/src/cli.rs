use std::path::PathBuf;

/// Print page layout CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "plotcover", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Cover selected features with print pages (forbids stdout)
    Cover(CoverArgs),

    /// Print the ground size of one page for a paper size and scale
    Footprint(FootprintArgs),
}

/// Page size options shared by both commands; each overrides the config file.
#[derive(clap::Args, Debug, Default)]
pub struct PageArgs {
    /// Page width in working CRS units
    #[arg(long, requires = "page_height")]
    pub page_width: Option<f64>,

    /// Page height in working CRS units
    #[arg(long, requires = "page_width")]
    pub page_height: Option<f64>,

    /// Paper size: A0..A5 or WIDTHxHEIGHT in mm; a custom size is used as
    /// written unless --orientation is given
    #[arg(long)]
    pub paper: Option<String>,

    /// Paper orientation: portrait (default for A sizes) or landscape
    #[arg(long)]
    pub orientation: Option<String>,

    /// Map scale denominator, e.g. 5000 for 1:5000
    #[arg(long)]
    pub scale: Option<f64>,

    /// JSON file with defaults for any of these settings
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CoverArgs {
    /// Input GeoJSON layers
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub layers: Vec<PathBuf>,

    /// Output page rectangles (GeoJSON), defaults to "./pages.geojson"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write an SVG preview of pages over the features
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,

    /// Working CRS as a PROJ.4 definition
    #[arg(long)]
    pub crs: Option<String>,

    /// CRS of the input layers as a PROJ.4 definition, defaults to the working CRS
    #[arg(long)]
    pub source_crs: Option<String>,

    /// Share of a page by which neighbouring pages overlap, in [0, 1]
    #[arg(long)]
    pub overlap: Option<f64>,

    /// Only cover features whose "selected" property is true
    #[arg(long)]
    pub selected_only: bool,

    /// Fail when some feature does not end up fully inside a page
    #[arg(long)]
    pub strict: bool,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(clap::Args, Debug)]
pub struct FootprintArgs {
    #[command(flatten)]
    pub page: PageArgs,
}
