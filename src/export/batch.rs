use std::path::PathBuf;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    curve::{
        elliptic::{EllipticConfig, EllipticEvaluator, ProjectedStrand},
        seed::SeedSequence,
    },
    export::{
        preview::write_png_preview,
        svg::{SvgStyle, is_paint_token, write_svg_document},
    },
    foundation::error::{RibbonError, RibbonResult},
};

/// Options for [`export_batch`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOpts {
    pub out_dir: PathBuf,
    /// Number of documents; files are named `ribbon-1.svg` ... `ribbon-{count}.svg`.
    pub count: usize,
    /// Square viewBox side; the evaluator runs on a frame of the same size.
    pub size: u32,
    /// Multiplier on top of the tightest bounding-box fit.
    pub zoom: f64,
    pub stroke: String,
    pub stroke_width: f64,
    /// Reproducible batch when set; fresh entropy otherwise.
    pub base_seed: Option<u64>,
    /// Also write `ribbon-N.png` next to every SVG.
    pub png_preview: bool,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("public/img/ribbons"),
            count: 6,
            size: 800,
            zoom: 1.35,
            stroke: "white".to_string(),
            stroke_width: 1.0,
            base_seed: None,
            png_preview: false,
            threads: None,
        }
    }
}

impl ExportOpts {
    pub fn validate(&self) -> RibbonResult<()> {
        if self.size == 0 {
            return Err(RibbonError::validation("export size must be > 0"));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(RibbonError::validation("export zoom must be finite and > 0"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(RibbonError::validation(
                "export stroke_width must be finite and > 0",
            ));
        }
        if !is_paint_token(&self.stroke) {
            return Err(RibbonError::validation(format!(
                "export stroke '{}' is not a paint value",
                self.stroke
            )));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(RibbonError::validation(
                "export 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    fn style(&self) -> SvgStyle {
        SvgStyle {
            size: self.size,
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
        }
    }
}

/// One generated document, before it touches the filesystem.
#[derive(Clone, Debug)]
pub struct GeneratedRibbon {
    pub config: EllipticConfig,
    /// Strands in paint order (back to front).
    pub strands: Vec<ProjectedStrand>,
    pub svg: String,
}

/// Evaluate, depth-sort and serialize one ribbon. Pure.
pub fn generate_ribbon(seed: f64, opts: &ExportOpts) -> RibbonResult<GeneratedRibbon> {
    let config = EllipticConfig::from_seed(seed);
    config.validate()?;
    let frame = f64::from(opts.size);
    let strands = EllipticEvaluator::new(&config, frame, frame).strands_back_to_front();
    let svg = write_svg_document(&strands, &opts.style(), opts.zoom)?;
    Ok(GeneratedRibbon {
        config,
        strands,
        svg,
    })
}

/// A file written by [`export_batch`].
#[derive(Clone, Debug)]
pub struct ExportedFile {
    /// 1-based slot number used in the file name.
    pub slot: usize,
    pub seed: f64,
    pub lines: usize,
    pub svg_path: PathBuf,
    pub png_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ExportReport {
    pub out_dir: PathBuf,
    pub files: Vec<ExportedFile>,
}

/// Generate `opts.count` documents in parallel and write them in slot order.
///
/// Filesystem failures abort the batch; files already written stay on disk.
#[tracing::instrument(skip(opts), fields(out_dir = %opts.out_dir.display(), count = opts.count))]
pub fn export_batch(opts: &ExportOpts) -> RibbonResult<ExportReport> {
    opts.validate()?;

    let mut seeds = match opts.base_seed {
        Some(base) => SeedSequence::new(base),
        None => SeedSequence::from_entropy(),
    };
    let seeds = seeds.take_seeds(opts.count);

    let pool = build_thread_pool(opts.threads)?;
    let generated = pool.install(|| {
        seeds
            .par_iter()
            .map(|&seed| generate_ribbon(seed, opts))
            .collect::<RibbonResult<Vec<_>>>()
    })?;

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("create output dir '{}'", opts.out_dir.display()))?;

    let mut files = Vec::with_capacity(generated.len());
    for (i, ribbon) in generated.iter().enumerate() {
        let slot = i + 1;
        let svg_path = opts.out_dir.join(format!("ribbon-{slot}.svg"));
        std::fs::write(&svg_path, &ribbon.svg)
            .with_context(|| format!("write svg '{}'", svg_path.display()))?;
        tracing::info!(path = %svg_path.display(), seed = ribbon.config.seed, "wrote ribbon");

        let png_path = if opts.png_preview {
            let path = opts.out_dir.join(format!("ribbon-{slot}.png"));
            write_png_preview(&ribbon.svg, opts.size, &path)?;
            tracing::debug!(path = %path.display(), "wrote preview");
            Some(path)
        } else {
            None
        };

        files.push(ExportedFile {
            slot,
            seed: ribbon.config.seed,
            lines: ribbon.strands.len(),
            svg_path,
            png_path,
        });
    }

    Ok(ExportReport {
        out_dir: opts.out_dir.clone(),
        files,
    })
}

fn build_thread_pool(threads: Option<usize>) -> RibbonResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RibbonError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
