//! SVG rasterization with cover scaling and center crop.

use anyhow::{Context, Result};
use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::PprError;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Scale and crop window that make a source cover a target exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverGeometry {
    /// Uniform scale applied to the source
    pub scale: f64,
    /// Width of the scaled source (rounded up)
    pub scaled_width: u32,
    /// Height of the scaled source (rounded up)
    pub scaled_height: u32,
    /// Left edge of the crop window in scaled space
    pub offset_x: u32,
    /// Top edge of the crop window in scaled space
    pub offset_y: u32,
}

impl CoverGeometry {
    /// Computes the cover transform for a `source` rendered at `target`.
    ///
    /// `scale = max(tw/sw, th/sh)`, so one axis matches the target and the
    /// other overflows; the crop window is centered on the overflow.
    pub fn compute(source: (u32, u32), target: (u32, u32)) -> Self {
        let (sw, sh) = (f64::from(source.0.max(1)), f64::from(source.1.max(1)));
        let (tw, th) = target;

        let scale = (f64::from(tw) / sw).max(f64::from(th) / sh);
        let scaled_width = ((sw * scale).ceil() as u32).max(tw);
        let scaled_height = ((sh * scale).ceil() as u32).max(th);

        Self {
            scale,
            scaled_width,
            scaled_height,
            offset_x: (scaled_width - tw) / 2,
            offset_y: (scaled_height - th) / 2,
        }
    }
}

/// Integer `width`/`height` of the root `<svg>` element.
///
/// A trailing `px` is accepted; anything else is `MissingDimensions`.
pub fn svg_dimensions(doc: &str) -> Result<(u32, u32), PprError> {
    let tree = roxmltree::Document::parse(doc)
        .map_err(|e| PprError::MalformedTemplate(format!("invalid SVG markup: {e}")))?;
    let root = tree.root_element();
    if !root.has_tag_name("svg") {
        return Err(PprError::MalformedTemplate(format!(
            "root element is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }

    let parse = |name: &str| {
        root.attribute(name)
            .map(|v| v.trim().trim_end_matches("px").trim())
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
    };

    match (parse("width"), parse("height")) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(PprError::MissingDimensions),
    }
}

/// Declares the SVG namespace on a root `<svg>` that has none.
///
/// usvg only recognizes elements in the SVG namespace, while browsers and
/// `svg_dimensions` accept a bare `<svg>`.
fn with_svg_namespace(doc: &str) -> Cow<'_, str> {
    let Ok(tree) = roxmltree::Document::parse(doc) else {
        return Cow::Borrowed(doc);
    };
    let root = tree.root_element();
    if root.tag_name().namespace().is_some() || root.tag_name().name() != "svg" {
        return Cow::Borrowed(doc);
    }

    let (head, tail) = doc.split_at(root.range().start + "<svg".len());
    Cow::Owned(format!(r#"{head} xmlns="{SVG_NAMESPACE}"{tail}"#))
}

/// Renders a bound document to an RGBA buffer of exactly `width × height`.
pub fn render_image(doc: &str, width: u32, height: u32) -> Result<RgbaImage> {
    let source = svg_dimensions(doc)?;
    let geometry = CoverGeometry::compute(source, (width, height));
    tracing::debug!(
        "rendering {}x{} source at {}x{} (scale {:.4}, crop offset {},{})",
        source.0,
        source.1,
        width,
        height,
        geometry.scale,
        geometry.offset_x,
        geometry.offset_y
    );

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let doc = with_svg_namespace(doc);
    let tree = usvg::Tree::from_str(&doc, &options)
        .map_err(|e| PprError::MalformedTemplate(format!("SVG could not be rendered: {e}")))?;

    // Only the crop window is rasterized: translating by the offsets is the
    // same as rendering the full scaled canvas and copying the center.
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .with_context(|| format!("Failed to allocate {width}x{height} canvas"))?;
    let scale = geometry.scale as f32;
    let transform = tiny_skia::Transform::from_row(
        scale,
        0.0,
        0.0,
        scale,
        -(geometry.offset_x as f32),
        -(geometry.offset_y as f32),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut image = RgbaImage::new(width, height);
    for (pixel, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *pixel = image::Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(image)
}

/// Renders a bound document and writes it as PNG, replacing any existing file.
pub fn render(doc: &str, width: u32, height: u32, out_path: &Path) -> Result<()> {
    let image = render_image(doc, width, height)?;

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    image
        .save_with_format(out_path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write image: {}", out_path.display()))?;
    tracing::info!("wrote {}x{} image to {}", width, height, out_path.display());
    Ok(())
}
