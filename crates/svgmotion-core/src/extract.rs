//! Layer extraction from raw SVG markup.
//!
//! Walks the document in order, turning every drawable primitive into a
//! [`Layer`] record seeded from its presentation attributes. Elements that
//! lack an id are assigned one in place so export can re-locate them later.

use log::{debug, warn};
use xmltree::Element;

use crate::data::{Layer, LayerKind};
use crate::document::SvgDocument;
use crate::error::ParseError;
use crate::ids::IdSource;
use crate::properties::AnimationProperties;

/// Tags extracted as animatable layers. Anything else (defs, gradients,
/// text, nested svg) is left alone.
const DRAWABLE_TAGS: [&str; 7] = [
    "path", "circle", "rect", "ellipse", "line", "polyline", "polygon",
];

/// Parse markup into a document plus its flat, document-ordered layer list.
///
/// Fails with [`ParseError`] on malformed markup; no partial output is
/// produced. The returned document carries any generated ids and is the
/// value later handed to the compiler.
pub fn extract(
    markup: &str,
    ids: &mut dyn IdSource,
) -> Result<(SvgDocument, Vec<Layer>), ParseError> {
    let mut document = SvgDocument::parse(markup)?;
    let mut layers: Vec<Layer> = Vec::new();

    document.for_each_descendant_mut(&mut |el| {
        if !DRAWABLE_TAGS.contains(&el.name.as_str()) {
            return;
        }
        let index = layers.len();
        let id = match el.attributes.get("id") {
            Some(existing) if !existing.is_empty() => existing.clone(),
            _ => {
                let generated = ids.next_id(&format!("path-{index}"));
                el.attributes.insert("id".to_string(), generated.clone());
                generated
            }
        };

        let path_data = if el.name == "path" {
            el.attributes.get("d").cloned()
        } else {
            None
        };

        let mut layer = Layer::new(id, format!("Layer {}", index + 1), classify(&el.name));
        layer.path_data = path_data;
        layer.properties = seed_properties(el);
        layers.push(layer);
    });

    debug!("extracted {} layer(s) from {} bytes of markup", layers.len(), markup.len());
    Ok((document, layers))
}

/// Tag name -> layer kind; unrecognized drawables are treated as paths.
fn classify(tag: &str) -> LayerKind {
    match tag {
        "circle" => LayerKind::Circle,
        "rect" => LayerKind::Rect,
        _ => LayerKind::Path,
    }
}

/// Seed the base snapshot from presentation attributes with fixed fallbacks.
fn seed_properties(el: &Element) -> AnimationProperties {
    let mut props = AnimationProperties::new();
    let fill = el
        .attributes
        .get("fill")
        .cloned()
        .unwrap_or_else(|| "none".to_string());
    let stroke = el
        .attributes
        .get("stroke")
        .cloned()
        .unwrap_or_else(|| "#000000".to_string());
    props.set("fill", fill);
    props.set("stroke", stroke);
    props.set("strokeWidth", numeric_attribute(el, "stroke-width", 1.0));
    props.set("opacity", numeric_attribute(el, "opacity", 1.0));
    props
}

fn numeric_attribute(el: &Element, name: &str, fallback: f64) -> f64 {
    match el.attributes.get(name) {
        None => fallback,
        Some(raw) => parse_float_prefix(raw).unwrap_or_else(|| {
            warn!("attribute {name}={raw:?} is not numeric, falling back to {fallback}");
            fallback
        }),
    }
}

/// Leading-float parse matching how presentation attributes are authored
/// (`"2px"` reads as `2`). `None` when no leading number exists.
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if !s[..end].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s[..end].parse().ok()
}
