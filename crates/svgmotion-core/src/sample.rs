//! Pure timeline resolution: (keyframes, query time) -> property snapshot.
//!
//! Model:
//! - An empty sequence resolves to the layer's static base snapshot.
//! - Outside the keyed range the nearest endpoint snapshot is returned
//!   verbatim, so out-of-range keyframes clamp instead of erroring.
//! - Between keyframes, segment progress drives per-key blending over the
//!   union of both snapshots' keys, with one-sided keys held as-is.
//! - Numeric pairs blend linearly; `#rrggbb` pairs blend per channel; any
//!   other pairing switches from left to right exactly at progress > 0.5.
//!   The step cutover is observable behavior and must not be smoothed.

use std::cmp::Ordering;

use crate::data::{Keyframe, Layer};
use crate::properties::{AnimationProperties, PropertyValue, Rgb};

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Find the adjacent pair spanning `time` in an already-sorted sequence and
/// the progress inside it. A zero-width segment resolves at progress 0, so
/// the earlier-inserted keyframe wins at a shared timestamp.
fn find_segment<'a>(sorted: &[&'a Keyframe], time: f64) -> Option<(&'a Keyframe, &'a Keyframe, f64)> {
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.time <= time && time <= b.time {
            let span = b.time - a.time;
            let progress = if span > 0.0 { (time - a.time) / span } else { 0.0 };
            return Some((a, b, progress));
        }
    }
    None
}

/// Resolve a keyframe sequence at `time` (milliseconds). Pure; `base` is
/// only returned when the sequence is empty.
pub fn resolve(keyframes: &[Keyframe], base: &AnimationProperties, time: f64) -> AnimationProperties {
    if keyframes.is_empty() {
        return base.clone();
    }

    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    if time <= first.time {
        return first.properties.clone();
    }
    if time >= last.time {
        return last.properties.clone();
    }

    match find_segment(&sorted, time) {
        Some((a, b, progress)) => interpolate_properties(&a.properties, &b.properties, progress),
        // unreachable once the endpoint clamps above ran; fail soft
        None => last.properties.clone(),
    }
}

/// Convenience over [`resolve`] for a whole layer.
pub fn sample_layer(layer: &Layer, time: f64) -> AnimationProperties {
    resolve(&layer.keyframes, &layer.properties, time)
}

/// Blend two snapshots at `progress` over the union of their keys.
pub fn interpolate_properties(
    a: &AnimationProperties,
    b: &AnimationProperties,
    progress: f64,
) -> AnimationProperties {
    let mut out = AnimationProperties::new();
    for key in a.union_keys(b) {
        let value = match (a.get(key), b.get(key)) {
            (Some(va), Some(vb)) => interpolate_value(va, vb, progress),
            // one-sided keys hold their defined value across the segment
            (Some(va), None) => va.clone(),
            (None, Some(vb)) => vb.clone(),
            (None, None) => continue,
        };
        out.set(key, value);
    }
    out
}

/// Blend one property value pair at `progress`.
pub fn interpolate_value(a: &PropertyValue, b: &PropertyValue, progress: f64) -> PropertyValue {
    match (a, b) {
        (PropertyValue::Number(na), PropertyValue::Number(nb)) => {
            PropertyValue::Number(lerp(*na, *nb, progress))
        }
        (PropertyValue::Text(_), PropertyValue::Text(_)) => match (a.as_rgb(), b.as_rgb()) {
            (Some(ca), Some(cb)) => PropertyValue::Text(Rgb::lerp(ca, cb, progress).to_hex()),
            _ => step_value(a, b, progress),
        },
        _ => step_value(a, b, progress),
    }
}

/// Step semantics: the value switches sides exactly at progress > 0.5.
#[inline]
fn step_value(a: &PropertyValue, b: &PropertyValue, progress: f64) -> PropertyValue {
    if progress > 0.5 {
        b.clone()
    } else {
        a.clone()
    }
}
