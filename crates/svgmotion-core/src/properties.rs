//! Property snapshots for animatable attributes.
//!
//! A snapshot is an open, ordered map from property name to value. Recognized
//! keys are `fill`/`stroke` (`#rrggbb` strings), `strokeWidth`, `opacity`,
//! and the transform-composing `translateX`/`translateY`/`rotate`/`scale`
//! (numbers). Unrecognized keys carry through opaquely and render as the
//! literal string form of their value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Property names that fold into a single `transform` on output instead of
/// rendering as individual declarations/attributes.
pub const TRANSFORM_KEYS: [&str; 4] = ["translateX", "translateY", "rotate", "scale"];

/// A single property value. Untagged so snapshots serialize as plain JSON
/// objects (`{"opacity": 0.5, "fill": "#ff0000"}`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(_) => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Number(_) => None,
            PropertyValue::Text(s) => Some(s),
        }
    }

    /// The strict `#rrggbb` reading of this value, if it has one.
    #[inline]
    pub fn as_rgb(&self) -> Option<Rgb> {
        self.as_text().and_then(Rgb::parse_hex)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

/// An `#rrggbb` color split into channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a strict `#rrggbb` string. Shorthand (`#rgb`) and alpha forms
    /// are not colors for interpolation purposes and return `None`.
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channelwise linear blend, each channel rounded to the nearest integer.
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let channel = |ca: u8, cb: u8| {
            (ca as f64 + (cb as f64 - ca as f64) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(a.r, b.r),
            g: channel(a.g, b.g),
            b: channel(a.b, b.b),
        }
    }
}

/// An ordered property-name -> value snapshot. Order is insertion order and
/// is preserved through serialization and output emission.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AnimationProperties(IndexMap<String, PropertyValue>);

impl AnimationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Union of this snapshot's keys and `other`'s, this snapshot's order
    /// first, then `other`'s additions in their own order.
    pub fn union_keys<'a>(&'a self, other: &'a AnimationProperties) -> Vec<&'a str> {
        let mut keys: Vec<&str> = self.keys().collect();
        for key in other.keys() {
            if self.get(key).is_none() {
                keys.push(key);
            }
        }
        keys
    }
}

impl FromIterator<(String, PropertyValue)> for AnimationProperties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        AnimationProperties(iter.into_iter().collect())
    }
}

/// camelCase property name -> kebab-case attribute/declaration name
/// (`strokeWidth` -> `stroke-width`).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// CSS declaration value for a property: `px` on `strokeWidth`, `deg` on
/// `rotate`, the raw value otherwise.
pub fn css_value(key: &str, value: &PropertyValue) -> String {
    match value {
        PropertyValue::Number(n) => match key {
            "strokeWidth" => format!("{n}px"),
            "rotate" => format!("{n}deg"),
            _ => format!("{n}"),
        },
        PropertyValue::Text(s) => s.clone(),
    }
}

/// Fold the transform-composing keys of a snapshot into one transform value,
/// omitting functions whose components are entirely absent. `css_units`
/// selects CSS syntax (`translate(4px,0px)`) over the unitless SVG attribute
/// syntax (`translate(4,0)`); the numbers are identical either way.
pub fn compose_transform(props: &AnimationProperties, css_units: bool) -> Option<String> {
    let number = |key: &str| props.get(key).and_then(|v| v.as_number());
    let tx = number("translateX");
    let ty = number("translateY");
    let rotate = number("rotate");
    let scale = number("scale");

    let mut parts: Vec<String> = Vec::new();
    if tx.is_some() || ty.is_some() {
        let (x, y) = (tx.unwrap_or(0.0), ty.unwrap_or(0.0));
        if css_units {
            parts.push(format!("translate({x}px,{y}px)"));
        } else {
            parts.push(format!("translate({x},{y})"));
        }
    }
    if let Some(r) = rotate {
        parts.push(format!("rotate({r}deg)"));
    }
    if let Some(s) = scale {
        parts.push(format!("scale({s})"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Editor metadata for one animatable property.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnimatableProperty {
    pub name: &'static str,
    pub label: &'static str,
    pub editor: PropertyEditor,
}

/// Which control the editor shell renders for a property.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyEditor {
    Color,
    Number { min: f64, max: f64, step: f64 },
}

/// The properties the editor shell offers for keyframing, with their UI
/// ranges.
pub const ANIMATABLE_PROPERTIES: &[AnimatableProperty] = &[
    AnimatableProperty {
        name: "fill",
        label: "Fill Color",
        editor: PropertyEditor::Color,
    },
    AnimatableProperty {
        name: "stroke",
        label: "Stroke Color",
        editor: PropertyEditor::Color,
    },
    AnimatableProperty {
        name: "strokeWidth",
        label: "Stroke Width",
        editor: PropertyEditor::Number {
            min: 0.0,
            max: 20.0,
            step: 0.5,
        },
    },
    AnimatableProperty {
        name: "opacity",
        label: "Opacity",
        editor: PropertyEditor::Number {
            min: 0.0,
            max: 1.0,
            step: 0.1,
        },
    },
    AnimatableProperty {
        name: "translateX",
        label: "Move X",
        editor: PropertyEditor::Number {
            min: -500.0,
            max: 500.0,
            step: 1.0,
        },
    },
    AnimatableProperty {
        name: "translateY",
        label: "Move Y",
        editor: PropertyEditor::Number {
            min: -500.0,
            max: 500.0,
            step: 1.0,
        },
    },
    AnimatableProperty {
        name: "rotate",
        label: "Rotate",
        editor: PropertyEditor::Number {
            min: -360.0,
            max: 360.0,
            step: 1.0,
        },
    },
    AnimatableProperty {
        name: "scale",
        label: "Scale",
        editor: PropertyEditor::Number {
            min: 0.0,
            max: 5.0,
            step: 0.1,
        },
    },
];

/// The authoring-time baseline every animatable property starts from.
pub fn default_properties() -> AnimationProperties {
    let mut props = AnimationProperties::new();
    props.set("fill", "none");
    props.set("stroke", "#000000");
    props.set("strokeWidth", 1.0);
    props.set("opacity", 1.0);
    props.set("translateX", 0.0);
    props.set("translateY", 0.0);
    props.set("rotate", 0.0);
    props.set("scale", 1.0);
    props
}
