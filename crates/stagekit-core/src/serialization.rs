//! JSON export envelope and lenient shape import.

use crate::config::{EditorConfig, PropertyLimits};
use crate::error::{EditorError, EditorResult};
use crate::scene::Scene;
use crate::shapes::{Circle, Image, Location, Rectangle, Shape, ShapeKind, Star, Text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    pub canvasprofile: CanvasProfile,
    pub canvasstage: CanvasStage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasProfile {
    pub name: String,
    pub lastupdated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasStage {
    pub w: f64,
    pub h: f64,
    pub layers: Layers,
}

/// Background layer and shape layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layers {
    pub layer1: LayerData,
    pub layer2: LayerData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Shape>>,
}

impl LayerData {
    fn full_canvas(name: &str, config: &EditorConfig) -> Self {
        Self {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: config.canvas_width,
            height: config.canvas_height,
            image: None,
            shapes: None,
        }
    }
}

impl CanvasData {
    /// Wrap shapes in the export envelope.
    pub fn new(shapes: &[Shape], config: &EditorConfig, now: DateTime<Utc>) -> Self {
        let mut background = LayerData::full_canvas("layer1", config);
        background.image = Some(config.background_source.clone());
        let mut content = LayerData::full_canvas("layer2", config);
        content.shapes = Some(shapes.to_vec());

        Self {
            canvasprofile: CanvasProfile {
                name: config.profile_name.clone(),
                lastupdated: now,
            },
            canvasstage: CanvasStage {
                w: config.canvas_width,
                h: config.canvas_height,
                layers: Layers {
                    layer1: background,
                    layer2: content,
                },
            },
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Numeric attributes that are coerced on import.
const NUMERIC_FIELDS: &[&str] = &[
    "x",
    "y",
    "width",
    "height",
    "radius",
    "rotation",
    "scaleX",
    "scaleY",
    "innerRadius",
    "numPoints",
    "strokeWidth",
    "fontSize",
];

/// Optional attributes that fall back to the kind default when absent or falsy.
const DEFAULTED_FIELDS: &[&str] = &["groupId", "image", "fill", "fontFamily", "text"];

/// Attributes that must be present and numeric.
const REQUIRED_FIELDS: &[&str] = &["x", "y"];

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Integral values become integer numbers so they deserialize into integer fields.
fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Value::Number(Number::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Kind defaults used to fill missing or falsy attributes.
fn kind_defaults(type_name: &str) -> Option<ShapeKind> {
    let kind = match type_name {
        "rectangle" => Rectangle::default().into(),
        "circle" => Circle::default().into(),
        "star" => Star::default().into(),
        "SVG" => Image::default().into(),
        "text" => Text::default().into(),
        "location" => Location::default().into(),
        _ => return None,
    };
    Some(kind)
}

/// Normalize one raw shape object.
fn coerce_shape(index: usize, raw: &Value, limits: &PropertyLimits) -> EditorResult<Value> {
    let Value::Object(object) = raw else {
        return Err(EditorError::Import(format!("shape #{index} is not an object")));
    };
    let mut object: Map<String, Value> = object.clone();

    for &field in NUMERIC_FIELDS {
        let Some(value) = object.get(field) else {
            if REQUIRED_FIELDS.contains(&field) {
                return Err(EditorError::Import(format!("shape #{index} is missing `{field}`")));
            }
            continue;
        };
        if !REQUIRED_FIELDS.contains(&field) && is_falsy(value) {
            object.remove(field);
            continue;
        }
        let number = as_number(value).ok_or_else(|| {
            EditorError::Import(format!("shape #{index} has a non-numeric `{field}`"))
        })?;
        let number = if field == "numPoints" {
            let (min, max) = limits.num_points;
            number.round().max(f64::from(min)).min(f64::from(max))
        } else {
            number
        };
        object.insert(field.to_string(), number_value(number));
    }

    for &field in DEFAULTED_FIELDS {
        if object.get(field).is_some_and(is_falsy) {
            object.remove(field);
        }
    }
    if let Some(Value::String(source)) = object.get("image") {
        let source = source.clone();
        object.insert("image".to_string(), serde_json::json!({ "source": source }));
    }

    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| EditorError::Import(format!("shape #{index} has no `type`")))?;
    let defaults = kind_defaults(type_name)
        .ok_or_else(|| EditorError::Import(format!("shape #{index} has unknown type `{type_name}`")))?;
    if let Value::Object(defaults) = serde_json::to_value(defaults)? {
        for (key, value) in defaults {
            object.entry(key).or_insert(value);
        }
    }

    Ok(Value::Object(object))
}

/// Find the raw shape array: top-level `shapes`, or every layer's `shapes`
/// inside the export envelope.
fn raw_shapes(document: &Value) -> EditorResult<Vec<Value>> {
    if let Some(shapes) = document.get("shapes") {
        return shapes
            .as_array()
            .cloned()
            .ok_or_else(|| EditorError::Import("`shapes` is not an array".to_string()));
    }

    let layers = document
        .get("canvasstage")
        .and_then(|stage| stage.get("layers"))
        .and_then(Value::as_object)
        .ok_or_else(|| EditorError::Import("document has no shapes".to_string()))?;

    let mut shapes = Vec::new();
    for layer in layers.values() {
        if let Some(layer_shapes) = layer.get("shapes") {
            let array = layer_shapes
                .as_array()
                .ok_or_else(|| EditorError::Import("layer `shapes` is not an array".to_string()))?;
            shapes.extend(array.iter().cloned());
        }
    }
    Ok(shapes)
}

/// Parse and validate shapes from a JSON document.
///
/// Every shape must parse and ids must be unique; any failure rejects the
/// whole document. Star point counts are clamped to `limits`.
pub fn parse_shapes(json: &str, limits: &PropertyLimits) -> EditorResult<Vec<Shape>> {
    let document: Value = serde_json::from_str(json)?;
    let mut shapes = Vec::new();
    for (index, raw) in raw_shapes(&document)?.iter().enumerate() {
        let value = coerce_shape(index, raw, limits)?;
        let shape: Shape = serde_json::from_value(value)
            .map_err(|e| EditorError::Import(format!("shape #{index}: {e}")))?;
        shapes.push(shape);
    }
    let scene = Scene::from_shapes(shapes)?;
    Ok(scene.shapes().to_vec())
}
