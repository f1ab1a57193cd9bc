use crate::{
    CONFIDENCE_MAX, CONFIDENCE_MIN, FrameGeometry, ImageAnalysis, ImageClarity,
    KidsSuitability, LightingCondition, SCORE_MAX, SCORE_MIN, SurfaceTexture, Transparency,
    ViewAngle, VisualDimensions, WireframePresence,
};
use serde_json::{Map, Value, json};
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum SchemaValidationError {
    #[error("model output is not well-formed JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("model output does not match the analysis schema: {0}")]
    Shape(serde_json::Error),

    #[error("model output violates a field constraint: {0}")]
    Constraint(#[from] ValidationErrors),
}

impl From<serde_json::Error> for SchemaValidationError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::Shape(err)
        } else {
            Self::Malformed(err)
        }
    }
}

static IMAGE_ANALYSIS_SCHEMA: LazyLock<Value> = LazyLock::new(build_image_analysis_schema);

/// JSON Schema descriptor of [`ImageAnalysis`], passed to the model as its output format.
#[must_use]
pub fn image_analysis_schema() -> &'static Value {
    &IMAGE_ANALYSIS_SCHEMA
}

/// Strictly parse raw model output. Any missing field, unknown key, out-of-enum tag or
/// out-of-range number rejects the whole document.
pub fn parse_image_analysis(raw: &str) -> Result<ImageAnalysis, SchemaValidationError> {
    let analysis: ImageAnalysis = serde_json::from_str(raw)?;
    analysis.validate()?;
    Ok(analysis)
}

/// Same checks as [`parse_image_analysis`], for payloads that are already JSON values
/// (e.g. read back from the cache store).
pub fn validate_image_analysis(value: Value) -> Result<ImageAnalysis, SchemaValidationError> {
    let analysis: ImageAnalysis = serde_json::from_value(value)?;
    analysis.validate()?;
    Ok(analysis)
}

fn object(properties: Map<String, Value>) -> Value {
    let required: Vec<&String> = properties.keys().collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn string_enum(tags: &[&str]) -> Value {
    json!({ "type": "string", "enum": tags })
}

fn build_image_analysis_schema() -> Value {
    let dimension = object(
        [
            (
                "score",
                json!({ "type": "number", "minimum": SCORE_MIN, "maximum": SCORE_MAX }),
            ),
            (
                "confidence",
                json!({ "type": "number", "minimum": CONFIDENCE_MIN, "maximum": CONFIDENCE_MAX }),
            ),
            ("reasoning", json!({ "type": "string", "minLength": 1 })),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );

    let dimensions = object(
        VisualDimensions::NAMES
            .iter()
            .map(|name| ((*name).to_string(), dimension.clone()))
            .collect(),
    );

    let attributes = object(
        [
            (
                "wireframe_present",
                json!({ "enum": WireframePresence::wire_values() }),
            ),
            ("frame_geometry", string_enum(FrameGeometry::TAGS)),
            ("transparency", string_enum(Transparency::TAGS)),
            (
                "dominant_colors",
                json!({ "type": "array", "items": { "type": "string" } }),
            ),
            ("surface_texture", string_enum(SurfaceTexture::TAGS)),
            ("suitable_for_kids", string_enum(KidsSuitability::TAGS)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );

    let metadata = object(
        [
            ("image_clarity", string_enum(ImageClarity::TAGS)),
            ("view_angle", string_enum(ViewAngle::TAGS)),
            ("lighting_condition", string_enum(LightingCondition::TAGS)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );

    let mut root = object(
        [
            ("visual_dimensions", dimensions),
            ("visual_attributes", attributes),
            ("visual_metadata", metadata),
            (
                "ambiguities",
                json!({ "type": "array", "items": { "type": "string" } }),
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );
    root["title"] = json!("ImageAnalysis");
    root
}

/// A complete, valid analysis document. Used as the OpenAPI example.
pub const EXAMPLE_ANALYSIS_JSON: &str = r#"{
  "visual_dimensions": {
    "gender_expression": { "score": -1.5, "confidence": 0.7, "reasoning": "Straight brow line and angular corners read slightly masculine." },
    "visual_weight": { "score": 2.0, "confidence": 0.8, "reasoning": "Thick acetate rims with wide temples." },
    "embellishment": { "score": -3.0, "confidence": 0.9, "reasoning": "No decorative studs, engravings or patterns." },
    "unconventionality": { "score": -2.0, "confidence": 0.75, "reasoning": "Classic rectangular outline in a common proportion." },
    "formality": { "score": 1.0, "confidence": 0.6, "reasoning": "Dark solid color suits office wear." }
  },
  "visual_attributes": {
    "wireframe_present": false,
    "frame_geometry": "rectangular",
    "transparency": "opaque",
    "dominant_colors": ["black", "dark gunmetal"],
    "surface_texture": "matte",
    "suitable_for_kids": "ambiguous"
  },
  "visual_metadata": {
    "image_clarity": "clear",
    "view_angle": "angled",
    "lighting_condition": "even"
  },
  "ambiguities": ["Lens tint is hard to judge against the white background."]
}"#;
