use crate::{
    FrameGeometry, ImageClarity, KidsSuitability, LightingCondition, SurfaceTexture,
    Transparency, ViewAngle, WireframePresence,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const SCORE_MIN: f64 = -5.0;
pub const SCORE_MAX: f64 = 5.0;
pub const CONFIDENCE_MIN: f64 = 0.0;
pub const CONFIDENCE_MAX: f64 = 1.0;

/// One bidirectional measurement axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VisualDimension {
    /// Relative visual strength, negative and positive poles per dimension.
    #[validate(range(min = -5.0, max = 5.0))]
    #[schema(minimum = -5.0, maximum = 5.0)]
    pub score: f64,
    /// Clarity of the visual evidence, not strength of the score.
    #[validate(range(min = 0.0, max = 1.0))]
    #[schema(minimum = 0.0, maximum = 1.0)]
    pub confidence: f64,
    /// Visual cues the score is based on.
    #[validate(length(min = 1))]
    #[schema(min_length = 1)]
    pub reasoning: String,
}

/// The five measured axes. All are required and no other keys are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VisualDimensions {
    /// Masculine (-5) to feminine (+5).
    #[validate(nested)]
    pub gender_expression: VisualDimension,
    /// Light (-5) to heavy (+5).
    #[validate(nested)]
    pub visual_weight: VisualDimension,
    /// Simple (-5) to ornate (+5).
    #[validate(nested)]
    pub embellishment: VisualDimension,
    /// Classic (-5) to avant-garde (+5).
    #[validate(nested)]
    pub unconventionality: VisualDimension,
    /// Casual (-5) to formal (+5).
    #[validate(nested)]
    pub formality: VisualDimension,
}

impl VisualDimensions {
    pub const NAMES: [&'static str; 5] = [
        "gender_expression",
        "visual_weight",
        "embellishment",
        "unconventionality",
        "formality",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VisualAttributes {
    pub wireframe_present: WireframePresence,
    pub frame_geometry: FrameGeometry,
    pub transparency: Transparency,
    pub dominant_colors: Vec<String>,
    pub surface_texture: SurfaceTexture,
    pub suitable_for_kids: KidsSuitability,
}

/// Photo quality descriptors, independent of the product itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VisualMetadata {
    pub image_clarity: ImageClarity,
    pub view_angle: ViewAngle,
    pub lighting_condition: LightingCondition,
}

/// Validated measurement result for one eyeglasses image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ImageAnalysis {
    #[validate(nested)]
    pub visual_dimensions: VisualDimensions,
    pub visual_attributes: VisualAttributes,
    pub visual_metadata: VisualMetadata,
    /// Things the model could not determine from the image, in the order reported.
    pub ambiguities: Vec<String>,
}
