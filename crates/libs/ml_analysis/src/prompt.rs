use common_types::image_analysis_schema;
use std::sync::LazyLock;

const INSTRUCTIONS: &str = r#"
You work at a vision care store and measure eyeglasses from product photos.
Analyze the image and return ONLY valid JSON matching the schema below.

You are performing VISUAL MEASUREMENT, not classification.

CRITICAL RULES:
- Use ONLY visually observable cues.
- Do NOT infer brand, price, intent, or user.
- Choose ONLY allowed enum values.
- Use "unknown" when a categorical attribute cannot be seen, and "ambiguous" for yes/no style fields you cannot decide.
- Include ALL required fields. Do not add any other fields.
- Return STRICT JSON only: no markdown, no code fences, no commentary.

SCORING INSTRUCTIONS (IMPORTANT):
- Scores must reflect RELATIVE visual strength, not certainty.
- 0.0 is allowed ONLY if two opposing visual cues clearly cancel out.
- If a dimension leans even slightly in one direction, you MUST use a non-zero score.
- Use these bands:
  - ±0.5 to ±1.0 : slight but visible lean
  - ±1.5 to ±2.5 : clear visual lean
  - ±3.0 to ±4.5 : strong visual expression
- Do NOT assign 0.0 to all dimensions.

CONFIDENCE RULES:
- Confidence is between 0.0 and 1.0 and reflects clarity of visual evidence, not strength of score.

REASONING RULES:
- Each dimension MUST have distinct, non-empty reasoning.
- Reasoning must cite specific visual cues (shape, thickness, color, geometry).

DIMENSION DEFINITIONS:
- Gender Expression: masculine (-5) to feminine (+5)
- Visual Weight: light (-5) to heavy (+5)
- Embellishment: simple (-5) to ornate (+5)
- Unconventionality: classic (-5) to avant-garde (+5)
- Formality: casual (-5) to formal (+5)
"#;

static ANALYSIS_PROMPT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}\nJSON SCHEMA:\n{}\n",
        INSTRUCTIONS.trim(),
        image_analysis_schema()
    )
});

/// The fixed instruction text sent with every image.
#[must_use]
pub fn analysis_prompt() -> &'static str {
    &ANALYSIS_PROMPT
}
