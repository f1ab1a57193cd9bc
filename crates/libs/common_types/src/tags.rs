use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::RefOr;

/// Declares a closed set of snake_case tags. The generated `TAGS` list feeds the
/// output schema, so the enum and the descriptor can't drift apart.
macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Overall outline of the frame.
    FrameGeometry {
        Round => "round",
        Rectangular => "rectangular",
        Square => "square",
        Aviator => "aviator",
        CatEye => "cat_eye",
        Irregular => "irregular",
        Unknown => "unknown",
    }
}

tag_enum! {
    /// How see-through the frame material is.
    Transparency {
        Low => "low",
        Medium => "medium",
        High => "high",
        Opaque => "opaque",
        Unknown => "unknown",
    }
}

tag_enum! {
    SurfaceTexture {
        Smooth => "smooth",
        Matte => "matte",
        Glossy => "glossy",
        Patterned => "patterned",
        Unknown => "unknown",
    }
}

tag_enum! {
    KidsSuitability {
        Yes => "yes",
        No => "no",
        Ambiguous => "ambiguous",
    }
}

tag_enum! {
    ImageClarity {
        Clear => "clear",
        Blurry => "blurry",
        LowResolution => "low_resolution",
        Unknown => "unknown",
    }
}

tag_enum! {
    ViewAngle {
        Front => "front",
        Side => "side",
        Angled => "angled",
        Multiple => "multiple",
        Unknown => "unknown",
    }
}

tag_enum! {
    LightingCondition {
        Even => "even",
        Harsh => "harsh",
        Dim => "dim",
        Uneven => "uneven",
        Unknown => "unknown",
    }
}

/// Whether a metal wireframe is visible. On the wire this is `true`, `false`
/// or the string `"ambiguous"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireframePresence {
    Present,
    Absent,
    Ambiguous,
}

impl WireframePresence {
    pub const AMBIGUOUS_TAG: &'static str = "ambiguous";

    /// Allowed wire values, in schema order.
    #[must_use]
    pub fn wire_values() -> [serde_json::Value; 3] {
        [
            serde_json::Value::Bool(true),
            serde_json::Value::Bool(false),
            serde_json::Value::String(Self::AMBIGUOUS_TAG.to_string()),
        ]
    }
}

impl Serialize for WireframePresence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present => serializer.serialize_bool(true),
            Self::Absent => serializer.serialize_bool(false),
            Self::Ambiguous => serializer.serialize_str(Self::AMBIGUOUS_TAG),
        }
    }
}

impl<'de> Deserialize<'de> for WireframePresence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PresenceVisitor;

        impl Visitor<'_> for PresenceVisitor {
            type Value = WireframePresence;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("true, false or \"ambiguous\"")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(if value {
                    WireframePresence::Present
                } else {
                    WireframePresence::Absent
                })
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value == WireframePresence::AMBIGUOUS_TAG {
                    Ok(WireframePresence::Ambiguous)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(PresenceVisitor)
    }
}

impl utoipa::PartialSchema for WireframePresence {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(SchemaType::AnyValue)
            .enum_values(Some(Self::wire_values()))
            .description(Some("Visible wireframe: true, false or \"ambiguous\"."))
            .into()
    }
}

impl utoipa::ToSchema for WireframePresence {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("WireframePresence")
    }
}
