use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The display string doubles as the serde name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(LabStatus {
    Normal => "Normal",
    Borderline => "Borderline",
    Low => "Low",
    High => "High",
    Positive => "Positive",
    NotClassified => "Not Classified",
    InvalidData => "Invalid Data",
});

impl LabStatus {
    /// Whether a computed status counts toward the abnormal tally.
    /// `NotClassified` is decided by the caller-supplied fallback instead.
    pub fn is_abnormal(&self) -> bool {
        matches!(
            self,
            Self::Borderline | Self::Low | Self::High | Self::Positive
        )
    }
}

str_enum!(RiskLevel {
    Low => "Low",
    Moderate => "Moderate",
    High => "High",
});

str_enum!(BannerColor {
    Green => "green",
    Yellow => "yellow",
    Red => "red",
});

str_enum!(Sex {
    Male => "M",
    Female => "F",
});

impl Sex {
    /// Lenient reading of a report's sex field ("M", "female", "Male", ...).
    /// Returns `None` for "Unknown", "--" and anything unrecognised.
    pub fn from_report(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            _ => None,
        }
    }
}

str_enum!(Priority {
    Routine => "Routine",
    Medium => "Medium",
    High => "High",
});

str_enum!(Urgency {
    Routine => "routine",
    FollowUp => "follow-up",
    Urgent => "urgent",
});

str_enum!(RiskSource {
    Engine => "engine",
    Model => "model",
});
