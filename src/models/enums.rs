use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
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

str_enum!(ResourceClass {
    Firm => "firm",
    Market => "market",
    Mixed => "mixed",
});

str_enum!(Posture {
    Pop => "pop",
    Pod => "pod",
});

str_enum!(Section {
    Academic => "academic",
    Nokia => "nokia",
    Competitors => "competitors",
    Quantum => "quantum",
});

str_enum!(SourceFormat {
    Pdf => "pdf",
    Docx => "docx",
    Xlsx => "xlsx",
    UrlShortcut => "url",
    PlainText => "text",
});

impl ResourceClass {
    /// Label used in exported tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Firm => "Firm-Based",
            Self::Market => "Market-Based",
            Self::Mixed => "Mixed",
        }
    }
}

impl Posture {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pop => "PoP",
            Self::Pod => "PoD",
        }
    }
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Academic,
        Section::Nokia,
        Section::Competitors,
        Section::Quantum,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Academic => "Customer Value Propositions (Academic/General Sources)",
            Self::Nokia => "Nokia",
            Self::Competitors => "Nokia\u{2019}s Competitors",
            Self::Quantum => "Quantum Security",
        }
    }

    /// Default CSV file name for an export of this section.
    pub fn export_file_name(&self) -> String {
        format!("{}-cvps.csv", self.as_str())
    }
}

impl SourceFormat {
    /// Formats whose raw bytes may carry page structure worth recovering.
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_class_round_trips_through_str() {
        for class in [ResourceClass::Firm, ResourceClass::Market, ResourceClass::Mixed] {
            let parsed: ResourceClass = class.as_str().parse().unwrap();
            assert_eq!(parsed, class);
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = "marketing".parse::<Section>().unwrap_err();
        assert!(err.to_string().contains("marketing"));
    }

    #[test]
    fn export_labels() {
        assert_eq!(ResourceClass::Firm.label(), "Firm-Based");
        assert_eq!(ResourceClass::Market.label(), "Market-Based");
        assert_eq!(ResourceClass::Mixed.label(), "Mixed");
        assert_eq!(Posture::Pop.label(), "PoP");
        assert_eq!(Posture::Pod.label(), "PoD");
    }

    #[test]
    fn section_export_file_name() {
        assert_eq!(Section::Competitors.export_file_name(), "competitors-cvps.csv");
    }

    #[test]
    fn only_pdf_is_paged() {
        assert!(SourceFormat::Pdf.is_paged());
        assert!(!SourceFormat::Docx.is_paged());
        assert!(!SourceFormat::Xlsx.is_paged());
    }
}
