//! The recognized metadata fields and keyword normalization.
//!
//! Generators spell the embedded keywords inconsistently ("CFG Scale",
//! "cfg-scale", "cfgscale"). Normalization lowercases the keyword, strips
//! everything that is not ASCII alphanumeric, and matches the result
//! against a closed table, not inferred from patterns, so the accepted
//! spellings are exactly the ones listed here.

/// One of the eight recognized metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataField {
    Prompt,
    Seed,
    CfgScale,
    Steps,
    Sampler,
    Model,
    Generated,
    CreatedDate,
}

/// All fields, in the order records store them.
pub const ALL_FIELDS: [MetadataField; 8] = [
    MetadataField::Prompt,
    MetadataField::Seed,
    MetadataField::CfgScale,
    MetadataField::Steps,
    MetadataField::Sampler,
    MetadataField::Model,
    MetadataField::Generated,
    MetadataField::CreatedDate,
];

impl MetadataField {
    /// Maps an embedded keyword to its field, if recognized.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match normalize(keyword).as_str() {
            "prompt" => Some(Self::Prompt),
            "seed" => Some(Self::Seed),
            "cfgscale" => Some(Self::CfgScale),
            "steps" => Some(Self::Steps),
            "sampler" => Some(Self::Sampler),
            "model" => Some(Self::Model),
            "generated" => Some(Self::Generated),
            "createddate" => Some(Self::CreatedDate),
            _ => None,
        }
    }

    /// Canonical display name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Seed => "Seed",
            Self::CfgScale => "CFG_Scale",
            Self::Steps => "Steps",
            Self::Sampler => "Sampler",
            Self::Model => "Model",
            Self::Generated => "Generated",
            Self::CreatedDate => "Created_Date",
        }
    }
}

fn normalize(keyword: &str) -> String {
    keyword
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_spellings_normalize_to_the_same_field() {
        for spelling in ["CFG_Scale", "cfg-scale", "CFG Scale", "cfgscale", "CfgScale"] {
            assert_eq!(
                MetadataField::from_keyword(spelling),
                Some(MetadataField::CfgScale),
                "spelling {spelling:?}"
            );
        }
        for spelling in ["Created_Date", "created date", "CreatedDate"] {
            assert_eq!(
                MetadataField::from_keyword(spelling),
                Some(MetadataField::CreatedDate),
                "spelling {spelling:?}"
            );
        }
    }

    #[test]
    fn every_canonical_name_maps_to_its_field() {
        for field in ALL_FIELDS {
            assert_eq!(MetadataField::from_keyword(field.name()), Some(field));
        }
    }

    #[test]
    fn unknown_keywords_are_not_recognized() {
        assert_eq!(MetadataField::from_keyword("Software"), None);
        assert_eq!(MetadataField::from_keyword("negative prompt"), None);
        assert_eq!(MetadataField::from_keyword(""), None);
    }
}
