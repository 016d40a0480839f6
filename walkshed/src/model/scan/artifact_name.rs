use std::path::Path;

use itertools::Itertools;
use walkshed_core::util::fs::split_extension;

use super::ScanError;

const TOKEN_DELIMITER: &str = " ";

/// metadata encoded in a walkshed file name such as `RP Burbridge Cost Walking`:
/// token 1 is the location and token 3 the mobility profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkshedName {
    pub location: String,
    pub profile: String,
    /// tokens 1.. rejoined, used as the prefix of join output names
    pub base: String,
}

/// metadata encoded in an amenity file name such as `Buffer Joined Burbridge Library`:
/// token 2 is the region and tokens 3.. the category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmenityName {
    pub region: String,
    pub category: String,
}

impl WalkshedName {
    pub fn parse(stem: &str) -> Result<WalkshedName, ScanError> {
        let tokens = stem.split(TOKEN_DELIMITER).collect_vec();
        match tokens.as_slice() {
            [_, location, _, profile, ..] if !location.is_empty() && !profile.is_empty() => {
                Ok(WalkshedName {
                    location: location.to_string(),
                    profile: profile.to_string(),
                    base: tokens[1..].join(TOKEN_DELIMITER),
                })
            }
            _ => Err(ScanError::InvalidFileName(
                stem.to_string(),
                String::from("walkshed names need a location at token 1 and a profile at token 3"),
            )),
        }
    }
}

impl AmenityName {
    pub fn parse(stem: &str) -> Result<AmenityName, ScanError> {
        let tokens = stem.split(TOKEN_DELIMITER).collect_vec();
        match tokens.as_slice() {
            [_, _, region, category @ ..] if !region.is_empty() && !category.is_empty() => {
                Ok(AmenityName {
                    region: region.to_string(),
                    category: category.join(TOKEN_DELIMITER),
                })
            }
            _ => Err(ScanError::InvalidFileName(
                stem.to_string(),
                String::from("amenity names need a location at token 2 and a category from token 3"),
            )),
        }
    }
}

/// name shared by the reachable and unreachable outputs of one join, for
/// example `Burbridge Cost Walking Library`.
pub fn output_name(walkshed_base: &str, category: &str) -> String {
    format!("{walkshed_base}{TOKEN_DELIMITER}{category}")
}

/// file name of a path without its extension
pub fn file_stem(path: &Path) -> Result<String, ScanError> {
    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ScanError::InvalidFileName(
            path.display().to_string(),
            String::from("file name is missing or not valid UTF-8"),
        )
    })?;
    let (stem, _) = split_extension(file_name);
    Ok(stem.to_string())
}

/// first whitespace token of a file name, which carries prefixes such as
/// `RP`, `Buffer` or `Unreachable`
pub fn first_token(path: &Path) -> Option<String> {
    let stem = file_stem(path).ok()?;
    stem.split(TOKEN_DELIMITER).next().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkshed_tokens() {
        let stem = file_stem(Path::new("RP Burbridge Cost Walking.geojson")).unwrap();
        let name = WalkshedName::parse(&stem).unwrap();
        assert_eq!(name.location, "Burbridge");
        assert_eq!(name.profile, "Walking");
        assert_eq!(name.base, "Burbridge Cost Walking");
    }

    #[test]
    fn amenity_category_keeps_every_trailing_token() {
        let name = AmenityName::parse("Buffer Joined South Food Bank").unwrap();
        assert_eq!(name.region, "South");
        assert_eq!(name.category, "Food Bank");
        assert_eq!(
            output_name("Argyle Cost Cane", &name.category),
            "Argyle Cost Cane Food Bank"
        );
    }

    #[test]
    fn short_names_are_rejected() {
        assert!(WalkshedName::parse("RP Burbridge Cost").is_err());
        assert!(AmenityName::parse("Buffer Joined North").is_err());
        // a doubled delimiter produces an empty location token
        assert!(WalkshedName::parse("RP  Cost Walking").is_err());
    }

    #[test]
    fn first_token_of_partition_output() {
        assert_eq!(
            first_token(Path::new("/tmp/Unreachable Burbridge Cost Walking Library.geojson")),
            Some(String::from("Unreachable"))
        );
    }
}
