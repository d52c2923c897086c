//! Wire shapes for the image-mapping service (`/mappings?anilist_id=`).

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingResponse {
    #[serde(default)]
    pub images: Vec<MappingImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingImage {
    #[serde(default)]
    pub cover_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl MappingImage {
    pub fn new(cover_type: &str, url: &str) -> Self {
        Self {
            cover_type: Some(cover_type.to_string()),
            url: Some(url.to_string()),
        }
    }
}
