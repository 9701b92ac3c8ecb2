use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeClothesRequest {
    pub person_image: String,
    pub clothes_image: String,
    /// Style selector; the browser contract calls it `aspectRatio`.
    #[serde(rename = "aspectRatio", default)]
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<String>>,
}

impl ChangeClothesRequest {
    pub fn new(person_image: impl Into<String>, clothes_image: impl Into<String>) -> Self {
        Self {
            person_image: person_image.into(),
            clothes_image: clothes_image.into(),
            style: "original".to_string(),
            parts: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_parts(mut self, parts: Vec<String>) -> Self {
        self.parts = Some(parts);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeClothesResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChangeClothesResponse {
    pub fn ok(result_image: String) -> Self {
        Self {
            success: true,
            result_image: Some(result_image),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result_image: None,
            error: Some(error.into()),
        }
    }
}
