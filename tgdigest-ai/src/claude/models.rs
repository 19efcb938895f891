#[derive(serde::Serialize)]
pub struct ClaudeRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<ClaudeMessage<'a>>,
}

#[derive(serde::Serialize)]
pub struct ClaudeMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(serde::Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(serde::Deserialize)]
pub struct Content {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ClaudeResponse {
    /// Concatenated text blocks, `None` when the response carries no text.
    pub fn text(&self) -> Option<String> {
        let text = self
            .content
            .iter()
            .filter(|c| c.kind == "text" || c.kind.is_empty())
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        Some(text).filter(|t| !t.trim().is_empty())
    }
}
