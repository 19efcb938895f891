#[derive(serde::Serialize)]
pub struct OllamaRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OllamaMessage<'a>>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

#[derive(serde::Serialize)]
pub struct OllamaMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(serde::Serialize)]
pub struct Options {
    pub num_predict: u32,
}

#[derive(serde::Deserialize)]
pub struct OllamaResponse {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}
