use serde::{ Serialize, Deserialize };

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub prompt: &'a str,
}

/// Successful body of `POST /api/chat`.
#[derive(Deserialize, Debug, Clone)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_only_prompt() {
        let body = serde_json::to_string(&ChatRequest { prompt: "Show me all available jobs" }).unwrap();
        assert_eq!(body, r#"{"prompt":"Show me all available jobs"}"#);
    }

    #[test]
    fn response_requires_string_field() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"response": 42}"#).is_err());
        assert!(serde_json::from_str::<ChatResponse>(r#"{"error": "boom"}"#).is_err());

        let ok: ChatResponse = serde_json
            ::from_str(r#"{"response": "  keep <b>as is</b>  ", "extra": true}"#)
            .unwrap();
        assert_eq!(ok.response, "  keep <b>as is</b>  ");
    }
}
