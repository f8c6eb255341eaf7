use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotPregunta {
    pub mensaje: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotRespuesta {
    #[serde(alias = "response", alias = "message")]
    pub respuesta: String,
}
