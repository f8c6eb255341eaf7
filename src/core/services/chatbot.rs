use crate::core::models::{ChatbotPregunta, ChatbotRespuesta};
use crate::error::{AppError, AppResult};
use crate::upstream::{Backend, BearerToken};
use serde_json::Value;

const INTERACT_PATH: &str = "/chatbot/interact";
const MAX_MENSAJE: usize = 2000;

pub struct ChatbotService;

impl ChatbotService {
    pub async fn preguntar(
        backend: &dyn Backend,
        token: &BearerToken,
        pregunta: &ChatbotPregunta,
    ) -> AppResult<ChatbotRespuesta> {
        let mensaje = pregunta.mensaje.trim();
        if mensaje.is_empty() {
            return Err(AppError::Validation("El mensaje está vacío".to_string()));
        }
        if mensaje.chars().count() > MAX_MENSAJE {
            return Err(AppError::Validation(format!(
                "El mensaje supera {} caracteres",
                MAX_MENSAJE
            )));
        }

        let body = serde_json::json!({ "mensaje": mensaje });
        match backend.post(token, INTERACT_PATH, &body).await? {
            Value::String(respuesta) => Ok(ChatbotRespuesta { respuesta }),
            value => serde_json::from_value(value)
                .map_err(|e| AppError::Decode(format!("{}: {}", INTERACT_PATH, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_respuesta_texto_u_objeto() {
        let token = BearerToken::parse("t").unwrap();
        let pregunta = ChatbotPregunta {
            mensaje: " ¿Cuánto vendí hoy? ".to_string(),
        };

        let backend = FakeBackend::new();
        backend.ok("POST", "/chatbot/interact", json!({ "response": "Vendiste 120" }));
        let r = ChatbotService::preguntar(&backend, &token, &pregunta).await.unwrap();
        assert_eq!(r.respuesta, "Vendiste 120");
        assert_eq!(backend.llamadas()[0].body, Some(json!({ "mensaje": "¿Cuánto vendí hoy?" })));

        let backend = FakeBackend::new();
        backend.ok("POST", "/chatbot/interact", json!("Hola"));
        let r = ChatbotService::preguntar(&backend, &token, &pregunta).await.unwrap();
        assert_eq!(r.respuesta, "Hola");
    }

    #[tokio::test]
    async fn test_mensaje_vacio() {
        let backend = FakeBackend::new();
        let token = BearerToken::parse("t").unwrap();
        let pregunta = ChatbotPregunta {
            mensaje: "   ".to_string(),
        };
        assert!(ChatbotService::preguntar(&backend, &token, &pregunta).await.is_err());
        assert!(backend.llamadas().is_empty());
    }
}
