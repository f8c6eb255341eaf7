//! Servicios
//! Orquestan llamadas al API remoto y los cálculos del núcleo

pub mod caja;
pub mod chatbot;
pub mod personal;
pub mod reportes;

pub use caja::{CajaService, MovimientoRegistrado};
pub use chatbot::ChatbotService;
pub use personal::PersonalService;
pub use reportes::{Periodo, ReporteService};
