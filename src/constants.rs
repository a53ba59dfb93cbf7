// UI Constants
pub const AGENT_NAME: &str = "Asistente de Demanda Médica";
pub const CHAT_ERROR_MESSAGE: &str =
    "Lo siento, ocurrió un error al procesar tu consulta. Por favor intenta nuevamente.";
pub const STATS_ERROR_MESSAGE: &str = "Error cargando stats";
pub const STATS_LOADING_MESSAGE: &str = "Cargando estadísticas...";
pub const CONTEXT_USED_TAG: &str = "contexto de base de datos";
pub const MAX_QUICK_QUESTIONS: usize = 9;

// API Constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const CHAT_PATH: &str = "/api/chat";
pub const STATS_PATH: &str = "/api/stats";
pub const HEALTH_PATH: &str = "/health";
pub const DEFAULT_STATS_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_QUICK_QUESTIONS: [&str; 6] = [
    "¿Qué hospitales necesitarán apósitos este mes?",
    "Muestra tendencias de guantes médicos en hospitales grandes",
    "¿Dónde están las mejores oportunidades en la Región Metropolitana?",
    "Identifica hospitales con compras recurrentes de productos Solventum",
    "¿Qué productos de la competencia están ganando mercado?",
    "Muestra predicciones para el próximo trimestre",
];
