use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub workflow: WorkflowConfig,
    pub agents: AgentsConfig,
    pub knowledge: KnowledgeConfig,
    pub model_gateway: ModelGatewayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    pub log_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentsConfig {
    pub max_content_length: usize,
    pub sem_max_iterations: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KnowledgeConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub max_results: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelGatewayConfig {
    pub default_provider: String,
    pub model: String,

    pub openai_api_key: Option<Secret<String>>,
    pub anthropic_api_key: Option<Secret<String>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    pub json_logs: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CAUSALFLOW_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__WORKFLOW__LOG_DIR=/tmp/logs to app.workflow.log_dir
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workflow: WorkflowConfig {
                log_dir: "logs".into(),
            },
            agents: AgentsConfig {
                max_content_length: 1500,
                sem_max_iterations: 5,
            },
            knowledge: KnowledgeConfig {
                enabled: true,
                endpoint: "https://en.wikipedia.org/w/rest.php/v1/search/page".into(),
                timeout_ms: 10_000,
                max_results: 3,
            },
            model_gateway: ModelGatewayConfig {
                default_provider: "openai".into(),
                model: "gpt-4o-mini".into(),
                openai_api_key: None,
                anthropic_api_key: None,
            },
            logging: LoggingConfig { json_logs: false },
        }
    }
}
