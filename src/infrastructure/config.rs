use crate::application::assistant_service::PlannerMode;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    pub server: ServerSettings,
    pub evaluation: UpstreamSettings,
    pub intake: UpstreamSettings,
    pub assistant: AssistantSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// "local" for the rule-based planner, "remote" for the AI proxy.
    #[serde(default = "default_planner")]
    pub planner: String,
}

fn default_planner() -> String {
    "local".to_string()
}

impl AssistantSettings {
    pub fn planner_mode(&self) -> anyhow::Result<PlannerMode> {
        match self.planner.as_str() {
            "local" => Ok(PlannerMode::Local),
            "remote" => Ok(PlannerMode::Remote),
            other => anyhow::bail!("unknown planner mode: {other}"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory where the console persists its JSON state.
    pub history_path: String,
}

pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/console"))
        .add_source(config::Environment::with_prefix("CONSOLE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_console_config() {
        let raw = r#"
            [server]
            bind = "127.0.0.1:9090"

            [evaluation]
            base_url = "http://evaluation:8081"

            [intake]
            base_url = "http://intake:8082"
            timeout_secs = 30

            [assistant]
            base_url = "http://assistant:8083"
            planner = "remote"

            [storage]
            history_path = "data"
        "#;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap();
        let cfg: ConsoleConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.server.bind, "127.0.0.1:9090");
        assert_eq!(cfg.evaluation.timeout_secs, 10, "default applies");
        assert_eq!(cfg.intake.timeout_secs, 30);
        assert_eq!(cfg.assistant.planner_mode().unwrap(), PlannerMode::Remote);
    }

    #[test]
    fn test_unknown_planner_mode_is_rejected() {
        let settings = AssistantSettings {
            base_url: "http://assistant".to_string(),
            timeout_secs: 10,
            planner: "oracle".to_string(),
        };
        assert!(settings.planner_mode().is_err());
    }
}
