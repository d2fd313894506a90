use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 部署常用的环境变量，优先级高于 LMS_* 前缀变量
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("DATABASE_URL", "database.url"),
];

type EnvMap = Map<String, String>;

impl AppConfig {
    /// 从配置文件与进程环境变量加载
    pub fn load() -> Result<Self, ConfigError> {
        let env: EnvMap = std::env::vars().collect();
        let profile = env
            .get("APP_ENV")
            .map(String::as_str)
            .unwrap_or("development");

        let files = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{profile}")).required(false));

        Self::from_layers(files, &env)
    }

    /// 在文件层之上叠加环境变量，再做派生与校验
    ///
    /// LMS_ 前缀变量用双下划线表示层级，如 `LMS_DATABASE__POOL_SIZE`。
    fn from_layers(files: ConfigBuilder<DefaultState>, env: &EnvMap) -> Result<Self, ConfigError> {
        let mut builder = files.add_source(
            Environment::with_prefix("LMS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, env.get(*var).cloned())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.resolve_workers(num_cpus::get());
        app_config.validate()?;
        Ok(app_config)
    }

    // 0 表示按 CPU 核数，结果不超过 max_workers
    fn resolve_workers(&mut self, cpus: usize) {
        let server = &mut self.server;
        let wanted = if server.workers == 0 { cpus } else { server.workers };
        server.workers = wanted.clamp(1, server.max_workers.max(1));
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let problems: Vec<&str> = [
            (self.server.max_workers == 0, "server.max_workers 至少为 1"),
            (self.database.pool_size == 0, "database.pool_size 至少为 1"),
            (self.database.url.trim().is_empty(), "database.url 不能为空"),
            (
                self.server.limits.max_payload_size == 0,
                "server.limits.max_payload_size 必须大于 0",
            ),
        ]
        .into_iter()
        .filter_map(|(bad, msg)| bad.then_some(msg))
        .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "配置无效: {}",
                problems.join("; ")
            )))
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Unix 套接字路径，未配置时为 None
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const BASE: &str = r#"
[app]
system_name = "Rust LMS"
environment = "development"
log_level = "info"

[server]
host = "127.0.0.1"
port = 8080
unix_socket_path = ""
workers = 0
max_workers = 4

[server.timeouts]
client_request = 5000
client_disconnect = 1000
keep_alive = 30

[server.limits]
max_payload_size = 1048576

[database]
url = "lms.db"
pool_size = 10
timeout = 30

[cors]
allowed_origins = ["*"]
allowed_methods = ["GET"]
allowed_headers = ["Content-Type"]
max_age = 3600
"#;

    fn files(toml: &str) -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(toml, FileFormat::Toml))
    }

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_file_defaults() {
        let config = AppConfig::from_layers(files(BASE), &EnvMap::default()).unwrap();
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database.pool_size, 10);
        assert!(config.is_development());
        assert!((1..=4).contains(&config.server.workers));
        #[cfg(unix)]
        assert_eq!(config.unix_socket_path(), None);
    }

    #[test]
    fn test_env_layers() {
        let vars = env(&[
            ("LMS_DATABASE__POOL_SIZE", "3"),
            ("LMS_APP__SYSTEM_NAME", "Campus"),
            ("SERVER_PORT", "9090"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_ENV", "production"),
            ("UNIX_SOCKET", "/tmp/lms.sock"),
        ]);
        let config = AppConfig::from_layers(files(BASE), &vars).unwrap();

        assert_eq!(config.database.pool_size, 3);
        assert_eq!(config.app.system_name, "Campus");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(!config.is_development());
        #[cfg(unix)]
        assert_eq!(config.unix_socket_path(), Some("/tmp/lms.sock"));
    }

    #[test]
    fn test_explicit_override_beats_prefixed_var() {
        let vars = env(&[
            ("LMS_DATABASE__URL", "prefixed.db"),
            ("DATABASE_URL", "explicit.db"),
        ]);
        let config = AppConfig::from_layers(files(BASE), &vars).unwrap();
        assert_eq!(config.database.url, "explicit.db");
    }

    #[test]
    fn test_workers_are_capped() {
        let vars = env(&[("CPU_COUNT", "64")]);
        let config = AppConfig::from_layers(files(BASE), &vars).unwrap();
        assert_eq!(config.server.workers, 4);

        let mut config = config;
        config.server.workers = 0;
        config.resolve_workers(2);
        assert_eq!(config.server.workers, 2);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let broken = BASE
            .replace("pool_size = 10", "pool_size = 0")
            .replace("max_payload_size = 1048576", "max_payload_size = 0");
        let err = AppConfig::from_layers(files(&broken), &EnvMap::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("database.pool_size"));
        assert!(msg.contains("max_payload_size"));
    }
}
