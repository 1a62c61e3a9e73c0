use clap::{Parser, ValueEnum};
use stackcheck_core::domain::common::{
    CacheConfig, ClassifierConfig, ClassifierKind, DatabaseConfig, LLMConfig, SourcesConfig,
    StackCheckConfig,
};

/// Ten years.
const MAX_INTERACTION_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Parser)]
#[command(name = "stackcheck-api", version, about = "Supplement stack interaction checker")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub cache: CacheArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(id = "server_port", long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "stackcheck")]
    pub name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(long = "llm-api-key", env = "LLM_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "gemini-2.0-flash")]
    pub model: String,

    #[arg(
        long = "llm-base-url",
        env = "LLM_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierArg {
    Model,
    Heuristic,
}

impl From<ClassifierArg> for ClassifierKind {
    fn from(value: ClassifierArg) -> Self {
        match value {
            ClassifierArg::Model => ClassifierKind::Model,
            ClassifierArg::Heuristic => ClassifierKind::Heuristic,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ClassifierArgs {
    #[arg(long = "classifier", env = "CLASSIFIER", value_enum, default_value_t = ClassifierArg::Model)]
    pub kind: ClassifierArg,

    #[arg(
        long = "classification-cache-capacity",
        env = "CLASSIFICATION_CACHE_CAPACITY",
        default_value_t = 1024
    )]
    pub memo_capacity: usize,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long = "suppai-base-url", env = "SUPPAI_BASE_URL", default_value = "https://supp.ai")]
    pub suppai_base_url: String,

    #[arg(long = "webmd-base-url", env = "WEBMD_BASE_URL", default_value = "https://www.webmd.com")]
    pub webmd_base_url: String,

    #[arg(
        long = "wikipedia-base-url",
        env = "WIKIPEDIA_BASE_URL",
        default_value = "https://en.wikipedia.org"
    )]
    pub wikipedia_base_url: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CacheArgs {
    #[arg(
        long = "interaction-ttl-days",
        env = "INTERACTION_TTL_DAYS",
        default_value_t = 30,
        value_parser = clap::value_parser!(i64).range(1..=MAX_INTERACTION_TTL_DAYS)
    )]
    pub interaction_ttl_days: i64,

    #[arg(long = "recent-stacks-capacity", env = "RECENT_STACKS_CAPACITY", default_value_t = 10)]
    pub recent_stacks_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-format", env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub format: LogFormat,
}

impl From<Args> for StackCheckConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                api_key: args.llm.api_key.filter(|key| !key.trim().is_empty()),
                model: args.llm.model,
                base_url: args.llm.base_url,
            },
            classifier: ClassifierConfig {
                kind: args.classifier.kind.into(),
                memo_capacity: args.classifier.memo_capacity,
            },
            sources: SourcesConfig {
                suppai_base_url: args.sources.suppai_base_url,
                webmd_base_url: args.sources.webmd_base_url,
                wikipedia_base_url: args.sources.wikipedia_base_url,
            },
            cache: CacheConfig {
                interaction_ttl_days: args.cache.interaction_ttl_days,
                recent_stacks_capacity: args.cache.recent_stacks_capacity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_convert_into_core_config() {
        let args = Args::try_parse_from([
            "stackcheck-api",
            "--classifier",
            "heuristic",
            "--database-host",
            "db.internal",
            "--database-port",
            "6543",
            "--interaction-ttl-days",
            "7",
            "--llm-api-key",
            "  ",
        ])
        .unwrap();

        let config = StackCheckConfig::from(args);

        assert_eq!(config.classifier.kind, ClassifierKind::Heuristic);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.cache.interaction_ttl_days, 7);
        assert_eq!(config.llm.api_key, None);
    }

    #[test]
    fn test_interaction_ttl_must_be_in_range() {
        for ttl in ["--interaction-ttl-days=0", "--interaction-ttl-days=-5", "--interaction-ttl-days=100000"] {
            assert!(Args::try_parse_from(["stackcheck-api", ttl]).is_err(), "{ttl}");
        }

        let args = Args::try_parse_from(["stackcheck-api", "--interaction-ttl-days=90"]).unwrap();
        assert_eq!(args.cache.interaction_ttl_days, 90);
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = Args::try_parse_from([
            "stackcheck-api",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }
}
