use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Upper bound on tokens a single fragment may produce.
    #[config(env = "SQLFRAG_MAX_TOKENS", default = 100000)]
    pub max_tokens: usize,
    /// Width of the frame pushed by `CodeBuilder::indent`.
    #[config(env = "SQLFRAG_INDENT_WIDTH", default = 2)]
    pub indent_width: usize,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
