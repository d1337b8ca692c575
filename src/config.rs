//! Run configuration. The binary fills this from flags and environment; the
//! library only ever reads it.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.wattpad.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_FONTS_DIR: &str = "fonts";
pub const DEFAULT_FONT_SIZE: u8 = 16;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Per-request timeout for every HTTP call.
    pub timeout: Duration,
    /// Site root used for the storytext endpoint.
    pub base_url: String,
    pub user_agent: String,
    /// Directory scanned for `*.ttf` files.
    pub fonts_dir: PathBuf,
    /// Body text size in points; headings scale from it.
    pub font_size: u8,
    /// Explicit output path. `None` derives one from the story title.
    pub output: Option<PathBuf>,
    /// Also write the assembled markup here.
    pub emit_markup: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
            font_size: DEFAULT_FONT_SIZE,
            output: None,
            emit_markup: None,
        }
    }
}
