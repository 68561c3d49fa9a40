use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Category assigned when none of a page's category tokens matches.
pub const UNKNOWN_CATEGORY: &str = "unknown";

const PAGE_URL_PREFIX: &str = "https://borderlands.2k.com/borderlands-4/game-info/vault-hunters";

/// One `(token, category)` classification rule. Rules are evaluated in order; first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Substring looked up in the resolved image URL.
    pub token: String,
    /// Category (and directory) name assigned on match.
    pub category: String,
}

impl CategoryRule {
    pub fn new(token: &str, category: &str) -> Self {
        Self {
            token: token.to_string(),
            category: category.to_string(),
        }
    }
}

/// One scraped page: where it lives, how to recognize its icons, where they go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Short name used on the command line (e.g. "amon").
    pub name: String,
    /// Page URL fetched with a single GET.
    pub url: String,
    /// Marker every icon `src` must contain (e.g. "BL4_Amon_Tree").
    pub root_token: String,
    /// Subdirectory under the output dir; defaults to `name` when empty.
    #[serde(default)]
    pub output_subdir: String,
    /// Ordered category rules.
    pub categories: Vec<CategoryRule>,
    /// Categories listed in the end-of-batch summary, in print order.
    pub summary_categories: Vec<String>,
}

impl PageConfig {
    /// Directory name for this page under the output dir.
    pub fn subdir(&self) -> &str {
        if self.output_subdir.is_empty() {
            &self.name
        } else {
            &self.output_subdir
        }
    }
}

/// HTTP settings shared by page fetches and image downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Receive buffer size in bytes; images are written in chunks of at most this size.
    pub chunk_size: usize,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds (None = no limit).
    pub request_timeout_secs: Option<u64>,
    /// Overrides the default User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            connect_timeout_secs: 30,
            request_timeout_secs: None,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/iconfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconfetchConfig {
    /// Base output directory; pages write under `<output_dir>/<page>/<category>/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extension of files considered by the renamer (including the dot).
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "builtin_pages")]
    pub pages: Vec<PageConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("skill-icons")
}

fn default_image_extension() -> String {
    ".png".to_string()
}

impl Default for IconfetchConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image_extension: default_image_extension(),
            http: HttpConfig::default(),
            pages: builtin_pages(),
        }
    }
}

impl IconfetchConfig {
    /// Looks up a configured page by name (ASCII case-insensitive).
    pub fn page(&self, name: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

fn page(
    name: &str,
    root_token: &str,
    rules: &[(&str, &str)],
    summary: &[&str],
) -> PageConfig {
    PageConfig {
        name: name.to_string(),
        url: format!("{}/{}/", PAGE_URL_PREFIX, name),
        root_token: root_token.to_string(),
        output_subdir: String::new(),
        categories: rules
            .iter()
            .map(|(token, category)| CategoryRule::new(token, category))
            .collect(),
        summary_categories: summary.iter().map(|s| s.to_string()).collect(),
    }
}

/// The three vault hunter pages the tool ships with.
pub fn builtin_pages() -> Vec<PageConfig> {
    vec![
        page(
            "amon",
            "BL4_Amon_Tree",
            &[
                ("Calamity", "calamity"),
                ("Vengeance", "vengeance"),
                ("Cybernetics", "cybernetics"),
            ],
            &["calamity", "vengeance", "cybernetics"],
        ),
        page(
            "rafa",
            "BL4_Rafa_Tree",
            &[
                ("People_Person", "people_person"),
                ("Remote_Agent", "remote_agent"),
                ("This_Years_Gimmick", "this_years_gimmick"),
                ("This_Year_s_Gimmick", "this_years_gimmick"),
            ],
            &["people_person", "remote_agent", "this_years_gimmick"],
        ),
        page(
            "harlowe",
            "BL4_Harlowe_Tree",
            &[
                ("Creative_Bursts", "creative_bursts"),
                ("Seize_the_Day", "seize_the_day"),
                ("Cosmic_Brilliance", "cosmic_brilliance"),
            ],
            &["creative_bursts", "seize_the_day", "cosmic_brilliance"],
        ),
    ]
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("iconfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<IconfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = IconfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: IconfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = IconfetchConfig::default();
        assert_eq!(cfg.output_dir, PathBuf::from("skill-icons"));
        assert_eq!(cfg.image_extension, ".png");
        assert_eq!(cfg.http.chunk_size, 8192);
        assert!(cfg.http.request_timeout_secs.is_none());
        let names: Vec<&str> = cfg.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["amon", "rafa", "harlowe"]);
    }

    #[test]
    fn builtin_page_urls_and_subdirs() {
        let cfg = IconfetchConfig::default();
        let amon = cfg.page("amon").unwrap();
        assert_eq!(
            amon.url,
            "https://borderlands.2k.com/borderlands-4/game-info/vault-hunters/amon/"
        );
        assert_eq!(amon.subdir(), "amon");
        assert_eq!(amon.categories[0], CategoryRule::new("Calamity", "calamity"));
        assert!(cfg.page("AMON").is_some());
        assert!(cfg.page("moxxi").is_none());
    }

    #[test]
    fn rafa_gimmick_spellings_share_category() {
        let cfg = IconfetchConfig::default();
        let rafa = cfg.page("rafa").unwrap();
        let gimmick: Vec<&str> = rafa
            .categories
            .iter()
            .filter(|r| r.category == "this_years_gimmick")
            .map(|r| r.token.as_str())
            .collect();
        assert_eq!(gimmick, ["This_Years_Gimmick", "This_Year_s_Gimmick"]);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = IconfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: IconfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.output_dir, cfg.output_dir);
        assert_eq!(parsed.http, cfg.http);
        assert_eq!(parsed.pages, cfg.pages);
    }

    #[test]
    fn config_toml_custom_page() {
        let toml = r#"
            output_dir = "icons"

            [http]
            request_timeout_secs = 20

            [[pages]]
            name = "vex"
            url = "https://example.com/vex/"
            root_token = "BL4_Vex_Tree"
            output_subdir = "vex-icons"
            categories = [
                { token = "Bloodletter", category = "bloodletter" },
                { token = "Incarnate", category = "incarnate" },
            ]
            summary_categories = ["bloodletter", "incarnate"]
        "#;
        let cfg: IconfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("icons"));
        assert_eq!(cfg.image_extension, ".png");
        assert_eq!(cfg.http.request_timeout_secs, Some(20));
        assert_eq!(cfg.http.chunk_size, 8192);
        assert_eq!(cfg.pages.len(), 1);
        let vex = &cfg.pages[0];
        assert_eq!(vex.subdir(), "vex-icons");
        assert_eq!(vex.categories[1].category, "incarnate");
    }

    #[test]
    fn config_toml_empty_uses_builtin_pages() {
        let cfg: IconfetchConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.pages.len(), 3);
        assert_eq!(cfg.http, HttpConfig::default());
    }
}
