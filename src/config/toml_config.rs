use crate::domain::model::{FlowType, TableSchema, ViewKind};
use crate::utils::error::{FlowError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub selection: SelectionConfig,
    pub schema: TableSchema,
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub exports_path: Option<String>,
    pub imports_path: Option<String>,
    pub io_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub sector: Option<String>,
    pub view: Option<ViewKind>,
    pub flow_type: Option<FlowType>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub top_k: Option<usize>,
    pub column_count: Option<usize>,
    pub bar_limit: Option<usize>,
    pub featured_sectors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: Option<String>,
    pub bundle: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlowError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlowError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性（僅檢查有填寫的欄位）
    pub fn validate_config(&self) -> Result<()> {
        let paths = [
            ("data.exports_path", &self.data.exports_path),
            ("data.imports_path", &self.data.imports_path),
            ("data.io_path", &self.data.io_path),
        ];
        for (field, path) in paths {
            if let Some(path) = path {
                validation::validate_csv_path(field, path)?;
            }
        }

        if let Some(output_path) = &self.output.output_path {
            validation::validate_path("output.output_path", output_path)?;
        }

        let counts = [
            ("layout.top_k", self.layout.top_k),
            ("layout.column_count", self.layout.column_count),
            ("layout.bar_limit", self.layout.bar_limit),
        ];
        for (field, value) in counts {
            if let Some(value) = value {
                validation::validate_positive_number(field, value, 1)?;
            }
        }

        if let Some(sector) = &self.selection.sector {
            validation::validate_non_empty_string("selection.sector", sector)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
