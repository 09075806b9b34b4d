use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FlowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlowError::ConfigError { .. }
            | FlowError::MissingConfigError { .. }
            | FlowError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FlowError::CsvError(_) | FlowError::IoError(_) => ErrorCategory::Input,
            FlowError::ProcessingError { .. } => ErrorCategory::Processing,
            FlowError::SerializationError(_) | FlowError::ZipError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlowError::ProcessingError { .. } => ErrorSeverity::Medium,
            FlowError::CsvError(_)
            | FlowError::ConfigError { .. }
            | FlowError::MissingConfigError { .. }
            | FlowError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            FlowError::IoError(_) | FlowError::SerializationError(_) | FlowError::ZipError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 依嚴重度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "檢查命令列參數或 TOML 配置檔中的欄位",
            ErrorCategory::Input => "確認資料表路徑存在且為有效的 CSV 檔案",
            ErrorCategory::Processing => "確認所選的部門與流向在資料表中有對應資料",
            ErrorCategory::Output => "確認輸出目錄可寫入且磁碟空間足夠",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlowError::MissingConfigError { field } => format!("缺少必要設定: {}", field),
            FlowError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定 {} 無效: {}", field, reason)
            }
            FlowError::CsvError(e) => format!("無法解析資料表: {}", e),
            FlowError::IoError(e) => format!("檔案存取失敗: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = FlowError::MissingConfigError {
            field: "data.exports_path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("data.exports_path"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = FlowError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_every_failure_exits_non_zero() {
        let errors = vec![
            FlowError::ProcessingError {
                message: "no sector".to_string(),
            },
            FlowError::ConfigError {
                message: "bad".to_string(),
            },
            FlowError::from(std::io::Error::other("disk")),
        ];
        let codes: Vec<i32> = errors.iter().map(FlowError::exit_code).collect();
        assert_eq!(codes, vec![2, 1, 3]);
    }
}
