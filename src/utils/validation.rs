use crate::utils::error::{FlowError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 資料表必須是 .csv 檔
pub fn validate_csv_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        Some(ext) => Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Unsupported file extension: {}. Expected csv", ext),
        }),
        None => Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FlowError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FlowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_csv_path() {
        assert!(validate_csv_path("data.exports_path", "data/exports.csv").is_ok());
        assert!(validate_csv_path("data.exports_path", "data/EXPORTS.CSV").is_ok());
        assert!(validate_csv_path("data.exports_path", "data/exports.xlsx").is_err());
        assert!(validate_csv_path("data.exports_path", "data/exports").is_err());
        assert!(validate_csv_path("data.exports_path", "").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("layout.top_k", 10, 1).is_ok());
        assert!(validate_positive_number("layout.top_k", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let sector: Option<String> = None;
        assert!(validate_required_field("selection.sector", &sector).is_err());

        let sector = Some("Manufacture of textiles".to_string());
        assert_eq!(
            validate_required_field("selection.sector", &sector).unwrap(),
            "Manufacture of textiles"
        );
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("selection.sector", "   ").is_err());
        assert!(validate_non_empty_string("selection.sector", "Textiles").is_ok());
    }
}
