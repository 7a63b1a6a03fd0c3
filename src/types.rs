use crate::error::{Result, WatcherError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 扫描接口成功时返回的数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub scanned_posts: i64,

    #[serde(default)]
    pub new_launches: i64,

    // 单独解析，见 `from_body`
    #[serde(default, skip_deserializing)]
    pub details: Vec<TokenRecord>,

    /// `details` 既不是数组也不是 null 时，记录其实际类型
    #[serde(skip)]
    pub invalid_details: Option<String>,

    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub timestamp: Option<String>,
}

/// 新发现的代币；两个字段在响应中都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// 扫描失败时的响应体（`500 { "error": ..., "message": ... }`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ScanResult {
    /// 解析响应体，非 JSON 对象直接拒绝
    ///
    /// `details` 宽松解析：格式错误的条目不会让整个响应失败，
    /// 而是在输出明细时报告。
    pub fn from_body(body: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(WatcherError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        let details = value.as_object_mut().and_then(|o| o.remove("details"));

        let mut result: ScanResult = serde_json::from_value(value)?;
        match details {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                result.details = entries.iter().map(TokenRecord::from_value).collect();
            }
            Some(other) => result.invalid_details = Some(json_kind(&other).to_string()),
        }

        Ok(result)
    }
}

impl TokenRecord {
    /// 非字符串的 name/symbol 视为缺失
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: text("name"),
            symbol: text("symbol"),
        }
    }

    pub fn labels(&self, index: usize) -> Result<(&str, &str)> {
        let name = self
            .name
            .as_deref()
            .ok_or(WatcherError::MissingField { index, field: "name" })?;
        let symbol = self
            .symbol
            .as_deref()
            .ok_or(WatcherError::MissingField { index, field: "symbol" })?;
        Ok((name, symbol))
    }
}

impl ScanFailure {
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<ScanFailure>(body)
            .ok()
            .filter(|f| f.error.is_some() || f.message.is_some())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
