// ==========================================
// 班次产能排产系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 扁平 key/value（JSON 配置文件,嵌套对象按 "." 展开）
// ==========================================

use crate::config::allocation_config_trait::AllocationConfigReader;
use crate::config::column_mapping::{
    CapacityColumns, ColumnAliases, LedgerColumns, OrderColumns, ALIAS_SEPARATOR,
};
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::JoinKeyMode;
use crate::i18n::SUPPORTED_LOCALES;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// 配置目录下的应用子目录名
pub const APP_CONFIG_DIR: &str = "shift-capacity-aps";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建仅含内置默认值的 ConfigManager
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 配置文件创建
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let mut manager = Self::from_json_str(&content)?;
        manager.source = Some(path.to_path_buf());
        tracing::info!(
            config_path = %path.display(),
            keys = manager.values.len(),
            "配置文件加载完成"
        );
        Ok(manager)
    }

    /// 从 JSON 文本创建
    ///
    /// 支持两种写法（可混用）:
    /// - 扁平: {"columns.order.quantity": "QTY|Qty"}
    /// - 嵌套: {"columns": {"order": {"quantity": ["QTY", "Qty"]}}}
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let root: Value = serde_json::from_str(content)?;
        let Value::Object(map) = root else {
            return Err(ConfigError::NotAnObject);
        };

        let mut values = HashMap::new();
        for (key, value) in map {
            flatten_value(&key, value, &mut values);
        }

        Ok(Self {
            values,
            source: None,
        })
    }

    /// 按查找顺序加载配置
    ///
    /// 1. 显式指定的路径（不存在时报错）
    /// 2. 系统配置目录下的 shift-capacity-aps/config.json
    /// 3. 内置默认值
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                tracing::debug!("未找到配置文件,使用内置默认值");
                Ok(Self::new())
            }
        }
    }

    /// 系统配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// 配置来源文件（内置默认值时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 覆写单个配置项（例如命令行参数）
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    fn get_aliases(&self, key: &str, default: ColumnAliases) -> ColumnAliases {
        match self.get_config_value(key) {
            Some(raw) => ColumnAliases::parse(raw).unwrap_or_else(|| {
                tracing::warn!(config_key = key, raw_value = %raw, "列名配置为空，使用默认值");
                default
            }),
            None => default,
        }
    }

    fn get_column_name(&self, key: &str, default: String) -> String {
        match self.get_config_value(key).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> ConfigResult<bool> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => parse_bool(raw).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                message: "期望 true/false".to_string(),
            }),
        }
    }

    /// 全部生效配置（内置默认值 + 文件值）
    fn effective_values(&self) -> ConfigResult<BTreeMap<String, String>> {
        let orders = self.get_order_columns()?;
        let capacity = self.get_capacity_columns()?;
        let ledger = self.get_ledger_columns()?;

        let mut effective: BTreeMap<String, String> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let alias_entries = [
            (config_keys::ORDER_QUANTITY, &orders.quantity),
            (config_keys::ORDER_NET_AMOUNT, &orders.net_amount),
            (config_keys::ORDER_STYLE, &orders.style),
            (config_keys::ORDER_ASSORTMENT, &orders.assortment),
            (config_keys::ORDER_ZONE, &orders.zone),
            (config_keys::ORDER_ISSUE_DATE, &orders.issue_date),
            (config_keys::ORDER_GROUP, &orders.group),
            (config_keys::ORDER_COLOR, &orders.color),
            (config_keys::ORDER_SIZE, &orders.size),
            (config_keys::CAPACITY_LINK_KEY, &capacity.link_key),
            (config_keys::CAPACITY_ZONE, &capacity.zone),
            (config_keys::CAPACITY_STYLE, &capacity.style),
            (config_keys::CAPACITY_VALUE, &capacity.capacity),
        ];
        for (key, aliases) in alias_entries {
            effective.insert(key.to_string(), aliases.joined());
        }

        let output_entries = [
            (config_keys::OUTPUT_ZONE, &ledger.zone),
            (config_keys::OUTPUT_ASSORTMENT, &ledger.assortment),
            (config_keys::OUTPUT_STYLE, &ledger.style),
            (config_keys::OUTPUT_CAPACITY, &ledger.capacity),
            (config_keys::OUTPUT_DAY, &ledger.day),
            (config_keys::OUTPUT_SHIFT, &ledger.shift),
            (config_keys::OUTPUT_ALLOCATED, &ledger.allocated),
            (config_keys::OUTPUT_LINK_KEY, &ledger.link_key),
            (config_keys::OUTPUT_GROUP, &ledger.group),
            (config_keys::OUTPUT_COLOR, &ledger.color),
            (config_keys::OUTPUT_SIZE, &ledger.size),
            (config_keys::OUTPUT_ORIGINAL_QUANTITY, &ledger.original_quantity),
        ];
        for (key, name) in output_entries {
            effective.insert(key.to_string(), name.clone());
        }

        effective.insert(
            config_keys::REQUIRE_ISSUE_DATE.to_string(),
            self.get_require_issue_date()?.to_string(),
        );
        effective.insert(
            config_keys::JOIN_KEY_MODE.to_string(),
            self.get_join_key_mode()?.to_string(),
        );
        effective.insert(
            config_keys::INCLUDE_PASSTHROUGH.to_string(),
            self.get_include_passthrough()?.to_string(),
        );
        effective.insert(
            config_keys::WRITE_BOM.to_string(),
            self.get_write_bom()?.to_string(),
        );
        effective.insert(config_keys::LOCALE.to_string(), self.get_locale()?);

        Ok(effective)
    }
}

// ==========================================
// AllocationConfigReader Trait 实现
// ==========================================
impl AllocationConfigReader for ConfigManager {
    // ===== 列名映射 =====

    fn get_order_columns(&self) -> ConfigResult<OrderColumns> {
        let d = OrderColumns::default();
        Ok(OrderColumns {
            quantity: self.get_aliases(config_keys::ORDER_QUANTITY, d.quantity),
            net_amount: self.get_aliases(config_keys::ORDER_NET_AMOUNT, d.net_amount),
            style: self.get_aliases(config_keys::ORDER_STYLE, d.style),
            assortment: self.get_aliases(config_keys::ORDER_ASSORTMENT, d.assortment),
            zone: self.get_aliases(config_keys::ORDER_ZONE, d.zone),
            issue_date: self.get_aliases(config_keys::ORDER_ISSUE_DATE, d.issue_date),
            group: self.get_aliases(config_keys::ORDER_GROUP, d.group),
            color: self.get_aliases(config_keys::ORDER_COLOR, d.color),
            size: self.get_aliases(config_keys::ORDER_SIZE, d.size),
        })
    }

    fn get_capacity_columns(&self) -> ConfigResult<CapacityColumns> {
        let d = CapacityColumns::default();
        Ok(CapacityColumns {
            link_key: self.get_aliases(config_keys::CAPACITY_LINK_KEY, d.link_key),
            zone: self.get_aliases(config_keys::CAPACITY_ZONE, d.zone),
            style: self.get_aliases(config_keys::CAPACITY_STYLE, d.style),
            capacity: self.get_aliases(config_keys::CAPACITY_VALUE, d.capacity),
        })
    }

    fn get_ledger_columns(&self) -> ConfigResult<LedgerColumns> {
        let d = LedgerColumns::default();
        Ok(LedgerColumns {
            zone: self.get_column_name(config_keys::OUTPUT_ZONE, d.zone),
            assortment: self.get_column_name(config_keys::OUTPUT_ASSORTMENT, d.assortment),
            style: self.get_column_name(config_keys::OUTPUT_STYLE, d.style),
            capacity: self.get_column_name(config_keys::OUTPUT_CAPACITY, d.capacity),
            day: self.get_column_name(config_keys::OUTPUT_DAY, d.day),
            shift: self.get_column_name(config_keys::OUTPUT_SHIFT, d.shift),
            allocated: self.get_column_name(config_keys::OUTPUT_ALLOCATED, d.allocated),
            link_key: self.get_column_name(config_keys::OUTPUT_LINK_KEY, d.link_key),
            group: self.get_column_name(config_keys::OUTPUT_GROUP, d.group),
            color: self.get_column_name(config_keys::OUTPUT_COLOR, d.color),
            size: self.get_column_name(config_keys::OUTPUT_SIZE, d.size),
            original_quantity: self
                .get_column_name(config_keys::OUTPUT_ORIGINAL_QUANTITY, d.original_quantity),
        })
    }

    // ===== 筛选 =====

    fn get_require_issue_date(&self) -> ConfigResult<bool> {
        self.get_bool(config_keys::REQUIRE_ISSUE_DATE, true)
    }

    // ===== 分配 =====

    fn get_join_key_mode(&self) -> ConfigResult<JoinKeyMode> {
        let value = self.get_config_or_default(config_keys::JOIN_KEY_MODE, "COMPOSITE");
        JoinKeyMode::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
            key: config_keys::JOIN_KEY_MODE.to_string(),
            value: value.clone(),
            message: "期望 COMPOSITE 或 CONCATENATED".to_string(),
        })
    }

    // ===== 导出 =====

    fn get_include_passthrough(&self) -> ConfigResult<bool> {
        self.get_bool(config_keys::INCLUDE_PASSTHROUGH, true)
    }

    fn get_write_bom(&self) -> ConfigResult<bool> {
        self.get_bool(config_keys::WRITE_BOM, true)
    }

    // ===== 其他 =====

    fn get_locale(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::LOCALE, "zh-CN");
        let locale = value.trim();
        if SUPPORTED_LOCALES.contains(&locale) {
            Ok(locale.to_string())
        } else {
            Err(ConfigError::InvalidValue {
                key: config_keys::LOCALE.to_string(),
                value: locale.to_string(),
                message: format!("期望 {}", SUPPORTED_LOCALES.join(" 或 ")),
            })
        }
    }

    fn get_config_snapshot(&self) -> ConfigResult<String> {
        let effective = self.effective_values()?;
        Ok(serde_json::to_string(&effective)?)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 嵌套 JSON → 扁平 key/value；数组按别名分隔符拼接
fn flatten_value(prefix: &str, value: Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_value(&format!("{}.{}", prefix, key), child, out);
            }
        }
        Value::Array(items) => {
            let joined = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(&ALIAS_SEPARATOR.to_string());
            out.insert(prefix.to_string(), joined);
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s);
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 订单表列名（别名以 | 分隔）
    pub const ORDER_QUANTITY: &str = "columns.order.quantity";
    pub const ORDER_NET_AMOUNT: &str = "columns.order.net_amount";
    pub const ORDER_STYLE: &str = "columns.order.style";
    pub const ORDER_ASSORTMENT: &str = "columns.order.assortment";
    pub const ORDER_ZONE: &str = "columns.order.zone";
    pub const ORDER_ISSUE_DATE: &str = "columns.order.issue_date";
    pub const ORDER_GROUP: &str = "columns.order.group";
    pub const ORDER_COLOR: &str = "columns.order.color";
    pub const ORDER_SIZE: &str = "columns.order.size";

    // 产能表列名
    pub const CAPACITY_LINK_KEY: &str = "columns.capacity.link_key";
    pub const CAPACITY_ZONE: &str = "columns.capacity.zone";
    pub const CAPACITY_STYLE: &str = "columns.capacity.style";
    pub const CAPACITY_VALUE: &str = "columns.capacity.capacity";

    // 台账输出列名
    pub const OUTPUT_ZONE: &str = "columns.output.zone";
    pub const OUTPUT_ASSORTMENT: &str = "columns.output.assortment";
    pub const OUTPUT_STYLE: &str = "columns.output.style";
    pub const OUTPUT_CAPACITY: &str = "columns.output.capacity";
    pub const OUTPUT_DAY: &str = "columns.output.day";
    pub const OUTPUT_SHIFT: &str = "columns.output.shift";
    pub const OUTPUT_ALLOCATED: &str = "columns.output.allocated";
    pub const OUTPUT_LINK_KEY: &str = "columns.output.link_key";
    pub const OUTPUT_GROUP: &str = "columns.output.group";
    pub const OUTPUT_COLOR: &str = "columns.output.color";
    pub const OUTPUT_SIZE: &str = "columns.output.size";
    pub const OUTPUT_ORIGINAL_QUANTITY: &str = "columns.output.original_quantity";

    // 筛选 / 分配 / 导出
    pub const REQUIRE_ISSUE_DATE: &str = "filter.require_issue_date";
    pub const JOIN_KEY_MODE: &str = "allocation.join_key_mode";
    pub const INCLUDE_PASSTHROUGH: &str = "output.include_passthrough";
    pub const WRITE_BOM: &str = "output.write_bom";

    // 界面语言
    pub const LOCALE: &str = "locale";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let manager = ConfigManager::new();
        assert_eq!(manager.get_order_columns().unwrap(), OrderColumns::default());
        assert!(manager.get_require_issue_date().unwrap());
        assert_eq!(manager.get_join_key_mode().unwrap(), JoinKeyMode::Composite);
        assert!(manager.get_write_bom().unwrap());
        assert_eq!(manager.get_locale().unwrap(), "zh-CN");
    }

    #[test]
    fn test_nested_json_is_flattened() {
        let manager = ConfigManager::from_json_str(
            r#"{
                "columns": {
                    "order": { "quantity": ["Qty"] },
                    "output": { "allocated": "Allocated_Qty" }
                },
                "filter": { "require_issue_date": false }
            }"#,
        )
        .unwrap();

        let orders = manager.get_order_columns().unwrap();
        assert_eq!(orders.quantity.names(), &["Qty".to_string()]);
        assert_eq!(manager.get_ledger_columns().unwrap().allocated, "Allocated_Qty");
        assert!(!manager.get_require_issue_date().unwrap());
    }

    #[test]
    fn test_flat_keys_and_override() {
        let mut manager =
            ConfigManager::from_json_str(r#"{"allocation.join_key_mode": "concatenated"}"#)
                .unwrap();
        assert_eq!(manager.get_join_key_mode().unwrap(), JoinKeyMode::Concatenated);

        manager.set(config_keys::JOIN_KEY_MODE, "composite");
        assert_eq!(manager.get_join_key_mode().unwrap(), JoinKeyMode::Composite);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let manager = ConfigManager::from_json_str(
            r#"{"allocation.join_key_mode": "fuzzy", "output.write_bom": "maybe"}"#,
        )
        .unwrap();
        assert!(matches!(
            manager.get_join_key_mode(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(manager.get_write_bom().is_err());
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(
            ConfigManager::from_json_str("[1, 2]"),
            Err(ConfigError::NotAnObject)
        ));
    }

    #[test]
    fn test_snapshot_contains_effective_defaults() {
        let manager = ConfigManager::new();
        let snapshot = manager.get_config_snapshot().unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed.get(config_keys::ORDER_QUANTITY).unwrap(), "QTY|Qty");
        assert_eq!(parsed.get(config_keys::JOIN_KEY_MODE).unwrap(), "COMPOSITE");
        assert_eq!(parsed.get(config_keys::OUTPUT_ALLOCATED).unwrap(), "Allocated_QTY");
    }

    #[test]
    fn test_from_file_missing() {
        let result = ConfigManager::from_file("no_such_dir/config.json");
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
