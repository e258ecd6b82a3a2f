use super::ConfigError;

/// A leaf of the flattened configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => n
                .as_i64()
                .map(ConfigValue::Integer)
                .or_else(|| n.as_f64().map(ConfigValue::Float))
                .unwrap_or_else(|| ConfigValue::String(n.to_string())),
            serde_yaml::Value::String(s) => ConfigValue::String(s.clone()),
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Sequence(seq) => ConfigValue::List(seq.iter().map(ConfigValue::from_yaml).collect()),
            serde_yaml::Value::Tagged(tagged) => ConfigValue::from_yaml(&tagged.value),
            serde_yaml::Value::Mapping(_) => ConfigValue::Null,
        }
    }
}

macro_rules! config_value_from {
    ($($ty:ty => |$v:ident| $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for ConfigValue {
                fn from($v: $ty) -> Self {
                    $conv
                }
            }
        )*
    };
}

config_value_from! {
    &str => |v| ConfigValue::String(v.to_string()),
    String => |v| ConfigValue::String(v),
    i64 => |v| ConfigValue::Integer(v),
    u16 => |v| ConfigValue::Integer(i64::from(v)),
    f64 => |v| ConfigValue::Float(v),
    bool => |v| ConfigValue::Bool(v),
}

/// Typed view of a [`ConfigValue`].
///
/// Environment variables always arrive as strings, so every numeric and
/// boolean impl also parses strings.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be read from the configuration",
    note = "supported: String, bool, f64, i64, i32, u16, u32, u64, usize, Option<T>, Vec<T>"
)]
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

fn mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn as_integer(value: &ConfigValue) -> Option<i64> {
    match value {
        ConfigValue::Integer(i) => Some(*i),
        ConfigValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

macro_rules! integer_config_value {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                    as_integer(value)
                        .and_then(|i| <$ty>::try_from(i).ok())
                        .ok_or_else(|| mismatch(key, stringify!($ty)))
                }
            }
        )*
    };
}

integer_config_value!(i64, i32, u16, u32, u64, usize);

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        Ok(match value {
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Null | ConfigValue::List(_) => return Err(mismatch(key, "String")),
        })
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let parsed = match value {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(key, "f64"))
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let parsed = match value {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(key, "bool"))
    }
}

/// `null` reads as `None`.
impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if *value == ConfigValue::Null {
            return Ok(None);
        }
        T::from_config_value(value, key).map(Some)
    }
}

/// A scalar reads as a one-element list.
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let ConfigValue::List(items) = value else {
            return T::from_config_value(value, key).map(|item| vec![item]);
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_config_value(item, &format!("{key}[{i}]")))
            .collect()
    }
}
