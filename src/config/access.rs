use super::*;

impl Config {
    /// Get a typed value from the configuration using dot notation.
    ///
    /// # Examples
    /// ```
    /// # use hocon_cfg::Config;
    /// # fn main() -> Result<(), hocon_cfg::HoconError> {
    /// let config = Config::from_str("server { host = \"localhost\", port = 8080 }\ndebug = on")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// let debug: bool = config.get("debug")?;
    /// # assert_eq!((host.as_str(), port, debug), ("localhost", 8080, true));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or value can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, HoconError>
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if key doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, HoconError>
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(HoconError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// The default is used both for missing paths and for values of the wrong type.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value` from the configuration. An empty path is the root.
    ///
    /// Containers are shared with the config, so this is cheap for objects and arrays.
    pub fn get_value(&self, path: &str) -> Result<Value, HoconError> {
        if path.trim().is_empty() {
            return Ok(self.root.clone());
        }

        let segments: Vec<&str> = path.split('.').collect();
        self.root
            .lookup(&segments)
            .cloned()
            .ok_or_else(|| HoconError::not_found(path))
    }

    /// Get all keys at a given path level, in document order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, HoconError> {
        match self.get_value(path)? {
            Value::Object(items) => Ok(items.keys().cloned().collect()),
            other => Err(HoconError::TypeError {
                message: format!("Path '{}' is not an object, got {:?}", path, other.kind()),
                hint: Some("Only objects have keys".into()),
                code: Some(306),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}

/// Enhance type errors with line number information from the config source.
fn enhance_error_with_line_info(e: HoconError, path: &str, raw_content: &str) -> HoconError {
    match e {
        HoconError::TypeError { message, hint, code } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                HoconError::TypeError {
                    message: format!("{}\n  → line {}: {}", message, line, snippet),
                    hint,
                    code,
                }
            } else {
                HoconError::TypeError { message, hint, code }
            }
        }
        other => other,
    }
}
