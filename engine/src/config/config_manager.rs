use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Loads, validates and caches the config. A missing source yields `TConfig::default()`.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.lock_cache()?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(config_data) = self.config_content_provider.get_config_content()? {
            let config = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;

        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self.lock_cache()?;
        *current = Some(config.clone());
        Ok(())
    }

    pub fn write_default(&self) -> Result<TConfig, String> {
        let config = TConfig::default();
        self.set_config(&config)?;
        Ok(config)
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, Option<TConfig>>, String> {
        self.config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        field_width: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { field_width: 40 }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.field_width == 0 {
                return Err("field_width must be greater than 0".to_string());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryProvider {
        content: RefCell<Option<String>>,
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn manager_with(content: Option<&str>) -> ConfigManager<MemoryProvider, TestConfig> {
        let provider = MemoryProvider {
            content: RefCell::new(content.map(str::to_string)),
        };
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager = manager_with(None);
        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_loads_content() {
        let manager = manager_with(Some("field_width: 12\n"));
        assert_eq!(manager.get_config().unwrap().field_width, 12);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager = manager_with(Some("field_width: 0\n"));
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"));
    }

    #[test]
    fn test_malformed_content_is_rejected() {
        let manager = manager_with(Some("field_width: [not, a, number]\n"));
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Failed to deserialize config"));
    }

    #[test]
    fn test_set_config_refuses_invalid() {
        let manager = manager_with(None);
        assert!(manager.set_config(&TestConfig { field_width: 0 }).is_err());
        assert_eq!(manager.config_content_provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_write_default_persists_and_caches() {
        let manager = manager_with(None);
        let written = manager.write_default().unwrap();
        assert_eq!(written, TestConfig::default());
        let stored = manager.config_content_provider.get_config_content().unwrap();
        assert!(stored.unwrap().contains("field_width: 40"));
        assert_eq!(manager.get_config().unwrap(), written);
    }
}
