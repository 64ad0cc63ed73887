//! Application Configuration
//!
//! Configuration for the content application layer.

/// Content application configuration
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Page size used when a list request names none
    pub default_page_size: u32,
    /// Upper bound for a requested page size
    pub max_page_size: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl ContentConfig {
    pub fn with_page_sizes(default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_sizes() {
        let config = ContentConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
    }
}
