//! Process environment

use std::env;

use super::traits::ReadEnv;

/// Reads the live process environment through `std::env`
///
/// Nothing is snapshotted, so a variable set or removed after construction
/// is seen by the next read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_delegation() {
        assert_eq!(SystemEnv.var("PATH").is_some(), env::var("PATH").is_ok());
    }

    #[test]
    fn test_system_env_reads_are_live() {
        let key = "ENVWRAPPER_TEST_SYSTEM_ENV_LIVE";
        assert_eq!(SystemEnv.var(key), None);

        env::set_var(key, "first");
        assert_eq!(SystemEnv.var(key), Some("first".to_string()));

        env::set_var(key, "second");
        assert_eq!(SystemEnv.var(key), Some("second".to_string()));

        env::remove_var(key);
        assert_eq!(SystemEnv.var(key), None);
    }
}
