use log::{Level, SetLoggerError};

/// Installs the log backend.
///
/// In the browser this routes `log` records to the developer console. On
/// native targets it does nothing so the host binary can pick its own logger.
pub fn init(level: Level) -> Result<(), SetLoggerError> {
    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(level)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::trace!("no console logger on this target, level {level} left to host");
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_init_is_a_no_op() {
        assert!(init(Level::Debug).is_ok());
        assert!(init(Level::Trace).is_ok());
    }
}
